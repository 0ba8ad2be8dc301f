use common::value::{format_value, is_scalar};
use common::{Column, ForeignKey, OplogEntry, SchemaCache, TranslateError, UuidProvider};
use serde_json::{Map, Value};
use tracing::trace;

/// Entry point for `op: "i"`: emits the owning schema (if new), then
/// recurses through `emitTableAndInsert` for the root document and every
/// nested sub-document it contains.
pub fn generate_insert(
    entry: &OplogEntry,
    cache: &SchemaCache,
    uuid: &dyn UuidProvider,
) -> Result<Vec<String>, TranslateError> {
    let ns = entry.namespace().ok_or(TranslateError::InvalidOplog)?;
    let mut out = Vec::new();

    if !cache.load_or_store(ns.database.clone()) {
        out.push(format!("CREATE SCHEMA {};", ns.database));
    }

    emit_table_and_insert(&ns.database, &ns.collection, None, entry.o.clone(), cache, uuid, &mut out);

    if out.is_empty() {
        return Err(TranslateError::InvalidOplog);
    }
    Ok(out)
}

/// Materialises (or extends) the table for `<db>.<coll>`, emits its
/// INSERT, then recurses into any nested map/array column to expand it
/// into a child table carrying a synthesised foreign key back to this
/// document's `_id`.
fn emit_table_and_insert(
    db: &str,
    coll: &str,
    fk: Option<ForeignKey>,
    mut data: Map<String, Value>,
    cache: &SchemaCache,
    uuid: &dyn UuidProvider,
    out: &mut Vec<String>,
) {
    if !data.contains_key("_id") {
        data.insert("_id".to_string(), Value::String(uuid.new_id()));
    }

    let ns = format!("{db}.{coll}");
    trace!(ns = %ns, has_fk = fk.is_some(), "materialising table");

    let mut scalar_cols: Vec<String> = data
        .iter()
        .filter(|(_, v)| is_scalar(v))
        .map(|(k, _)| k.clone())
        .collect();
    scalar_cols.sort();

    if !cache.load_or_store(ns.clone()) {
        out.push(create_table_ddl(&ns, &fk, &scalar_cols, &data, cache));
    } else if let Some(alter) = alter_table_ddl(&ns, &scalar_cols, &data, cache) {
        out.push(alter);
    }

    if let Some(fk) = &fk {
        data.insert(fk.name.clone(), fk.value.clone());
    }

    out.push(build_insert(&ns, &data));

    let mut all_cols: Vec<String> = data.keys().cloned().collect();
    all_cols.sort();
    let parent_id = data["_id"].clone();

    for col in &all_cols {
        match &data[col] {
            Value::Array(items) => {
                let child_coll = format!("{coll}_{col}");
                for item in items {
                    if let Value::Object(obj) = item {
                        let child_fk =
                            ForeignKey::new(format!("{coll}__id"), parent_id.clone(), "VARCHAR(255)");
                        emit_table_and_insert(db, &child_coll, Some(child_fk), obj.clone(), cache, uuid, out);
                    }
                }
            }
            Value::Object(obj) => {
                let child_coll = format!("{coll}_{col}");
                let child_fk = ForeignKey::new(format!("{coll}__id"), parent_id.clone(), "VARCHAR(255)");
                emit_table_and_insert(db, &child_coll, Some(child_fk), obj.clone(), cache, uuid, out);
            }
            _ => {}
        }
    }
}

fn create_table_ddl(
    ns: &str,
    fk: &Option<ForeignKey>,
    scalar_cols: &[String],
    data: &Map<String, Value>,
    cache: &SchemaCache,
) -> String {
    let mut defs = Vec::new();

    if let Some(fk) = fk {
        defs.push("_id VARCHAR(255) PRIMARY KEY".to_string());
        cache.load_or_store(format!("{ns}._id.VARCHAR(255)"));
        defs.push(format!("{} {}", fk.name, fk.data_type));
        cache.load_or_store(format!("{ns}.{}.{}", fk.name, fk.data_type));
        for name in scalar_cols {
            if name == "_id" {
                continue;
            }
            let column = Column::new(name, &data[name]);
            let t = column.data_type();
            defs.push(format!("{name} {t}"));
            cache.load_or_store(format!("{ns}.{name}.{t}"));
        }
    } else {
        for name in scalar_cols {
            let column = Column::new(name, &data[name]);
            let t = column.data_type();
            if column.is_primary_key() {
                defs.push(format!("{name} {t} PRIMARY KEY"));
            } else {
                defs.push(format!("{name} {t}"));
            }
            cache.load_or_store(format!("{ns}.{name}.{t}"));
        }
    }

    format!("CREATE TABLE {ns} ({});", defs.join(", "))
}

fn alter_table_ddl(
    ns: &str,
    scalar_cols: &[String],
    data: &Map<String, Value>,
    cache: &SchemaCache,
) -> Option<String> {
    let mut missing: Vec<(String, &'static str)> = Vec::new();
    for name in scalar_cols {
        let t = Column::new(name, &data[name]).data_type();
        if !cache.load_or_store(format!("{ns}.{name}.{t}")) {
            missing.push((name.clone(), t));
        }
    }
    missing.sort_by(|a, b| a.0.cmp(&b.0));
    if missing.is_empty() {
        return None;
    }
    let adds: Vec<String> = missing
        .iter()
        .map(|(c, t)| format!("ADD COLUMN {c} {t}"))
        .collect();
    Some(format!("ALTER TABLE {ns} {};", adds.join(", ")))
}

fn build_insert(ns: &str, data: &Map<String, Value>) -> String {
    let mut scalar_cols: Vec<&String> = data.iter().filter(|(_, v)| is_scalar(v)).map(|(k, _)| k).collect();
    scalar_cols.sort();
    let cols = scalar_cols.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", ");
    let vals = scalar_cols
        .iter()
        .map(|c| format_value(&data[*c]))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {ns} ({cols}) VALUES ({vals});")
}
