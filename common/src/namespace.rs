/// `<database>.<collection>` derived from an oplog entry's `ns` field.
///
/// Only the first dot splits the namespace, so a collection name that
/// itself contains a dot (legal, if unusual, in MongoDB) stays intact.
/// Both halves are lower-cased (§3) so that e.g. `Test.Student` and
/// `test.student` are treated as the same database/table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub database: String,
    pub collection: String,
}

impl Namespace {
    pub fn parse(ns: &str) -> Option<Self> {
        let (db, coll) = ns.split_once('.')?;
        if db.is_empty() || coll.is_empty() {
            return None;
        }
        Some(Self {
            database: db.to_lowercase(),
            collection: coll.to_lowercase(),
        })
    }

    pub fn qualified(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_first_dot() {
        let ns = Namespace::parse("school.students").unwrap();
        assert_eq!(ns.database, "school");
        assert_eq!(ns.collection, "students");
    }

    #[test]
    fn test_parse_keeps_remaining_dots_in_collection() {
        let ns = Namespace::parse("school.system.students").unwrap();
        assert_eq!(ns.database, "school");
        assert_eq!(ns.collection, "system.students");
    }

    #[test]
    fn test_parse_rejects_missing_dot() {
        assert!(Namespace::parse("school").is_none());
    }

    #[test]
    fn test_parse_lowercases_both_halves() {
        let ns = Namespace::parse("Test.Student").unwrap();
        assert_eq!(ns.database, "test");
        assert_eq!(ns.collection, "student");
    }
}
