//! Encode check applied to every record before it joins an output.

use tracing::error;

use crate::Result;
use crate::error::SerializationError;
use crate::record::Archivable;

/// Verify that `record` encodes as JSON.
///
/// On failure the record's debug form is logged and the error is returned so
/// the caller can abandon the current unit.
pub fn ensure_serializable<T: Archivable>(record: &T) -> Result<()> {
    match serde_json::to_vec(record) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!(record = ?record, error = %e, "record does not serialize");
            Err(SerializationError {
                id: record.id().to_string(),
                message: e.to_string(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Serialize;

    use super::*;
    use crate::Error;

    /// A map keyed by tuples, which JSON cannot express.
    #[derive(Debug, Serialize)]
    struct Unencodable {
        id: String,
        created_at: String,
        lookup: HashMap<(u8, u8), u8>,
    }

    impl Archivable for Unencodable {
        fn created_at(&self) -> &str {
            &self.created_at
        }

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn rejects_records_that_do_not_encode() {
        let record = Unencodable {
            id: "77".into(),
            created_at: "2021-01-01 00:00:00.000000+00:00".into(),
            lookup: HashMap::from([((1, 2), 3)]),
        };
        let err = ensure_serializable(&record).unwrap_err();
        assert!(matches!(err, Error::Serialization(SerializationError { ref id, .. }) if id == "77"));
        assert!(err.is_unit_scoped());
    }

    #[test]
    fn accepts_plain_records() {
        let record = Unencodable {
            id: "78".into(),
            created_at: "2021-01-01 00:00:00.000000+00:00".into(),
            lookup: HashMap::new(),
        };
        assert!(ensure_serializable(&record).is_ok());
    }
}
