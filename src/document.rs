//! Synthetic benchmark documents
//!
//! Each unit of work inserts a batch of small two-field documents built
//! deterministically from loop counters, so a run's payload is fully
//! reproducible and every document can be traced back to the client that
//! produced it. On the wire the fields are named `client` and `doc`.

use serde::{Deserialize, Serialize};

/// One synthetic document: which client produced it, and where it sits in
/// that client's batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyntheticDoc {
    #[serde(rename = "client")]
    pub client_index: u64,

    #[serde(rename = "doc")]
    pub doc_index: u64,
}

impl SyntheticDoc {
    pub fn new(client_index: u64, doc_index: u64) -> Self {
        Self {
            client_index,
            doc_index,
        }
    }
}

/// Build the batch for one client: `batch_size` documents with
/// `doc_index` running over `0..batch_size` exactly once.
pub fn batch(client_index: u64, batch_size: usize) -> Vec<SyntheticDoc> {
    (0..batch_size as u64)
        .map(|doc_index| SyntheticDoc::new(client_index, doc_index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_batch_covers_indices_exactly() {
        let docs = batch(3, 100);
        assert_eq!(docs.len(), 100);

        let mut seen = HashSet::new();
        for doc in &docs {
            assert_eq!(doc.client_index, 3);
            assert!(doc.doc_index < 100);
            assert!(seen.insert(doc.doc_index), "duplicate doc_index");
        }
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn test_empty_batch() {
        assert!(batch(0, 0).is_empty());
    }

    #[test]
    fn test_batch_is_deterministic() {
        assert_eq!(batch(7, 16), batch(7, 16));
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(SyntheticDoc::new(4, 9)).unwrap();
        assert_eq!(value["client"], 4);
        assert_eq!(value["doc"], 9);
    }

    #[test]
    fn test_round_trip_through_wire_names() {
        let doc: SyntheticDoc = serde_json::from_value(serde_json::json!({
            "client": 12,
            "doc": 34,
        }))
        .unwrap();
        assert_eq!(doc, SyntheticDoc::new(12, 34));
    }
}
