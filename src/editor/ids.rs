//! ID generation for new stages and jobs

use uuid::Uuid;

/// Source of candidate IDs
///
/// Implementations only propose IDs; the store checks each candidate
/// against the pipeline and asks again on collision.
pub trait IdSource {
    /// Propose a new ID with the given prefix (`"stage"` or `"job"`)
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Random IDs such as `job-3f2a9c1e`
#[derive(Debug, Default, Clone)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self, prefix: &str) -> String {
        format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
    }
}

/// Counting IDs such as `stage-1`, `job-1`, `job-2`
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}-{}", prefix, self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_count_up() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id("stage"), "stage-1");
        assert_eq!(ids.next_id("job"), "job-2");
    }

    #[test]
    fn test_uuid_ids_have_prefix() {
        let mut ids = UuidIds;
        let id = ids.next_id("job");
        assert!(id.starts_with("job-"));
        assert_eq!(id.len(), "job-".len() + 8);
        assert_ne!(id, ids.next_id("job"));
    }
}
