use crate::error::{AuthzError, Result};

/// Name of the sequence privilege ids are drawn from.
pub const PRIVILEGE_ID_SEQUENCE: &str = "privilege_id_seq";

/// Source of surrogate ids for newly persisted records.
///
/// Implementations must hand out strictly increasing, unique values, one at a
/// time.
pub trait IdGenerator {
    fn next_id(&mut self) -> Result<i32>;
}

/// A named counter in the style of a `sequence_name`/`value` table row.
///
/// Starts at 1 and allocates one id per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSequence {
    name: String,
    next: i32,
}

impl TableSequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self::starting_at(name, 1)
    }

    /// Resume a sequence whose next value is already known, e.g. after reload.
    pub fn starting_at(name: impl Into<String>, next: i32) -> Self {
        Self {
            name: name.into(),
            next,
        }
    }

    /// The sequence used for privilege ids.
    pub fn privileges() -> Self {
        Self::new(PRIVILEGE_ID_SEQUENCE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value the next call to [`IdGenerator::next_id`] will return.
    pub fn peek(&self) -> i32 {
        self.next
    }
}

impl IdGenerator for TableSequence {
    fn next_id(&mut self) -> Result<i32> {
        let id = self.next;
        self.next = id
            .checked_add(1)
            .ok_or_else(|| AuthzError::SequenceExhausted(self.name.clone()))?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_one() {
        let mut seq = TableSequence::privileges();
        assert_eq!(seq.name(), "privilege_id_seq");
        assert_eq!(seq.next_id().unwrap(), 1);
        assert_eq!(seq.next_id().unwrap(), 2);
        assert_eq!(seq.next_id().unwrap(), 3);
        assert_eq!(seq.peek(), 4);
    }

    #[test]
    fn test_resume() {
        let mut seq = TableSequence::starting_at("privilege_id_seq", 51);
        assert_eq!(seq.next_id().unwrap(), 51);
    }

    #[test]
    fn test_exhausted() {
        let mut seq = TableSequence::starting_at("tiny", i32::MAX);
        assert!(matches!(
            seq.next_id(),
            Err(AuthzError::SequenceExhausted(name)) if name == "tiny"
        ));
        // A failed allocation does not advance the counter.
        assert_eq!(seq.peek(), i32::MAX);
    }
}
