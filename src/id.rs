//! Report identifier generation
//!
//! Ids are UUID v4 in canonical hyphenated form. 122 bits of entropy makes
//! collisions across a store's lifetime a non-concern; the store still
//! rejects duplicates rather than overwriting.

use uuid::Uuid;

/// Generate a fresh report identifier
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canonical_form() {
        let id = generate();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
    }

    #[test]
    fn test_unique_across_calls() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
