//! # Object Ids
//!
//! Documents use short, ObjectId-like strings for every field, column and row
//! `_id`. An id is 8 hex digits of whole seconds since the Unix epoch followed
//! by 16 random hex digits:
//!
//! ```text
//! 6564684000000000 + 3f9a1c0de2b47a55
//! └─ seconds ─┘       └─ random ─┘
//! ```
//!
//! Ids sort by creation second and nothing finer. Collisions are not checked;
//! 64 random bits make one vanishingly unlikely within a single document.

use chrono::Utc;
use uuid::Uuid;

const RANDOM_HEX_LEN: usize = 16;

/// Mint a new id.
pub fn new_id() -> String {
    let seconds = Utc::now().timestamp().max(0) as u64;
    let random = Uuid::new_v4().simple().to_string();
    format!("{:08x}{}", seconds, &random[..RANDOM_HEX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_is_lowercase_hex() {
        let id = new_id();
        assert_eq!(id.len(), 24);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn id_starts_with_current_second() {
        let before = Utc::now().timestamp() as u64;
        let id = new_id();
        let after = Utc::now().timestamp() as u64;

        let seconds = u64::from_str_radix(&id[..8], 16).unwrap();
        assert!(seconds >= before && seconds <= after);
    }

    #[test]
    fn ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
