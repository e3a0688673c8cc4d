//! Function call identifiers.
//!
//! Every ES2+ request carries a `functionCallIdentifier` that must never be
//! reused. Identifiers are random (version 4) UUIDs in URN form, drawn from
//! the operating system's entropy source.

use rand::rngs::OsRng;
use rand::TryRngCore;
use uuid::Builder;

use super::error::{Es2PlusError, Es2PlusResult};

/// Source of fresh function call identifiers.
pub trait CallIdSource: Send + Sync {
    /// Produce an identifier that has never been handed out before.
    fn next_call_id(&self) -> Es2PlusResult<String>;
}

/// Random UUID v4 identifiers, rendered as `urn:uuid:...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidCallIds;

impl CallIdSource for UuidCallIds {
    fn next_call_id(&self) -> Es2PlusResult<String> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| Es2PlusError::CorrelationId(e.to_string()))?;
        let uuid = Builder::from_random_bytes(bytes).into_uuid();
        Ok(uuid.urn().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_urn_format() {
        let id = UuidCallIds.next_call_id().unwrap();
        assert!(id.starts_with("urn:uuid:"));
        let uuid = uuid::Uuid::parse_str(id.trim_start_matches("urn:uuid:")).unwrap();
        assert_eq!(uuid.get_version_num(), 4);
    }

    #[test]
    fn test_ids_do_not_repeat() {
        let ids: HashSet<_> = (0..1000)
            .map(|_| UuidCallIds.next_call_id().unwrap())
            .collect();
        assert_eq!(ids.len(), 1000);
    }
}
