//! Session and transaction identifiers.

use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

/// Hex characters kept from the UUID of a session id.
pub const SESSION_ID_HEX_LEN: usize = 10;

/// Hex characters kept from the UUID of a transaction id.
pub const TRANSACTION_ID_HEX_LEN: usize = 12;

/// Issues `sess_…` and `txn_…` identifiers, unique within one generator.
///
/// Identifiers are derived from UUID v4 values drawn from the caller's RNG,
/// so a seeded run issues the same identifiers every time.
#[derive(Debug, Default)]
pub struct IdGenerator {
    issued: HashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next session identifier, `sess_` followed by 10 hex characters.
    pub fn next_session_id<R: Rng>(&mut self, rng: &mut R) -> String {
        self.next_unique(rng, "sess", SESSION_ID_HEX_LEN)
    }

    /// Next transaction identifier, `txn_` followed by 12 hex characters.
    pub fn next_transaction_id<R: Rng>(&mut self, rng: &mut R) -> String {
        self.next_unique(rng, "txn", TRANSACTION_ID_HEX_LEN)
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    fn next_unique<R: Rng>(&mut self, rng: &mut R, prefix: &str, hex_len: usize) -> String {
        loop {
            let hex = random_uuid_v4(rng).simple().to_string();
            let id = format!("{prefix}_{}", &hex[..hex_len]);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// Generate a random UUID v4 using the provided RNG.
fn random_uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_id_shapes() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ids = IdGenerator::new();

        let session = ids.next_session_id(&mut rng);
        let txn = ids.next_transaction_id(&mut rng);

        assert!(session.starts_with("sess_"));
        assert_eq!(session.len(), "sess_".len() + SESSION_ID_HEX_LEN);
        assert!(txn.starts_with("txn_"));
        assert_eq!(txn.len(), "txn_".len() + TRANSACTION_ID_HEX_LEN);
        assert!(session[5..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ids = IdGenerator::new();
        let mut seen = HashSet::new();

        for _ in 0..5_000 {
            assert!(seen.insert(ids.next_session_id(&mut rng)));
        }
        assert_eq!(ids.issued(), 5_000);
    }

    #[test]
    fn test_uuid_version() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(random_uuid_v4(&mut rng).get_version_num(), 4);
    }

    #[test]
    fn test_deterministic_ids() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        let mut ids1 = IdGenerator::new();
        let mut ids2 = IdGenerator::new();

        assert_eq!(
            ids1.next_transaction_id(&mut rng1),
            ids2.next_transaction_id(&mut rng2)
        );
    }
}
