//! Session identifier generation.

use rand::Rng;

/// Produces opaque, unguessable session identifiers.
///
/// Implementations must draw from a cryptographically strong source with
/// at least 122 bits of entropy per ID. The authenticator rejects IDs that
/// collide with a stored session and asks again, but it cannot detect a
/// generator that is merely predictable.
pub trait IdGenerator: Send + Sync + 'static {
    /// Returns a fresh identifier.
    fn generate(&self) -> String;
}

/// Number of random bytes per identifier (128 bits).
const ID_BYTES: usize = 16;

/// Default generator: 16 random bytes from the thread-local CSPRNG,
/// hex encoded to a 32-character string.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        let bytes: [u8; ID_BYTES] = rng.random();
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}
