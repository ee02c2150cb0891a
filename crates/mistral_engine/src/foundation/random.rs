//! Random identifier generation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::{Builder, Uuid};

/// Produces UUID-v4 identifiers from a generator seeded once.
///
/// Each [`World`](crate::ecs::World) owns one; seed it explicitly to get a
/// reproducible id sequence.
#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Create a generator seeded from OS entropy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic generator
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next random UUID with the version and variant bits set
    pub fn next_uuid(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }

    /// Next id in the hyphenated lowercase 8-4-4-4-12 form
    pub fn next_id(&mut self) -> String {
        self.next_uuid().hyphenated().to_string()
    }
}
