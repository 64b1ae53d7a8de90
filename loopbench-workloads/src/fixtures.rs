//! Seeded fixture generation
//!
//! Every generator is a pure function of `(len, seed)`, so two builders with
//! the same parameters produce identical fixtures on every platform.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound (inclusive) of generated random numbers
const RANDOM_MAX: i64 = 1_000_000;

/// Record used by the object map and filter cases
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Person {
    /// Numeric identifier
    pub id: i64,
    /// Display name
    pub name: String,
}

impl Person {
    /// Create a record
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Builds fixtures of a fixed length from an explicit seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureBuilder {
    len: usize,
    seed: u64,
}

impl FixtureBuilder {
    /// Create a builder
    pub fn new(len: usize, seed: u64) -> Self {
        Self { len, seed }
    }

    /// Number of elements each generator produces
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether generators produce empty fixtures
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Seed shared by the random generators
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `1..=len`
    pub fn sequential(&self) -> Vec<i64> {
        (1..=self.len as i64).collect()
    }

    /// Uniform numbers in `0..=1_000_000`
    pub fn random_numbers(&self) -> Vec<i64> {
        let mut rng = self.rng(0);
        (0..self.len).map(|_| rng.gen_range(0..=RANDOM_MAX)).collect()
    }

    /// `"item1"`, `"item2"`, ...
    pub fn labels(&self) -> Vec<String> {
        (1..=self.len).map(|n| format!("item{n}")).collect()
    }

    /// Records `{id: n, name: "{prefix}{n}"}` for `n` in `1..=len`
    pub fn persons(&self, prefix: &str) -> Vec<Person> {
        (1..=self.len as i64)
            .map(|n| Person::new(n, format!("{prefix}{n}")))
            .collect()
    }

    /// Random-length lists of random numbers, `len` elements in total
    ///
    /// Inner lists hold between 0 and `max_inner` elements; empty inner lists
    /// are kept so flattening has to skip them.
    pub fn nested(&self, max_inner: usize) -> Vec<Vec<i64>> {
        let mut rng = self.rng(1);
        let max_inner = max_inner.max(1);
        let mut remaining = self.len;
        let mut lists = Vec::new();

        while remaining > 0 {
            let size = rng.gen_range(0..=max_inner).min(remaining);
            lists.push((0..size).map(|_| rng.gen_range(0..=RANDOM_MAX)).collect());
            remaining -= size;
        }
        lists
    }

    fn rng(&self, stream: u64) -> StdRng {
        StdRng::seed_from_u64(self.seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }
}
