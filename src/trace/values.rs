//! Bar values and the sequence being sorted

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A bar height in percent, always within [`VALUE_MIN`, `VALUE_MAX`]
pub type Value = u8;

/// Clamp an arbitrary height into the displayable range
#[inline]
pub fn clamp_value(value: i64) -> Value {
    value.clamp(VALUE_MIN as i64, VALUE_MAX as i64) as Value
}

/// The ordered list of magnitudes shown as bars
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueSequence {
    values: Vec<Value>,
}

impl ValueSequence {
    /// Wrap existing heights, clamping each into range
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            values: values.into_iter().map(clamp_value).collect(),
        }
    }

    /// Draw `count` uniform heights in [`VALUE_MIN`, `VALUE_MAX`]
    pub fn random(count: usize, rng: &mut impl Rng) -> Self {
        let count = count.clamp(BAR_COUNT_MIN, BAR_COUNT_MAX);
        let values = (0..count)
            .map(|_| rng.random_range(VALUE_MIN..=VALUE_MAX))
            .collect();
        Self { values }
    }

    /// Seeded variant of [`ValueSequence::random`] for reproducible runs
    pub fn from_seed(count: usize, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self::random(count, &mut rng)
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
