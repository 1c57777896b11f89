use rand::Rng;
use rand::seq::index;

use crate::error::{Result, TicketingError};

/// Size of every ticket and every draw.
pub const NUMBERS_PER_SET: usize = 6;

/// Inclusive bounds for generated numbers. Always holds at least
/// `NUMBERS_PER_SET` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    min: u32,
    max: u32,
}

impl Default for NumberRange {
    fn default() -> Self {
        Self { min: 1, max: 49 }
    }
}

impl NumberRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        let range = Self { min, max };
        if min > max || range.len() < NUMBERS_PER_SET as u64 {
            return Err(TicketingError::InvalidRange { min, max });
        }
        Ok(range)
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn len(&self) -> u64 {
        (u64::from(self.max) + 1).saturating_sub(u64::from(self.min))
    }

    pub fn contains(&self, n: u32) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

/// Anything that can hand out a set of lottery numbers.
pub trait NumberSource: Send + Sync {
    fn next_set(&self) -> Vec<u32>;
}

/// Draws `NUMBERS_PER_SET` distinct numbers uniformly from a range and
/// returns them in ascending order. Used for both tickets and draws.
#[derive(Debug, Clone)]
pub struct NumberGenerator {
    range: NumberRange,
}

impl NumberGenerator {
    pub fn new(range: NumberRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> NumberRange {
        self.range
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u32> {
        let span = self.range.len() as usize;
        let mut numbers: Vec<u32> = index::sample(rng, span, NUMBERS_PER_SET)
            .into_iter()
            .map(|offset| self.range.min + offset as u32)
            .collect();
        numbers.sort_unstable();
        numbers
    }
}

impl NumberSource for NumberGenerator {
    fn next_set(&self) -> Vec<u32> {
        self.generate_with(&mut rand::thread_rng())
    }
}
