#![allow(dead_code)]

use yar::random::RandomSource;

/// Replays a fixed list of values, cycling when exhausted. Each value is
/// clamped into the requested range.
#[derive(Clone, Debug)]
pub struct Scripted {
    values: Vec<i32>,
    next: usize,
}

impl Scripted {
    pub fn new(values: impl Into<Vec<i32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl RandomSource for Scripted {
    fn uniform(&mut self, lo: i32, hi: i32) -> i32 {
        if self.values.is_empty() {
            return lo;
        }
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v.clamp(lo, hi)
    }
}
