/// Random source used for enemy placement.
///
/// The simulation only ever asks for a uniform integer over an inclusive
/// range, so tests can script exact values while the game runs on any
/// `rand::Rng`.

use rand::Rng;

pub trait RandomSource {
    /// Uniform integer in `[lo, hi]` (both inclusive). `lo <= hi`.
    fn uniform(&mut self, lo: i32, hi: i32) -> i32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, lo: i32, hi: i32) -> i32 {
        self.gen_range(lo..=hi)
    }
}
