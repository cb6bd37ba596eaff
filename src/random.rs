use rand::Rng;

/// Bounded integer source used for food placement.
pub trait RandomSource {
    /// Uniform integer in the inclusive range `[lo, hi]`.
    fn next_int(&mut self, lo: i16, hi: i16) -> i16;
}

impl<R: Rng> RandomSource for R {
    fn next_int(&mut self, lo: i16, hi: i16) -> i16 {
        self.gen_range(lo..=hi)
    }
}
