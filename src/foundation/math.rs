use rand::Rng;

/// Small deterministic PRNG (SplitMix64).
///
/// Not cryptographic; used so that a gallery's chaotic layout is reproducible from a seed.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Seed a new generator.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[min, max)`; returns `min` when the range is empty.
    pub fn next_in(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + self.next_f64_01() * (max - min)
    }
}

/// Fresh seed from the thread-local OS-seeded generator, for callers that want a new layout
/// on every run. Feed it to [`Rng64::new`] to keep the layout reproducible afterwards.
pub fn entropy_seed() -> u64 {
    rand::thread_rng().r#gen()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
