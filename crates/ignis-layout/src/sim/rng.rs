/// Small deterministic PRNG; layouts must be reproducible for a given seed.
#[derive(Debug, Clone)]
pub(crate) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// `[0, 1)` with 53 bits of precision.
    pub(crate) fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }

    /// Tiny non-zero displacement used to separate coincident nodes.
    pub(crate) fn jiggle(&mut self) -> f64 {
        let j = (self.next_f64_unit() - 0.5) * 1e-6;
        if j == 0.0 { 1e-7 } else { j }
    }
}
