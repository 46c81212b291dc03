/// xorshift64* generator producing `Math.random`-style 53-bit unit floats.
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

    /// Uniform in `[0, 1)` with 53 bits of precision.
    pub(crate) fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }

    /// `floor(unit * upper)`, clamped to `upper - 1`.
    pub(crate) fn next_usize(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        // `% upper` on the raw u64 is biased, and for small `upper` it picks a different first
        // index than flooring the unit float, which changes every seeded layout downstream.
        let v = self.next_f64_unit();
        let idx = (v * (upper as f64)).floor() as usize;
        idx.min(upper - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::XorShift64Star;

    #[test]
    fn next_f64_unit_sequence_for_seed_one() {
        let mut rng = XorShift64Star::new(1);
        let expected = [
            0.28083505005035947,
            0.6711372530266764,
            0.7258461452833668,
            0.303529299965799,
            0.056176763098259475,
        ];
        for (i, &e) in expected.iter().enumerate() {
            let v = rng.next_f64_unit();
            assert!(
                (v - e).abs() < 1e-15,
                "unexpected rng value at {i}: got {v}, expected {e}"
            );
        }
    }

    #[test]
    fn next_usize_floors_instead_of_taking_a_modulus() {
        // First unit draw for seed 1 is ~0.2808, so floor(r * 3) == 0.
        let mut rng = XorShift64Star::new(1);
        assert_eq!(rng.next_usize(3), 0);
    }

    #[test]
    fn zero_seed_is_treated_as_one() {
        let mut a = XorShift64Star::new(0);
        let mut b = XorShift64Star::new(1);
        for _ in 0..8 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}
