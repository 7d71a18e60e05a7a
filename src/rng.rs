//! Seedable randomness injected into scoring and shuffling.

/// Small deterministic RNG (splitmix64) used for reproducible assembly.
///
/// Tests seed it with a fixed value and assert exact output; production
/// callers start from [`DeterministicRng::from_entropy`].
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// RNG seeded with a fixed value.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Resume from a previously captured state.
    pub fn from_state(state: u64) -> Self {
        Self { state }
    }

    /// RNG seeded from the process entropy source.
    pub fn from_entropy() -> Self {
        Self {
            state: rand::random(),
        }
    }

    /// Current internal state, for capture and later resume.
    pub fn state(&self) -> u64 {
        self.state
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore;

    use super::*;

    #[test]
    fn same_seed_yields_same_sequence() {
        let mut a = DeterministicRng::new(42);
        let mut b = DeterministicRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn captured_state_resumes_the_sequence() {
        let mut original = DeterministicRng::new(7);
        original.next_u64();
        let mut resumed = DeterministicRng::from_state(original.state());
        assert_eq!(original.next_u64(), resumed.next_u64());
    }

    #[test]
    fn fill_bytes_covers_partial_words() {
        let mut rng = DeterministicRng::new(3);
        let mut buffer = [0u8; 9];
        rng.fill_bytes(&mut buffer);
        assert!(buffer.iter().any(|b| *b != 0));
    }
}
