//! The `mulberry32` generator used for daily puzzles.

use rand::RngCore;

/// A 32-bit multiply-xorshift generator.
///
/// Daily puzzles past the static table are drawn from `Mulberry32::new(day + 1)`.
/// The stream must never change: doing so would change every published
/// puzzle.
///
/// # Examples
///
/// ```
/// use qu0x_generator::Mulberry32;
/// use rand::RngCore as _;
///
/// let mut rng = Mulberry32::new(1);
/// assert_eq!(rng.next_u32(), 2_693_262_067);
/// assert_eq!(rng.next_u32(), 11_749_833);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// Creates a generator from a 32-bit seed.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Scales a 32-bit draw into `0..span`.
///
/// Equivalent to `floor(draw / 2^32 * span)`, computed without floating point.
pub(crate) fn scale(draw: u32, span: u32) -> u32 {
    let scaled = (u64::from(draw) * u64::from(span)) >> 32;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
