//! Fixed-capacity receive buffer
//!
//! Holds bytes that have arrived from the sensor but have not yet been
//! consumed into a decoded frame. Consumption always happens at the front,
//! either one byte at a time while hunting for a header or a whole frame
//! at once after a successful decode.

use heapless::Vec;

/// Receive buffer capacity in bytes
pub const BUFFER_CAPACITY: usize = 64;

/// Returned by [`FrameBuffer::push`] when the buffer was full
///
/// The buffer has already been cleared when this is returned; the byte
/// that triggered the overflow is discarded as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Overflow {
    /// Number of bytes thrown away, including the rejected byte
    pub discarded: usize,
}

/// Bounded byte accumulator with front drain
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    bytes: Vec<u8, BUFFER_CAPACITY>,
}

impl FrameBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append one byte
    ///
    /// A full buffer is reset to empty, not slid.
    pub fn push(&mut self, byte: u8) -> Result<(), Overflow> {
        if self.bytes.push(byte).is_err() {
            let discarded = self.bytes.len() + 1;
            self.bytes.clear();
            return Err(Overflow { discarded });
        }
        Ok(())
    }

    /// Discard the first `n` bytes, shifting the remainder to the start
    ///
    /// `n` larger than the current length clears the buffer.
    pub fn drop_front(&mut self, n: usize) {
        let len = self.bytes.len();
        if n >= len {
            self.bytes.clear();
            return;
        }
        self.bytes.copy_within(n.., 0);
        self.bytes.truncate(len - n);
    }

    /// True if at least `n` bytes are buffered
    pub fn has_at_least(&self, n: usize) -> bool {
        self.bytes.len() >= n
    }

    /// Drop all buffered bytes
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        BUFFER_CAPACITY
    }

    /// View of the buffered bytes, oldest first
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}
