//! Monotonic time source

/// Millisecond clock
///
/// The value wraps after roughly 49 days; consumers compare timestamps
/// with wrapping arithmetic.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u32;

    /// Milliseconds elapsed since `earlier`, tolerant of wraparound
    fn elapsed_since(&self, earlier: u32) -> u32 {
        self.now_ms().wrapping_sub(earlier)
    }
}
