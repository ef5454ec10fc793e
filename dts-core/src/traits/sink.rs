//! Measurement consumer trait

/// Receives change-filtered distance readings
///
/// Implementations forward values to whatever consumes them (a channel, a
/// display, a network publisher).
pub trait MeasurementSink {
    /// Publish a distance in meters
    ///
    /// `NaN` means the sensor sees no target.
    fn publish(&mut self, meters: f32);
}

impl<F: FnMut(f32)> MeasurementSink for F {
    fn publish(&mut self, meters: f32) {
        self(meters)
    }
}
