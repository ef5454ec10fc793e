//! Inter-task communication channels
//!
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use dts_core::MeasurementSink;

/// Latest published distance in meters (NaN = no target)
pub static DISTANCE: Signal<CriticalSectionRawMutex, f32> = Signal::new();

/// Forwards published readings to [`DISTANCE`]
pub struct DistanceSignal;

impl MeasurementSink for DistanceSignal {
    fn publish(&mut self, meters: f32) {
        DISTANCE.signal(meters);
    }
}
