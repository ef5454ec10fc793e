//! Consumer-facing traits
//!
//! These traits define the interface between the sensor component and
//! whatever receives its readings.

pub mod sink;

pub use sink::MeasurementSink;
