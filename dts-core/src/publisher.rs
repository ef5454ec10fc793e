//! Change-filtered measurement publishing
//!
//! Only readings that differ meaningfully from the last published one reach
//! the consumer. Comparison is done in whole millimeters.

use dts_protocol::Measurement;

/// Last value handed to the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PublishedValue {
    /// Nothing published yet
    #[default]
    Unset,
    /// Last publish was "no target" (NaN)
    NoTarget,
    /// Last published distance in millimeters
    Distance(u16),
}

impl PublishedValue {
    /// Value as the consumer sees it: meters, `NaN` for no target
    pub fn as_meters(&self) -> Option<f32> {
        match *self {
            PublishedValue::Unset => None,
            PublishedValue::NoTarget => Some(f32::NAN),
            PublishedValue::Distance(mm) => Some(mm as f32 / 1000.0),
        }
    }
}

/// Hysteresis filter in front of the consumer
#[derive(Debug, Clone)]
pub struct MeasurementPublisher {
    last: PublishedValue,
    hysteresis_mm: u16,
}

impl MeasurementPublisher {
    pub const fn new(hysteresis_mm: u16) -> Self {
        Self {
            last: PublishedValue::Unset,
            hysteresis_mm,
        }
    }

    pub fn reset(&mut self) {
        self.last = PublishedValue::Unset;
    }

    pub fn last(&self) -> PublishedValue {
        self.last
    }

    pub fn hysteresis_mm(&self) -> u16 {
        self.hysteresis_mm
    }

    /// Offer a new measurement
    ///
    /// Returns the value to publish, or `None` if the reading is filtered
    /// out or carries no distance.
    pub fn offer(&mut self, measurement: Measurement) -> Option<PublishedValue> {
        let next = match measurement {
            Measurement::InsufficientData { .. } => return None,
            Measurement::NoTarget => {
                if self.last == PublishedValue::NoTarget {
                    return None;
                }
                PublishedValue::NoTarget
            }
            Measurement::Distance(mm) => {
                if let PublishedValue::Distance(last_mm) = self.last {
                    if mm.abs_diff(last_mm) < self.hysteresis_mm {
                        return None;
                    }
                }
                PublishedValue::Distance(mm)
            }
        };
        self.last = next;
        Some(next)
    }
}
