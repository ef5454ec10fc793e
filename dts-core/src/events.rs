//! Events reported by the sensor component
//!
//! The component never formats log output itself. It reports what happened
//! through these events and leaves presentation to the host.

use dts_protocol::{Measurement, SyncEvent};

use crate::publisher::PublishedValue;

/// How loudly an event deserves to be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Something the sensor component did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorEvent {
    /// Synchronizer step (resync or decoded frame)
    Sync(SyncEvent),
    /// Start command written and flushed
    StartCommandSent { retransmission: bool },
    /// No link activity for longer than the timeout
    LinkTimeout { idle_ms: u32 },
    /// Value handed to the consumer
    Published(PublishedValue),
    /// Reading decoded but filtered out by the hysteresis
    Unchanged(Measurement),
}

impl SensorEvent {
    /// Suggested log level
    pub fn severity(&self) -> Severity {
        match self {
            SensorEvent::Sync(sync) => match sync {
                SyncEvent::HeaderMismatch { .. } => Severity::Trace,
                SyncEvent::FrameDecoded(Measurement::InsufficientData { .. }) => Severity::Warn,
                SyncEvent::FrameDecoded(_) => Severity::Debug,
                SyncEvent::BufferOverflow { .. }
                | SyncEvent::OversizedPayloadField { .. }
                | SyncEvent::ChecksumMismatch { .. } => Severity::Warn,
                SyncEvent::FrameTooLargeForBuffer { .. } | SyncEvent::TooShortFrame { .. } => {
                    Severity::Error
                }
            },
            SensorEvent::StartCommandSent { .. } => Severity::Info,
            SensorEvent::LinkTimeout { .. } => Severity::Warn,
            SensorEvent::Published(_) => Severity::Info,
            SensorEvent::Unchanged(_) => Severity::Debug,
        }
    }

    /// True for events that indicate stream corruption
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            SensorEvent::Sync(
                SyncEvent::BufferOverflow { .. }
                    | SyncEvent::OversizedPayloadField { .. }
                    | SyncEvent::FrameTooLargeForBuffer { .. }
                    | SyncEvent::ChecksumMismatch { .. }
                    | SyncEvent::TooShortFrame { .. }
            )
        )
    }
}
