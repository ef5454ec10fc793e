//! Board-agnostic core logic for the DTS6012M distance sensor
//!
//! This crate contains everything between the UART and the consumer of
//! distance readings that does not depend on a specific board:
//!
//! - Link liveness monitoring and start-command retransmission
//! - Change-filtered publishing of measurements
//! - The [`Dts6012m`] component exposing the host lifecycle hooks
//! - Typed events describing what the decoder did
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod events;
pub mod link;
pub mod publisher;
pub mod sensor;
pub mod traits;

pub use config::{parse_config, ConfigError, ParseError, SensorConfig};
pub use events::{SensorEvent, Severity};
pub use link::{LinkAction, LinkMonitor};
pub use publisher::{MeasurementPublisher, PublishedValue};
pub use sensor::{Diagnostics, Dts6012m, SensorError};
pub use traits::MeasurementSink;
