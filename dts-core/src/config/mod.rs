//! Sensor configuration
//!
//! Defaults reproduce the stock DTS6012M setup. The firmware overrides
//! them from its embedded `sensor.toml`.

pub mod toml;

pub use toml::{parse_config, ParseError};

use dts_hal::{DataBits, Parity, StopBits, UartConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Link considered dead after this long without activity
pub const COMMUNICATION_TIMEOUT_MS: u32 = 10_000;

/// Minimum distance change that triggers a new publish
pub const DISTANCE_CHANGE_THRESHOLD_MM: u16 = 10;

/// Bytes consumed per byte tick before yielding
pub const MAX_BYTES_PER_TICK: u16 = 32;

/// Periodic tick interval for the link monitor
pub const DEFAULT_UPDATE_INTERVAL_MS: u32 = 60_000;

/// Settling time between power-up reset and the first start command
pub const DEFAULT_STARTUP_DELAY_MS: u32 = 1_000;

/// The only baud rate the sensor speaks
pub const SENSOR_BAUDRATE: u32 = 9600;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sensor requires 9600 baud
    UnsupportedBaudRate(u32),
    /// Sensor requires 8 data bits, no parity, 1 stop bit
    UnsupportedFraming,
    /// Byte tick would never consume input
    ZeroBytesPerTick,
    /// Link timeout must be non-zero
    ZeroTimeout,
    /// Update tick interval must be non-zero
    ZeroUpdateInterval,
}

/// DTS6012M sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Serial line settings
    pub uart: UartConfig,
    /// Inactivity timeout before the start command is resent (ms)
    pub timeout_ms: u32,
    /// Publish hysteresis (mm)
    pub hysteresis_mm: u16,
    /// Byte tick budget
    pub max_bytes_per_tick: u16,
    /// Link monitor tick interval (ms)
    pub update_interval_ms: u32,
    /// Delay between reset and the first start command (ms)
    pub startup_delay_ms: u32,
    /// Count any received byte as link activity, not only decoded frames
    pub activity_on_any_byte: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            uart: UartConfig::default(),
            timeout_ms: COMMUNICATION_TIMEOUT_MS,
            hysteresis_mm: DISTANCE_CHANGE_THRESHOLD_MM,
            max_bytes_per_tick: MAX_BYTES_PER_TICK,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            startup_delay_ms: DEFAULT_STARTUP_DELAY_MS,
            activity_on_any_byte: false,
        }
    }
}

impl SensorConfig {
    /// Check the configuration against what the sensor supports
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uart.baudrate != SENSOR_BAUDRATE {
            return Err(ConfigError::UnsupportedBaudRate(self.uart.baudrate));
        }
        if self.uart.data_bits != DataBits::Eight
            || self.uart.parity != Parity::None
            || self.uart.stop_bits != StopBits::One
        {
            return Err(ConfigError::UnsupportedFraming);
        }
        if self.max_bytes_per_tick == 0 {
            return Err(ConfigError::ZeroBytesPerTick);
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.update_interval_ms == 0 {
            return Err(ConfigError::ZeroUpdateInterval);
        }
        Ok(())
    }
}
