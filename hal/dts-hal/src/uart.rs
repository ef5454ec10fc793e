//! UART serial communication abstractions
//!
//! The decoder drives the receiver from a cooperative tick, so reads are
//! non-blocking: the caller asks how much is buffered and pulls single
//! bytes. Writes block until the data has left the peripheral.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been queued or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until all queued data has been physically transmitted
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Number of received bytes ready to be read without blocking
    fn available(&mut self) -> usize;

    /// Read one buffered byte, or `None` if nothing is pending
    fn read_byte(&mut self) -> Option<u8>;

    /// Discard everything currently buffered
    ///
    /// Returns the number of bytes dropped.
    fn drain(&mut self) -> usize {
        let mut dropped = 0;
        while self.available() > 0 {
            if self.read_byte().is_none() {
                break;
            }
            dropped += 1;
        }
        dropped
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    /// The DTS6012M line settings: 9600 baud, 8N1
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pending(usize);

    impl UartRx for Pending {
        fn available(&mut self) -> usize {
            self.0
        }

        fn read_byte(&mut self) -> Option<u8> {
            self.0 = self.0.checked_sub(1)?;
            Some(0xA5)
        }
    }

    #[test]
    fn test_drain_counts_bytes() {
        let mut rx = Pending(7);
        assert_eq!(rx.drain(), 7);
        assert_eq!(rx.available(), 0);
        assert_eq!(rx.drain(), 0);
    }

    #[test]
    fn test_default_line_settings() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }
}
