//! UART and clock adapters for the sensor component
//!
//! The RP2040 buffered UART is read asynchronously by the sensor task.
//! Bytes it returns are parked in a small queue, which is what the sensor
//! component sees as its receive side; the transmit side writes straight to
//! the peripheral and blocks until the FIFO has drained.

use defmt::*;
use embassy_rp::uart::{BufferedUartTx, Error as UartError};
use embassy_time::Instant;
use embedded_io::Write;
use heapless::Deque;

use dts_hal::{Clock, UartRx, UartTx};

/// Receive queue depth
pub const RX_QUEUE_SIZE: usize = 256;

/// Sensor-facing view of the UART
pub struct SensorUart {
    tx: BufferedUartTx,
    pending: Deque<u8, RX_QUEUE_SIZE>,
    dropped: u32,
}

impl SensorUart {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self {
            tx,
            pending: Deque::new(),
            dropped: 0,
        }
    }

    /// Queue bytes read from the peripheral
    ///
    /// Bytes that do not fit are dropped; the decoder resynchronizes on its
    /// own, so losing input only costs the frame in flight.
    pub fn enqueue(&mut self, bytes: &[u8]) {
        let mut lost = 0u32;
        for &byte in bytes {
            if self.pending.push_back(byte).is_err() {
                lost += 1;
            }
        }
        if lost > 0 {
            self.dropped = self.dropped.saturating_add(lost);
            warn!("RX queue full, dropped {} bytes ({} total)", lost, self.dropped);
        }
    }
}

impl UartTx for SensorUart {
    type Error = UartError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError> {
        self.tx.write_all(data)
    }

    fn flush(&mut self) -> Result<(), UartError> {
        Write::flush(&mut self.tx)
    }
}

impl UartRx for SensorUart {
    fn available(&mut self) -> usize {
        self.pending.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.pending.pop_front()
    }
}

/// Embassy time driver as a millisecond clock
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping u32 clock the link monitor expects
        Instant::now().as_millis() as u32
    }
}
