//! DTS6012M sensor component
//!
//! Glues the synchronizer, link monitor and publisher to the host
//! lifecycle. The host calls:
//!
//! - [`Dts6012m::reset`] at power-up (and whenever it wants a clean slate)
//! - [`Dts6012m::initialize`] once, after the sensor has settled
//! - [`Dts6012m::poll`] frequently, whenever bytes may be pending
//! - [`Dts6012m::update`] on a slow periodic tick
//! - [`Dts6012m::diagnostics`] for a read-only status dump
//!
//! The receive buffer and the link state are always touched together by
//! one call, so a host that drives `poll` and `update` from different tasks
//! must put the whole component behind a single lock.

use dts_hal::{Clock, UartRx, UartTx};
use dts_protocol::{FrameSynchronizer, Measurement, SyncEvent, SyncState, START_COMMAND};

use crate::config::{ConfigError, SensorConfig};
use crate::events::SensorEvent;
use crate::link::{LinkAction, LinkMonitor};
use crate::publisher::{MeasurementPublisher, PublishedValue};
use crate::traits::MeasurementSink;

/// Errors surfaced by the lifecycle hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError<E> {
    /// UART write or flush failed
    Transport(E),
}

/// Read-only status snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    /// Receive buffer size in bytes
    pub buffer_capacity: usize,
    /// Bytes waiting in the receive buffer
    pub buffered_bytes: usize,
    /// Synchronizer position
    pub sync_state: SyncState,
    /// Start command has been sent at least once
    pub link_started: bool,
    /// Inactivity timeout (ms)
    pub timeout_ms: u32,
    /// Publish hysteresis (mm)
    pub hysteresis_mm: u16,
    /// Start commands resent after timeouts
    pub retransmissions: u32,
    /// Last value handed to the consumer
    pub last_published: PublishedValue,
}

/// DTS6012M distance sensor on a UART
#[derive(Debug, Clone)]
pub struct Dts6012m {
    config: SensorConfig,
    sync: FrameSynchronizer,
    link: LinkMonitor,
    publisher: MeasurementPublisher,
}

impl Dts6012m {
    /// Create a component from a validated configuration
    pub fn new(config: SensorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            sync: FrameSynchronizer::new(),
            link: LinkMonitor::new(config.timeout_ms),
            publisher: MeasurementPublisher::new(config.hysteresis_mm),
        })
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Clear all decoder, link and publisher state
    ///
    /// Pending receive bytes are drained from the UART as well. Safe to call
    /// at any time and any number of times. Returns the number of bytes
    /// drained.
    pub fn reset<R: UartRx>(&mut self, rx: &mut R) -> usize {
        self.sync.reset();
        self.link.reset();
        self.publisher.reset();
        rx.drain()
    }

    /// Send the first start command
    pub fn initialize<U, C, F>(
        &mut self,
        uart: &mut U,
        clock: &C,
        on_event: &mut F,
    ) -> Result<(), SensorError<U::Error>>
    where
        U: UartTx + UartRx,
        C: Clock,
        F: FnMut(SensorEvent),
    {
        self.send_start_command(uart, clock, on_event)
    }

    /// Periodic tick: start the link or revive it after a timeout
    ///
    /// Returns the action the link monitor asked for. When the send fails
    /// the link state is left as it was, so the next tick tries again.
    pub fn update<U, C, F>(
        &mut self,
        uart: &mut U,
        clock: &C,
        on_event: &mut F,
    ) -> Result<LinkAction, SensorError<U::Error>>
    where
        U: UartTx + UartRx,
        C: Clock,
        F: FnMut(SensorEvent),
    {
        let action = self.link.check(clock.now_ms());
        match action {
            LinkAction::Idle => {}
            LinkAction::Start => self.send_start_command(uart, clock, on_event)?,
            LinkAction::Timeout { idle_ms } => {
                on_event(SensorEvent::LinkTimeout { idle_ms });
                self.send_start_command(uart, clock, on_event)?;
            }
        }
        Ok(action)
    }

    /// Byte tick: consume pending input, bounded by the per-tick budget
    ///
    /// Bytes beyond the budget stay in the UART for the next call. Returns
    /// the number of bytes consumed.
    pub fn poll<R, C, S, F>(
        &mut self,
        rx: &mut R,
        clock: &C,
        sink: &mut S,
        on_event: &mut F,
    ) -> usize
    where
        R: UartRx,
        C: Clock,
        S: MeasurementSink,
        F: FnMut(SensorEvent),
    {
        let Self {
            config,
            sync,
            link,
            publisher,
        } = self;

        let budget = config.max_bytes_per_tick as usize;
        let mut consumed = 0;

        while consumed < budget && rx.available() > 0 {
            let Some(byte) = rx.read_byte() else {
                break;
            };
            consumed += 1;

            sync.feed(byte, &mut |event| {
                on_event(SensorEvent::Sync(event));

                let SyncEvent::FrameDecoded(measurement) = event else {
                    return;
                };
                link.record_activity(clock.now_ms());

                match publisher.offer(measurement) {
                    Some(value) => {
                        if let Some(meters) = value.as_meters() {
                            sink.publish(meters);
                        }
                        on_event(SensorEvent::Published(value));
                    }
                    None => {
                        if !matches!(measurement, Measurement::InsufficientData { .. }) {
                            on_event(SensorEvent::Unchanged(measurement));
                        }
                    }
                }
            });
        }

        if consumed > 0 && config.activity_on_any_byte {
            link.record_activity(clock.now_ms());
        }

        consumed
    }

    /// Status snapshot
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            buffer_capacity: self.sync.buffer().capacity(),
            buffered_bytes: self.sync.buffer().len(),
            sync_state: self.sync.state(),
            link_started: self.link.is_started(),
            timeout_ms: self.link.timeout_ms(),
            hysteresis_mm: self.publisher.hysteresis_mm(),
            retransmissions: self.link.retransmissions(),
            last_published: self.publisher.last(),
        }
    }

    fn send_start_command<U, C, F>(
        &mut self,
        uart: &mut U,
        clock: &C,
        on_event: &mut F,
    ) -> Result<(), SensorError<U::Error>>
    where
        U: UartTx + UartRx,
        C: Clock,
        F: FnMut(SensorEvent),
    {
        let retransmission = self.link.is_started();

        // Stale input would otherwise be mistaken for the response
        uart.drain();
        uart.write_blocking(&START_COMMAND).map_err(SensorError::Transport)?;
        uart.flush().map_err(SensorError::Transport)?;

        self.link.record_send(clock.now_ms());
        on_event(SensorEvent::StartCommandSent { retransmission });
        Ok(())
    }
}
