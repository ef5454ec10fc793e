//! DTS6012M sensor task
//!
//! Owns the sensor component and both halves of the UART. Receiving and the
//! periodic link check share one task, so the decoder state never needs a
//! lock: the task waits for whichever comes first, bytes or the update tick.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_futures::yield_now;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::{Duration, Ticker, Timer};
use embedded_io_async::Read;

use dts_core::{Dts6012m, LinkAction, SensorEvent};
use dts_hal::UartRx;

use crate::channels::DistanceSignal;
use crate::logging::{log_diagnostics, log_event};
use crate::transport::{EmbassyClock, SensorUart};

/// Bytes taken from the peripheral per read
const RX_CHUNK_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn sensor_task(mut sensor: Dts6012m, tx: BufferedUartTx, mut rx: BufferedUartRx) {
    info!("Sensor task started");

    let config = *sensor.config();
    let clock = EmbassyClock;
    let mut uart = SensorUart::new(tx);
    let mut sink = DistanceSignal;
    let mut on_event = |event: SensorEvent| log_event(event);

    let stale = sensor.reset(&mut uart);
    if stale > 0 {
        debug!("Discarded {} stale bytes", stale);
    }

    // The sensor ignores commands until it has finished booting
    Timer::after_millis(config.startup_delay_ms as u64).await;

    if let Err(e) = sensor.initialize(&mut uart, &clock, &mut on_event) {
        warn!("Start command failed: {:?}", e);
    }
    log_diagnostics(&sensor.diagnostics());

    let mut ticker = Ticker::every(Duration::from_millis(config.update_interval_ms as u64));
    let mut buf = [0u8; RX_CHUNK_SIZE];

    loop {
        // Work through queued input one budget at a time
        while uart.available() > 0 {
            sensor.poll(&mut uart, &clock, &mut sink, &mut on_event);
            yield_now().await;
        }

        match select(rx.read(&mut buf), ticker.next()).await {
            Either::First(Ok(n)) => {
                trace!("RX: {} bytes", n);
                uart.enqueue(&buf[..n]);
            }
            Either::First(Err(e)) => {
                warn!("UART read error: {:?}", e);
            }
            Either::Second(()) => match sensor.update(&mut uart, &clock, &mut on_event) {
                Ok(LinkAction::Idle) => trace!("Link healthy"),
                Ok(action) => debug!("Link action: {}", action),
                Err(e) => warn!("Start command failed: {:?}", e),
            },
        }
    }
}
