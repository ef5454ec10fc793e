//! DTS6012M - Distance Sensor Firmware
//!
//! RP2040 host for the DTS6012M streaming decoder. The sensor is wired to
//! UART0 (GPIO0 = TX, GPIO1 = RX) and every published distance is logged
//! over RTT.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{
    BufferedInterruptHandler, Config as RpUartConfig, DataBits as RpDataBits,
    Parity as RpParity, StopBits as RpStopBits, Uart,
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use dts_core::{parse_config, Dts6012m, SensorConfig};
use dts_hal::{DataBits, Parity, StopBits, UartConfig};

mod channels;
mod logging;
mod tasks;
mod transport;

/// Embedded sensor configuration (compiled into firmware)
/// Edit sensor.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../sensor.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("DTS6012M firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let sensor = build_sensor();
    let config = *sensor.config();
    info!(
        "Sensor config: timeout={}ms, threshold={}mm, update={}ms",
        config.timeout_ms, config.hysteresis_mm, config.update_interval_ms
    );

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, rp_uart_config(&config.uart));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.uart.baudrate);

    spawner.spawn(tasks::sensor_task(sensor, tx, rx)).unwrap();
    spawner.spawn(tasks::report_task()).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded config, falling back to defaults when it is unusable
fn build_sensor() -> Dts6012m {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("Embedded config rejected ({:?}), using defaults", e);
            SensorConfig::default()
        }
    };

    match Dts6012m::new(config) {
        Ok(sensor) => sensor,
        Err(e) => {
            warn!("Sensor config invalid ({:?}), using defaults", e);
            unwrap!(Dts6012m::new(SensorConfig::default()))
        }
    }
}

/// Translate the board-agnostic UART settings for the RP2040 driver
fn rp_uart_config(uart: &UartConfig) -> RpUartConfig {
    let mut config = RpUartConfig::default();
    config.baudrate = uart.baudrate;
    config.data_bits = match uart.data_bits {
        DataBits::Seven => RpDataBits::DataBits7,
        DataBits::Eight | DataBits::Nine => RpDataBits::DataBits8,
    };
    config.parity = match uart.parity {
        Parity::None => RpParity::ParityNone,
        Parity::Even => RpParity::ParityEven,
        Parity::Odd => RpParity::ParityOdd,
    };
    config.stop_bits = match uart.stop_bits {
        StopBits::One => RpStopBits::STOP1,
        StopBits::Two => RpStopBits::STOP2,
    };
    config
}
