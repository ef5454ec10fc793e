//! defmt presentation of sensor events and diagnostics

use defmt::*;

use dts_core::{Diagnostics, SensorEvent, Severity};

/// Log a sensor event at the level it asks for
pub fn log_event(event: SensorEvent) {
    match event.severity() {
        Severity::Trace => trace!("{}", event),
        Severity::Debug => debug!("{}", event),
        Severity::Info => info!("{}", event),
        Severity::Warn => warn!("{}", event),
        Severity::Error => error!("{}", event),
    }
}

/// Configuration dump, logged once at startup
pub fn log_diagnostics(diag: &Diagnostics) {
    info!("DTS6012M UART Sensor:");
    info!("  Buffer size: {} bytes", diag.buffer_capacity);
    info!("  Measurement started: {}", diag.link_started);
    info!("  Communication timeout: {} ms", diag.timeout_ms);
    info!("  Distance threshold: {} mm", diag.hysteresis_mm);
    debug!("  Sync state: {}", diag.sync_state);
}
