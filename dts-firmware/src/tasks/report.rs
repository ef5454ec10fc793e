//! Distance report task
//!
//! Stands in for the application consumer: logs every value the sensor
//! component publishes.

use defmt::*;

use crate::channels::DISTANCE;

#[embassy_executor::task]
pub async fn report_task() {
    info!("Report task started");

    loop {
        let meters = DISTANCE.wait().await;
        if meters.is_nan() {
            info!("Distance: no target");
        } else {
            info!("Distance: {} m", meters);
        }
    }
}
