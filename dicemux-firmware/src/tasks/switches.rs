//! Switch task
//!
//! Polls the switch levels sampled by the multiplex interrupt and turns
//! a press on a die's button into a roll of that die.

use defmt::*;
use embassy_time::{Duration, Ticker};

use dicemux_core::SwitchMonitor;

use crate::channels::{with_driver, ROLL_REQUEST};

#[embassy_executor::task]
pub async fn switch_task(poll_ms: u32) {
    info!("Switch task started (poll every {} ms)", poll_ms);

    let mut ticker = Ticker::every(Duration::from_millis(poll_ms.max(1) as u64));
    let mut monitor = SwitchMonitor::new();

    loop {
        ticker.next().await;

        let Some((levels, count)) =
            with_driver(|driver| (driver.read_switches(), driver.dice_count())).await
        else {
            continue;
        };

        let pressed = monitor.update(levels, count);
        if pressed != 0 {
            info!("Switch pressed: {=u8:#b}", pressed);
            ROLL_REQUEST.signal(pressed);
        }
    }
}
