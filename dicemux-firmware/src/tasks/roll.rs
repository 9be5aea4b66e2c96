//! Roll task
//!
//! Waits for roll requests and polls the roll session until it finishes.
//! A new request while rolling restarts the roll with the new dice.

use defmt::*;
use embassy_time::{Duration, Ticker};

use dicemux_core::config::{RollConfig, MAX_DICE};

use super::now_ms;
use crate::channels::{with_driver, ROLL_REQUEST};

/// Roll polling interval in milliseconds
pub const ROLL_POLL_MS: u64 = 10;

#[embassy_executor::task]
pub async fn roll_task(config: RollConfig) {
    info!(
        "Roll task started ({} ms, new faces every {} ms)",
        config.duration_ms, config.interval_ms
    );

    let mut mask = ROLL_REQUEST.wait().await;
    loop {
        info!("Rolling dice {=u8:#b}", mask);
        with_driver(|driver| {
            driver.roll_start(mask, config.duration_ms, config.interval_ms, now_ms())
        })
        .await;

        let mut ticker = Ticker::every(Duration::from_millis(ROLL_POLL_MS));
        let restart = loop {
            ticker.next().await;
            if let Some(next) = ROLL_REQUEST.try_take() {
                break Some(next);
            }
            let left = with_driver(|driver| driver.roll_process(now_ms())).await;
            if left.unwrap_or(0) == 0 {
                break None;
            }
        };

        mask = match restart {
            Some(next) => {
                debug!("Roll restarted");
                next
            }
            None => {
                with_driver(|driver| {
                    for die in (0..MAX_DICE).filter(|die| mask & (1 << die) != 0) {
                        info!("Die {} shows {}", die, driver.value(die));
                    }
                })
                .await;
                ROLL_REQUEST.wait().await
            }
        };
    }
}
