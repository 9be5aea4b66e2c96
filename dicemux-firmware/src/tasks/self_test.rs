//! Start-up self test
//!
//! Steps every die through faces 1 to 6 on the diagnostic hold, then
//! hands the display back to normal multiplexing.

use defmt::*;
use embassy_time::Timer;

use dicemux_core::config::MAX_FACE;

use crate::channels::with_driver;

/// Time each face is held
pub const SELF_TEST_STEP_MS: u64 = 80;

pub async fn self_test() {
    let count = with_driver(|driver| driver.dice_count()).await.unwrap_or(0);
    info!("Self test on {} dice", count);

    for die in 0..count {
        for face in 1..=MAX_FACE {
            with_driver(|driver| driver.test_pattern(Some((die, face)))).await;
            Timer::after_millis(SELF_TEST_STEP_MS).await;
        }
    }

    with_driver(|driver| driver.test_pattern(None)).await;
    info!("Self test done");
}
