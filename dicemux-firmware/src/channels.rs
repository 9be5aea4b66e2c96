//! Inter-task communication
//!
//! The driver is shared between tasks behind an async mutex. It only
//! touches atomics in the die table, so holding it never blocks the
//! multiplex interrupt.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, ThreadModeRawMutex};
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use dicemux_core::DiceDriver;

/// Dice to roll (bit per die), raised by the switch task
pub static ROLL_REQUEST: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Main-context driver, installed once by `main`
pub static DRIVER: Mutex<ThreadModeRawMutex, Option<DiceDriver<'static>>> = Mutex::new(None);

/// Run `f` against the driver; `None` until it has been installed
pub async fn with_driver<R>(f: impl FnOnce(&mut DiceDriver<'static>) -> R) -> Option<R> {
    DRIVER.lock().await.as_mut().map(f)
}
