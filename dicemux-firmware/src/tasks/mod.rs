//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod roll;
pub mod self_test;
pub mod switches;

pub use roll::roll_task;
pub use self_test::self_test;
pub use switches::switch_task;

use embassy_time::Instant;

/// Millisecond timestamp for the driver API (wraps after ~49 days)
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}
