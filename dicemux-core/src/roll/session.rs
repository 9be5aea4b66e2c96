//! Roll session
//!
//! A roll re-randomizes a chosen set of dice at a fixed cadence for a
//! bounded time. It has no timer of its own: the host calls
//! [`RollSession::process`] from its loop with a monotonic millisecond
//! timestamp, so randomization latency is bounded by the polling cadence,
//! not by interrupt timing. The interrupt only ever reads die values.

use fastrand::Rng;

use crate::config::MAX_FACE;
use crate::dice::DieTable;

/// Countdown state of a roll
#[derive(Debug, Clone)]
pub struct RollSession {
    mask: u8,
    remaining_ms: i32,
    interval_ms: i32,
    interval_remaining_ms: i32,
    last_poll_ms: u32,
    rng: Rng,
}

impl Default for RollSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RollSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self {
            mask: 0,
            remaining_ms: 0,
            interval_ms: 0,
            interval_remaining_ms: 0,
            last_poll_ms: 0,
            rng: Rng::with_seed(0),
        }
    }

    /// Start (or restart) rolling the dice in `mask`
    ///
    /// An empty mask is ignored and leaves any running roll untouched.
    /// The random source is reseeded from `now_ms`. The first poll after
    /// any time has passed randomizes immediately.
    pub fn start(&mut self, mask: u8, duration_ms: u32, interval_ms: u32, now_ms: u32) {
        if mask == 0 {
            return;
        }
        self.mask = mask;
        self.remaining_ms = to_i32(duration_ms);
        self.interval_ms = to_i32(interval_ms);
        self.interval_remaining_ms = 0;
        self.last_poll_ms = now_ms;
        self.rng.seed(now_ms as u64);
    }

    /// End the roll at the next poll; die values are left as they are
    pub fn stop(&mut self) {
        self.remaining_ms = 0;
    }

    /// A roll is in progress
    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0
    }

    /// Dice selected by the last start
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Poll the roll
    ///
    /// Subtracts the time since the previous poll from both countdowns.
    /// When the interval countdown drops below zero the masked dice get new
    /// values and the interval is added back on top of the overshoot, so the
    /// cadence does not drift with the polling rate.
    ///
    /// Returns the milliseconds left, 0 once finished or when idle.
    pub fn process(&mut self, now_ms: u32, table: &DieTable) -> u32 {
        if self.remaining_ms <= 0 {
            return 0;
        }

        let elapsed = to_i32(now_ms.wrapping_sub(self.last_poll_ms));
        self.last_poll_ms = now_ms;
        self.remaining_ms -= elapsed;
        self.interval_remaining_ms = self.interval_remaining_ms.saturating_sub(elapsed);

        if self.interval_remaining_ms < 0 {
            self.interval_remaining_ms = self.interval_remaining_ms.saturating_add(self.interval_ms);
            self.randomize(table);
        }

        self.remaining_ms.max(0) as u32
    }

    fn randomize(&mut self, table: &DieTable) {
        for die in 0..table.active_count() {
            if self.mask & (1 << die) != 0 {
                table.set_value(die, self.rng.u8(1..=MAX_FACE));
            }
        }
    }
}

fn to_i32(ms: u32) -> i32 {
    ms.min(i32::MAX as u32) as i32
}
