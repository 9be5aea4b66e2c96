//! Multiplex timer backends
//!
//! Two ways to raise the multiplex interrupt, selectable at start-up:
//!
//! - [`AlarmTimer`]: TIMER alarm 1 against the free-running 1 MHz counter.
//!   Deadlines accumulate from the previous deadline, not from when the
//!   handler ran, so the sweep does not drift with interrupt latency.
//!   Alarm 0 belongs to the embassy time driver.
//! - [`SysTickTimer`]: the core SysTick counting down from a reload value
//!   set on every interrupt. Latency adds up, but it needs no peripheral.
//!
//! A mux tick is 3.2 µs, i.e. 16/5 of a TIMER microsecond or 400 cycles
//! at the default 125 MHz system clock.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use dicemux_core::config::TICK_NS;
use dicemux_hal::MuxTimer;
use embassy_rp::pac::TIMER;

/// TIMER alarm used for the multiplex interrupt (raises `TIMER_IRQ_1`)
pub const MUX_ALARM: usize = 1;

/// Closest an alarm may be set to the current time
pub const MIN_LEAD_US: u32 = 2;

/// SysTick reload register width
const SYST_MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Convert mux ticks to whole microseconds, carrying the fraction
///
/// Returns `(us, residue)`; feed the residue into the next call so that
/// five ticks always add up to exactly 16 µs.
pub const fn ticks_to_us(ticks: u16, residue: u32) -> (u32, u32) {
    let fifths = ticks as u32 * 16 + residue;
    (fifths / 5, fifths % 5)
}

/// Next alarm deadline `us` after `previous`
///
/// If that is already (nearly) past `now`, the schedule is re-based on
/// `now` rather than firing a burst of catch-up interrupts. Works across
/// counter wraparound.
pub fn next_deadline(previous: u32, us: u32, now: u32) -> u32 {
    let target = previous.wrapping_add(us);
    if (target.wrapping_sub(now) as i32) < MIN_LEAD_US as i32 {
        now.wrapping_add(us.max(MIN_LEAD_US))
    } else {
        target
    }
}

/// SysTick reload value for `ticks` mux ticks
pub const fn systick_reload(ticks: u16, core_hz: u32) -> u32 {
    let cycles = ticks as u64 * core_hz as u64 * TICK_NS as u64 / 1_000_000_000;
    if cycles == 0 {
        0
    } else if cycles > SYST_MAX_RELOAD as u64 + 1 {
        SYST_MAX_RELOAD
    } else {
        cycles as u32 - 1
    }
}

/// Free-running alarm backend
pub struct AlarmTimer {
    deadline: Option<u32>,
    residue: u32,
}

impl AlarmTimer {
    /// Enable the alarm interrupt at the TIMER block
    ///
    /// The NVIC line (`TIMER_IRQ_1`) is unmasked by the caller once the
    /// handler's state is in place.
    pub fn new() -> Self {
        TIMER.intr().write(|w| w.set_alarm(MUX_ALARM, true));
        TIMER.inte().modify(|w| w.set_alarm(MUX_ALARM, true));
        Self {
            deadline: None,
            residue: 0,
        }
    }

    fn now() -> u32 {
        TIMER.timerawl().read()
    }
}

impl Default for AlarmTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl MuxTimer for AlarmTimer {
    fn schedule(&mut self, ticks: u16) {
        TIMER.intr().write(|w| w.set_alarm(MUX_ALARM, true));

        let now = Self::now();
        let (us, residue) = ticks_to_us(ticks, self.residue);
        self.residue = residue;
        let deadline = next_deadline(self.deadline.unwrap_or(now), us, now);
        self.deadline = Some(deadline);

        // Writing the alarm register arms it
        TIMER.alarm(MUX_ALARM).write_value(deadline);
    }
}

/// One-shot SysTick backend
pub struct SysTickTimer {
    syst: SYST,
    core_hz: u32,
}

impl SysTickTimer {
    /// Take SysTick over, clocked from the core
    pub fn new(mut syst: SYST, core_hz: u32) -> Self {
        syst.disable_counter();
        syst.set_clock_source(SystClkSource::Core);
        syst.enable_interrupt();
        Self { syst, core_hz }
    }
}

impl MuxTimer for SysTickTimer {
    fn schedule(&mut self, ticks: u16) {
        self.syst.disable_counter();
        self.syst.set_reload(systick_reload(ticks, self.core_hz));
        self.syst.clear_current();
        self.syst.enable_counter();
    }
}

/// Backend chosen at start-up
pub enum MuxTimerBackend {
    Alarm(AlarmTimer),
    SysTick(SysTickTimer),
}

impl MuxTimer for MuxTimerBackend {
    fn schedule(&mut self, ticks: u16) {
        match self {
            Self::Alarm(timer) => timer.schedule(ticks),
            Self::SysTick(timer) => timer.schedule(ticks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mux_period_is_1024_us() {
        assert_eq!(ticks_to_us(320, 0), (1024, 0));
        assert_eq!(ticks_to_us(160, 0), (512, 0));
    }

    #[test]
    fn test_residue_carries() {
        let mut residue = 0;
        let mut total = 0;
        for _ in 0..5 {
            let (us, r) = ticks_to_us(1, residue);
            residue = r;
            total += us;
        }
        assert_eq!(total, 16);
        assert_eq!(residue, 0);
    }

    #[test]
    fn test_uneven_slot_sums_to_period() {
        // 200 + 120 ticks is one slot
        let (on, r) = ticks_to_us(200, 0);
        let (off, r) = ticks_to_us(120, r);
        assert_eq!(on + off, 1024);
        assert_eq!(r, 0);
    }

    #[test]
    fn test_deadline_accumulates() {
        // Handler ran late but the deadline is still ahead
        assert_eq!(next_deadline(1000, 640, 1100), 1640);
    }

    #[test]
    fn test_deadline_rebases_when_late() {
        assert_eq!(next_deadline(1000, 64, 1100), 1164);
        assert_eq!(next_deadline(1000, 100, 1099), 1199);
    }

    #[test]
    fn test_deadline_wraps() {
        assert_eq!(next_deadline(u32::MAX - 10, 100, u32::MAX - 5), 89);
    }

    #[test]
    fn test_systick_reload() {
        assert_eq!(systick_reload(1, 125_000_000), 399);
        assert_eq!(systick_reload(320, 125_000_000), 127_999);
        assert_eq!(systick_reload(0, 125_000_000), 0);
        assert_eq!(systick_reload(u16::MAX, 125_000_000), SYST_MAX_RELOAD);
    }
}
