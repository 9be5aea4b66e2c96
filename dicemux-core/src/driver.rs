//! Configuration and query API
//!
//! [`DiceDriver`] is the only surface the rest of the application uses.
//! It runs in the main context, writes the shared [`DieTable`] and owns
//! the roll session. Nothing here returns an error: out-of-range input is
//! clamped or ignored, matching what the interrupt can safely display.

use crate::config::calibration::{default_power_percent, percent_to_ticks, DEFAULT_POWER_TICKS};
use crate::config::{DiceSettings, DEFAULT_FLASH_PERIOD_MS, MAX_DICE, MAX_FACE};
use crate::dice::DieTable;
use crate::mux::flash_ticks_for;
use crate::roll::RollSession;

/// Main-context handle on the dice display
pub struct DiceDriver<'a> {
    table: &'a DieTable,
    roll: RollSession,
    flash_period_ms: u32,
}

impl<'a> DiceDriver<'a> {
    /// Take over a table and reset it to factory state
    ///
    /// All dice active and blank, calibrated power, no flashing.
    pub fn new(table: &'a DieTable) -> Self {
        let mut driver = Self {
            table,
            roll: RollSession::new(),
            flash_period_ms: DEFAULT_FLASH_PERIOD_MS,
        };
        table.set_test_pattern(None);
        table.set_active_count(MAX_DICE);
        for die in 0..MAX_DICE {
            table.set_value(die, 0);
            table.set_power(die, DEFAULT_POWER_TICKS[die]);
            table.set_flash(die, false);
        }
        driver.update_flash_ticks();
        driver
    }

    /// Apply start-up settings
    pub fn apply(&mut self, settings: &DiceSettings) {
        self.set_dice_count(settings.dice_count as usize);
        for (die, &percent) in settings.power_percent.iter().enumerate() {
            self.set_power(die, percent as i32);
        }
        self.set_flash(settings.flash.mask, settings.flash.period_ms);
    }

    /// The shared table
    pub fn table(&self) -> &'a DieTable {
        self.table
    }

    /// Set the number of dice in the sweep
    ///
    /// Counts outside `1..=MAX_DICE` are ignored. The flash rate is
    /// recomputed so its wall-clock period stays the same.
    pub fn set_dice_count(&mut self, count: usize) {
        if count == 0 || count > MAX_DICE {
            return;
        }
        self.table.set_active_count(count);
        self.update_flash_ticks();
    }

    pub fn dice_count(&self) -> usize {
        self.table.active_count()
    }

    /// Set a face value, clamped to 0 (blank) ..= 6
    pub fn set_value(&mut self, die: usize, value: i32) {
        self.table
            .set_value(die, value.clamp(0, MAX_FACE as i32) as u8);
    }

    pub fn value(&self, die: usize) -> u8 {
        self.table.value(die)
    }

    /// Set brightness in percent; see [`percent_to_ticks`] for clamping
    pub fn set_power(&mut self, die: usize, percent: i32) {
        self.table.set_power(die, percent_to_ticks(percent));
    }

    /// On time in ticks
    pub fn power(&self, die: usize) -> u16 {
        self.table.power(die)
    }

    /// Factory brightness for a die, in percent
    pub fn default_power(&self, die: usize) -> u8 {
        default_power_percent(die)
    }

    /// Choose which dice flash and, if `period_ms > 0`, how fast
    ///
    /// Bit `i` of `mask` enables flashing on die `i`. A zero period keeps
    /// the previous rate.
    pub fn set_flash(&mut self, mask: u8, period_ms: u32) {
        if period_ms > 0 {
            self.flash_period_ms = period_ms;
            self.update_flash_ticks();
        }
        for die in 0..MAX_DICE {
            self.table.set_flash(die, mask & (1 << die) != 0);
        }
    }

    pub fn flash(&self, die: usize) -> bool {
        self.table.flash(die)
    }

    /// Flash half-period in milliseconds
    pub fn flash_period_ms(&self) -> u32 {
        self.flash_period_ms
    }

    /// Sampled switch levels, bit `i` = die `i` (1 = line high, released)
    pub fn read_switches(&self) -> u8 {
        (0..MAX_DICE).fold(0, |bits, die| {
            if self.table.switch(die) {
                bits | (1 << die)
            } else {
                bits
            }
        })
    }

    /// Start rolling the dice in `mask`; an empty mask is ignored
    pub fn roll_start(&mut self, mask: u8, duration_ms: u32, interval_ms: u32, now_ms: u32) {
        self.roll.start(mask, duration_ms, interval_ms, now_ms);
    }

    /// Cancel a roll; values stay at whatever was last rolled
    pub fn roll_break(&mut self) {
        self.roll.stop();
    }

    /// Poll the roll; returns milliseconds left, 0 when finished or idle
    pub fn roll_process(&mut self, now_ms: u32) -> u32 {
        self.roll.process(now_ms, self.table)
    }

    pub fn roll_active(&self) -> bool {
        self.roll.is_active()
    }

    /// Diagnostic override
    ///
    /// `Some((die, value))` holds that die showing `value` (nothing if the
    /// value is not a face) and suspends the sweep. `None` resumes normal
    /// multiplexing from die 0. An out-of-range die also resumes.
    pub fn test_pattern(&mut self, pattern: Option<(usize, u8)>) {
        self.table.set_test_pattern(pattern);
    }

    fn update_flash_ticks(&mut self) {
        self.table.set_flash_ticks(flash_ticks_for(
            self.flash_period_ms,
            self.table.active_count(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_POWER, POWER_OFF};

    #[test]
    fn test_new_resets_table() {
        let table = DieTable::new();
        table.set_value(2, 5);
        table.set_active_count(1);
        let driver = DiceDriver::new(&table);

        assert_eq!(driver.dice_count(), MAX_DICE);
        assert_eq!(driver.value(2), 0);
        assert_eq!(driver.power(0), 200);
        assert_eq!(table.flash_ticks(), 100);
    }

    #[test]
    fn test_value_round_trip_and_clamp() {
        let table = DieTable::new();
        let mut driver = DiceDriver::new(&table);
        for v in 0..=6 {
            driver.set_value(1, v);
            assert_eq!(driver.value(1), v as u8);
        }
        driver.set_value(1, -1);
        assert_eq!(driver.value(1), 0);
        driver.set_value(1, 7);
        assert_eq!(driver.value(1), 6);
        driver.set_value(1, i32::MIN);
        assert_eq!(driver.value(1), 0);
    }

    #[test]
    fn test_dice_count_validation() {
        let table = DieTable::new();
        let mut driver = DiceDriver::new(&table);
        driver.set_dice_count(3);
        assert_eq!(driver.dice_count(), 3);
        driver.set_dice_count(0);
        assert_eq!(driver.dice_count(), 3);
        driver.set_dice_count(MAX_DICE + 1);
        assert_eq!(driver.dice_count(), 3);
        driver.set_dice_count(MAX_DICE);
        assert_eq!(driver.dice_count(), MAX_DICE);
    }

    #[test]
    fn test_flash_ticks_follow_count() {
        let table = DieTable::new();
        let mut driver = DiceDriver::new(&table);
        driver.set_flash(0b00100, 512);
        assert_eq!(table.flash_ticks(), 100);
        driver.set_dice_count(2);
        assert_eq!(table.flash_ticks(), 250);

        // Zero period keeps the rate, still updates the mask
        driver.set_flash(0b00001, 0);
        assert_eq!(driver.flash_period_ms(), 512);
        assert!(driver.flash(0));
        assert!(!driver.flash(2));
    }

    #[test]
    fn test_power_api() {
        let table = DieTable::new();
        let mut driver = DiceDriver::new(&table);
        driver.set_power(3, 5);
        assert_eq!(driver.power(3), POWER_OFF);
        driver.set_power(3, 150);
        assert_eq!(driver.power(3), MAX_POWER);
        assert_eq!(driver.default_power(3), 37);
    }

    #[test]
    fn test_read_switches_packs_bits() {
        let table = DieTable::new();
        let driver = DiceDriver::new(&table);
        table.set_switch(0, true);
        table.set_switch(3, true);
        assert_eq!(driver.read_switches(), 0b01001);
    }

    #[test]
    fn test_apply_settings() {
        let table = DieTable::new();
        let mut driver = DiceDriver::new(&table);
        let mut settings = DiceSettings::default();
        settings.dice_count = 2;
        settings.power_percent = [50, 0, 100, 62, 62];
        settings.flash.mask = 0b10;
        settings.flash.period_ms = 256;
        driver.apply(&settings);

        assert_eq!(driver.dice_count(), 2);
        assert_eq!(driver.power(0), 160);
        assert_eq!(driver.power(1), POWER_OFF);
        assert_eq!(driver.power(2), MAX_POWER);
        assert!(driver.flash(1));
        assert_eq!(table.flash_ticks(), 125);
    }

    #[test]
    fn test_break_stops_roll() {
        let table = DieTable::new();
        let mut driver = DiceDriver::new(&table);
        driver.roll_start(0b1, 1000, 100, 0);
        assert!(driver.roll_active());
        assert!(driver.roll_process(10) > 0);
        let before = driver.value(0);

        driver.roll_break();
        assert_eq!(driver.roll_process(500), 0);
        assert_eq!(driver.value(0), before);
        assert_eq!(driver.roll_process(600), 0);
    }

    #[test]
    fn test_pattern_forwarded() {
        let table = DieTable::new();
        let mut driver = DiceDriver::new(&table);
        driver.test_pattern(Some((1, 4)));
        assert_eq!(table.test_pattern(), Some((1, 4)));
        driver.test_pattern(None);
        assert_eq!(table.test_pattern(), None);
    }
}
