//! Start-up settings
//!
//! Everything the host applies through the driver API at boot. Nothing is
//! persisted; the firmware builds these from its embedded `dice.toml` or
//! falls back to [`DiceSettings::default`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::calibration::default_power_percent;
use super::hardware::MAX_DICE;

/// Default flash half-period; gives a 100-sweep counter with five dice
pub const DEFAULT_FLASH_PERIOD_MS: u32 = 512;

/// Default roll length
pub const DEFAULT_ROLL_DURATION_MS: u32 = 1500;

/// Default time between re-randomizations during a roll
pub const DEFAULT_ROLL_INTERVAL_MS: u32 = 80;

/// Default switch polling interval for the host loop
pub const DEFAULT_SWITCH_POLL_MS: u32 = 20;

/// Hardware timer backend driving the multiplex interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimerSelect {
    /// Free-running counter with an absolute compare deadline
    #[default]
    FreeRunning,
    /// Dedicated countdown timer reloaded on every interrupt
    OneShot,
}

impl TimerSelect {
    /// Parse the config spelling (`"free_running"` / `"one_shot"`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "free_running" => Some(Self::FreeRunning),
            "one_shot" => Some(Self::OneShot),
            _ => None,
        }
    }
}

/// Roll animation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RollConfig {
    /// Total roll length in milliseconds
    pub duration_ms: u32,
    /// Re-randomize interval in milliseconds
    pub interval_ms: u32,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_ROLL_DURATION_MS,
            interval_ms: DEFAULT_ROLL_INTERVAL_MS,
        }
    }
}

/// Flash parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlashConfig {
    /// Dice that flash (bit per die)
    pub mask: u8,
    /// Time spent in each of the on and off halves, in milliseconds
    pub period_ms: u32,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            mask: 0,
            period_ms: DEFAULT_FLASH_PERIOD_MS,
        }
    }
}

/// Complete start-up settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiceSettings {
    /// Number of dice fitted (1..=MAX_DICE)
    pub dice_count: u8,
    /// Interrupt timer backend
    pub timer: TimerSelect,
    /// Brightness per die in percent
    pub power_percent: [u8; MAX_DICE],
    /// Flash setup
    pub flash: FlashConfig,
    /// Roll animation started by a button press
    pub roll: RollConfig,
    /// Switch polling interval in milliseconds
    pub switch_poll_ms: u32,
}

impl Default for DiceSettings {
    fn default() -> Self {
        let mut power_percent = [0; MAX_DICE];
        for (die, percent) in power_percent.iter_mut().enumerate() {
            *percent = default_power_percent(die);
        }
        Self {
            dice_count: MAX_DICE as u8,
            timer: TimerSelect::default(),
            power_percent,
            flash: FlashConfig::default(),
            roll: RollConfig::default(),
            switch_poll_ms: DEFAULT_SWITCH_POLL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_calibration() {
        let settings = DiceSettings::default();
        assert_eq!(settings.dice_count, 5);
        assert_eq!(settings.power_percent, [62, 62, 46, 37, 46]);
        assert_eq!(settings.timer, TimerSelect::FreeRunning);
        assert_eq!(settings.flash.mask, 0);
    }

    #[test]
    fn test_timer_names() {
        assert_eq!(
            TimerSelect::from_name("free_running"),
            Some(TimerSelect::FreeRunning)
        );
        assert_eq!(TimerSelect::from_name("one_shot"), Some(TimerSelect::OneShot));
        assert_eq!(TimerSelect::from_name("systick"), None);
    }
}
