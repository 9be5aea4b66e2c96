//! Embedded settings loader
//!
//! Parses `dice.toml` with the core's no-alloc parser. build.rs has
//! already validated the file, so a failure here means the two parsers
//! disagree; the firmware still boots on defaults.

use defmt::*;

use dicemux_core::config::{parse_settings, DiceSettings};

/// Embedded start-up settings (edit dice.toml and rebuild to customize)
const EMBEDDED_SETTINGS: &str = include_str!("../../dice.toml");

/// Parse the embedded settings, falling back to defaults
pub fn load_settings() -> DiceSettings {
    match parse_settings(EMBEDDED_SETTINGS) {
        Ok(settings) => {
            info!(
                "Settings: {} dice, {} timer, flash mask {=u8:#b} every {} ms",
                settings.dice_count, settings.timer, settings.flash.mask, settings.flash.period_ms
            );
            settings
        }
        Err(e) => {
            warn!("Failed to parse dice.toml: {}", e);
            warn!("Using default settings");
            DiceSettings::default()
        }
    }
}
