//! Minimal TOML reader for `dice.toml`
//!
//! Handles only the subset the settings file uses, without allocating:
//!
//! - `[section]` headers
//! - `key = value` pairs (integer, quoted string)
//! - Flat integer arrays: `percent = [62, 62, 46]`
//! - Comments (`# ...`), including trailing ones
//!
//! Unknown keys are skipped. Unknown sections and malformed values are
//! errors.

use heapless::Vec;

use super::hardware::{DICE_MASK, MAX_DICE};
use super::settings::{DiceSettings, TimerSelect};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header (line number, 1-based)
    InvalidSection(u16),
    /// Line is not `key = value` (line number)
    InvalidLine(u16),
    /// Value has the wrong type or is out of range (line number)
    InvalidValue(u16),
    /// Array longer than the number of dice (line number)
    TooManyItems(u16),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Dice,
    Power,
    Flash,
    Roll,
    Switches,
}

/// Parse settings text, starting from [`DiceSettings::default`]
pub fn parse_settings(input: &str) -> Result<DiceSettings, ParseError> {
    let mut settings = DiceSettings::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = (index + 1).min(u16::MAX as usize) as u16;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection(line_no))?;
            section = parse_section_header(name.trim()).ok_or(ParseError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine(line_no))?;
        apply_value(&mut settings, section, key.trim(), value.trim(), line_no)?;
    }

    Ok(settings)
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name {
        "dice" => Some(Section::Dice),
        "power" => Some(Section::Power),
        "flash" => Some(Section::Flash),
        "roll" => Some(Section::Roll),
        "switches" => Some(Section::Switches),
        _ => None,
    }
}

fn apply_value(
    settings: &mut DiceSettings,
    section: Section,
    key: &str,
    value: &str,
    line: u16,
) -> Result<(), ParseError> {
    let invalid = ParseError::InvalidValue(line);

    match (section, key) {
        (Section::Dice, "count") => {
            let count = parse_int(value).ok_or(invalid)?;
            if count == 0 || count > MAX_DICE as u32 {
                return Err(invalid);
            }
            settings.dice_count = count as u8;
        }
        (Section::Dice, "timer") => {
            let name = parse_string(value).ok_or(invalid)?;
            settings.timer = TimerSelect::from_name(name).ok_or(invalid)?;
        }
        (Section::Power, "percent") => {
            let items = parse_int_list(value, line)?;
            for (slot, &percent) in settings.power_percent.iter_mut().zip(items.iter()) {
                if percent > 100 {
                    return Err(invalid);
                }
                *slot = percent as u8;
            }
        }
        (Section::Flash, "mask") => {
            let mask = parse_int(value).ok_or(invalid)?;
            if mask > DICE_MASK as u32 {
                return Err(invalid);
            }
            settings.flash.mask = mask as u8;
        }
        (Section::Flash, "period_ms") => {
            settings.flash.period_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::Roll, "duration_ms") => {
            settings.roll.duration_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::Roll, "interval_ms") => {
            settings.roll.interval_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::Switches, "poll_ms") => {
            let poll = parse_int(value).ok_or(invalid)?;
            if poll == 0 {
                return Err(invalid);
            }
            settings.switch_poll_ms = poll;
        }
        _ => {}
    }

    Ok(())
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_int(value: &str) -> Option<u32> {
    if let Some(hex) = value.strip_prefix("0x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = value.strip_prefix("0b") {
        u32::from_str_radix(bin, 2).ok()
    } else {
        value.parse().ok()
    }
}

fn parse_string(value: &str) -> Option<&str> {
    value.strip_prefix('"')?.strip_suffix('"')
}

fn parse_int_list(value: &str, line: u16) -> Result<Vec<u32, MAX_DICE>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue(line))?;

    let mut items = Vec::new();
    for item in inner.split(',') {
        let item = item.trim();
        // Allow a trailing comma
        if item.is_empty() {
            continue;
        }
        let n = parse_int(item).ok_or(ParseError::InvalidValue(line))?;
        items.push(n).map_err(|_| ParseError::TooManyItems(line))?;
    }
    Ok(items)
}
