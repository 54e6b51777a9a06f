//! Simple TOML parser for display configuration
//!
//! Handles only the subset display.toml uses. It does NOT support the full
//! TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Comments (# ...)

use sm16188_core::config::{Brightness, TileGrid};

use super::FirmwareConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Key not known in its section
    UnknownKey,
    /// String longer than its buffer
    TooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Timing,
    Refresh,
    Scene,
}

/// Parse TOML configuration into FirmwareConfig
///
/// Missing keys keep their defaults.
pub fn parse_config(input: &str) -> Result<FirmwareConfig, ParseError> {
    let mut config = FirmwareConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(&mut config, section, key, value)?;
    }

    // Timing the driver would reject is a config error
    config.timing.validate().map_err(|_| ParseError::InvalidValue)?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "timing" => Ok(Section::Timing),
        "refresh" => Ok(Section::Refresh),
        "scene" => Ok(Section::Scene),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn apply_value(
    config: &mut FirmwareConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Display, "columns") => {
            config.display.grid = TileGrid::new(parse_int(value)?, config.display.grid.rows);
        }
        (Section::Display, "rows") => {
            config.display.grid = TileGrid::new(config.display.grid.columns, parse_int(value)?);
        }
        (Section::Display, "brightness") => {
            config.display.brightness = Brightness::new(parse_int(value)?);
        }
        (Section::Timing, "cell_us") => config.timing.cell_us = parse_int(value)?,
        (Section::Timing, "one_high_us") => config.timing.one_high_us = parse_int(value)?,
        (Section::Timing, "zero_high_us") => config.timing.zero_high_us = parse_int(value)?,
        (Section::Refresh, "interval_ms") => config.refresh_interval_ms = parse_int(value)?,
        (Section::Scene, "interval_ms") => config.scene.interval_ms = parse_int(value)?,
        (Section::Scene, "marquee") => {
            config.scene.marquee.clear();
            config
                .scene
                .marquee
                .push_str(parse_string(value))
                .map_err(|_| ParseError::TooLong)?;
        }
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("display"), Ok(Section::Display));
        assert_eq!(parse_section_header(" scene "), Ok(Section::Scene));
        assert_eq!(parse_section_header("panel"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("rows = 2"), Some(("rows", "2")));
        assert_eq!(parse_key_value("rows = 2 # tiles"), Some(("rows", "2")));
        assert_eq!(
            parse_key_value("marquee = \"a # b\""),
            Some(("marquee", "\"a # b\""))
        );
        assert_eq!(parse_key_value("rows ="), None);
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# demo
[display]
columns = 2
rows = 1
brightness = 20

[timing]
cell_us = 5
one_high_us = 4
zero_high_us = 1

[refresh]
interval_ms = 25

[scene]
marquee = "Hello"
interval_ms = 1000
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.display.grid, TileGrid::new(2, 1));
        // Brightness clamps rather than failing
        assert_eq!(config.display.brightness.get(), 15);
        assert_eq!(config.timing.cell_us, 5);
        assert_eq!(config.timing.one_high_us, 4);
        assert_eq!(config.timing.zero_high_us, 1);
        assert_eq!(config.refresh_interval_ms, 25);
        assert_eq!(config.scene.marquee.as_str(), "Hello");
        assert_eq!(config.scene.interval_ms, 1000);
    }

    #[test]
    fn test_defaults_for_missing_keys() {
        let config = parse_config("[display]\nrows = 2\n").unwrap();
        assert_eq!(config.display.grid, TileGrid::new(1, 2));
        assert_eq!(config.timing, sm16188_driver::BitTiming::DEFAULT);
        assert_eq!(config.scene, super::super::SceneConfig::default());
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[display]\nfoo = 1"), Err(ParseError::UnknownKey));
        assert_eq!(parse_config("[display]\nrows = x"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[display]\nrows"), Err(ParseError::InvalidLine));
        assert_eq!(parse_config("columns = 1"), Err(ParseError::UnknownKey));
        assert_eq!(
            parse_config("[timing]\none_high_us = 9"),
            Err(ParseError::InvalidValue)
        );
    }
}
