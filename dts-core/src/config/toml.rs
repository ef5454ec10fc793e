//! Minimal TOML reader for `sensor.toml`
//!
//! Handles only the subset the sensor configuration uses. It does NOT
//! support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...), including trailing ones
//!
//! Keys that are absent keep their defaults.

use dts_hal::{DataBits, Parity, StopBits};

use super::{ConfigError, SensorConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Parsed fine but the sensor cannot run with it
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Uart,
    Link,
    Decoder,
}

/// Parse and validate a sensor configuration
pub fn parse_config(input: &str) -> Result<SensorConfig, ParseError> {
    let mut config = SensorConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply(&mut config, section, key, value)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    match name.trim() {
        "uart" => Ok(Section::Uart),
        "link" => Ok(Section::Link),
        "decoder" => Ok(Section::Decoder),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply(
    config: &mut SensorConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Uart, "baudrate") => config.uart.baudrate = parse_int(value)?,
        (Section::Uart, "data_bits") => {
            config.uart.data_bits = match parse_int::<u8>(value)? {
                7 => DataBits::Seven,
                8 => DataBits::Eight,
                9 => DataBits::Nine,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        (Section::Uart, "parity") => {
            config.uart.parity = match parse_string(value) {
                "none" => Parity::None,
                "even" => Parity::Even,
                "odd" => Parity::Odd,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        (Section::Uart, "stop_bits") => {
            config.uart.stop_bits = match parse_int::<u8>(value)? {
                1 => StopBits::One,
                2 => StopBits::Two,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        (Section::Link, "timeout_ms") => config.timeout_ms = parse_int(value)?,
        (Section::Link, "update_interval_ms") => config.update_interval_ms = parse_int(value)?,
        (Section::Link, "startup_delay_ms") => config.startup_delay_ms = parse_int(value)?,
        (Section::Link, "activity_on_any_byte") => {
            config.activity_on_any_byte = parse_bool(value)?
        }
        (Section::Decoder, "max_bytes_per_tick") => config.max_bytes_per_tick = parse_int(value)?,
        (Section::Decoder, "hysteresis_mm") => config.hysteresis_mm = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Strip surrounding quotes, if any
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    // TOML allows `_` as a digit separator
    let mut digits = [0u8; 20];
    let mut len = 0;
    for b in value.bytes().filter(|&b| b != b'_') {
        if len == digits.len() {
            return Err(ParseError::InvalidValue);
        }
        digits[len] = b;
        len += 1;
    }
    core::str::from_utf8(&digits[..len])
        .map_err(|_| ParseError::InvalidValue)?
        .parse()
        .map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
# DTS6012M on UART1

[uart]
baudrate = 9600
data_bits = 8
parity = "none"   # 8N1
stop_bits = 1

[link]
timeout_ms = 15_000
update_interval_ms = 5000
startup_delay_ms = 500
activity_on_any_byte = true

[decoder]
max_bytes_per_tick = 16
hysteresis_mm = 25
"#;

    #[test]
    fn test_full_config() {
        let config = parse_config(FULL).unwrap();
        assert_eq!(config.timeout_ms, 15_000);
        assert_eq!(config.update_interval_ms, 5_000);
        assert_eq!(config.startup_delay_ms, 500);
        assert!(config.activity_on_any_byte);
        assert_eq!(config.max_bytes_per_tick, 16);
        assert_eq!(config.hysteresis_mm, 25);
        assert_eq!(config.uart.parity, Parity::None);
    }

    #[test]
    fn test_empty_gives_defaults() {
        assert_eq!(parse_config(""), Ok(SensorConfig::default()));
        assert_eq!(
            parse_config("# nothing here\n\n"),
            Ok(SensorConfig::default())
        );
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config("[decoder]\nhysteresis_mm = 5\n").unwrap();
        assert_eq!(config.hysteresis_mm, 5);
        assert_eq!(config.timeout_ms, SensorConfig::default().timeout_ms);
    }

    #[test]
    fn test_unknown_section_and_key() {
        assert_eq!(
            parse_config("[motor]\nrpm = 5\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_config("[link]\nrpm = 5\n"),
            Err(ParseError::UnknownKey)
        );
        // Keys outside a section are not accepted
        assert_eq!(
            parse_config("timeout_ms = 5\n"),
            Err(ParseError::UnknownKey)
        );
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_config("[link]\ntimeout_ms = soon\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[link]\nactivity_on_any_byte = 1\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[uart]\nparity = \"mark\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[decoder]\nmax_bytes_per_tick = 70000\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_config("[link]\njunk\n"), Err(ParseError::InvalidLine));
    }

    #[test]
    fn test_validation_applied() {
        assert_eq!(
            parse_config("[uart]\nbaudrate = 115200\n"),
            Err(ParseError::Invalid(ConfigError::UnsupportedBaudRate(115_200)))
        );
        assert_eq!(
            parse_config("[decoder]\nmax_bytes_per_tick = 0\n"),
            Err(ParseError::Invalid(ConfigError::ZeroBytesPerTick))
        );
    }
}
