/// Why a latitude or longitude could not be read.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateParseError {
    #[error("Invalid coordinate format")]
    Format,
    #[error("Out of range")]
    Range,
}

/// Degrees, minutes and seconds with a hemisphere letter, e.g. `48°01"21'N`.
pub struct LatLongFormat {
    pos_token: char,
    neg_token: char,
    max_degree: f64,
}

impl LatLongFormat {
    pub fn lat_format() -> Self {
        LatLongFormat {
            pos_token: 'N',
            neg_token: 'S',
            max_degree: 90.0,
        }
    }

    pub fn long_format() -> Self {
        LatLongFormat {
            pos_token: 'E',
            neg_token: 'W',
            max_degree: 180.0,
        }
    }

    /// Whole degrees, minutes and seconds of `value`, rounded to the nearest
    /// second.
    fn split_dms(value: f64) -> (u64, u64, u64) {
        let seconds = (value.abs() * 3600.0).round() as u64;
        (seconds / 3600, seconds / 60 % 60, seconds % 60)
    }

    pub fn format(&self, number: f64) -> String {
        if !number.is_finite() {
            return "-".to_string();
        }
        let (deg, min, sec) = Self::split_dms(number);
        let bearing = if number >= 0.0 {
            self.pos_token
        } else {
            self.neg_token
        };
        format!("{:02}\u{00b0}{:02}\"{:02}'{}", deg, min, sec, bearing)
    }

    /// Reads degrees with optional minutes and seconds. The sign comes from a
    /// trailing hemisphere letter or a leading minus, not both.
    pub fn parse(&self, source: &str) -> Result<f64, CoordinateParseError> {
        let mut work = source.trim();
        let mut sign = 1.0;
        let negated = work.starts_with('-');
        if negated {
            sign = -1.0;
            work = &work[1..];
        }
        if let Some(last) = work.chars().last() {
            let last = last.to_ascii_uppercase();
            if last == self.pos_token || last == self.neg_token {
                if negated {
                    return Err(CoordinateParseError::Format);
                }
                if last == self.neg_token {
                    sign = -1.0;
                }
                work = &work[..work.len() - 1];
            }
        }

        let tokens: Vec<&str> = work
            .split(|c: char| c.is_whitespace() || c == '\u{00b0}' || c == '"' || c == '\'')
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.is_empty() || tokens.len() > 3 {
            return Err(CoordinateParseError::Format);
        }

        let mut parts = [0.0; 3];
        for (part, token) in parts.iter_mut().zip(&tokens) {
            *part = match token.parse::<f64>() {
                Ok(n) if n.is_finite() && n >= 0.0 => n,
                _ => return Err(CoordinateParseError::Format),
            };
        }
        let [deg, min, sec] = parts;
        if min >= 60.0 || sec >= 60.0 {
            return Err(CoordinateParseError::Range);
        }
        let value = deg + min / 60.0 + sec / 3600.0;
        if value > self.max_degree {
            return Err(CoordinateParseError::Range);
        }
        Ok(value * sign)
    }
}

#[cfg(test)]
mod tests {
    use super::{CoordinateParseError, LatLongFormat};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fmt_lat() {
        let formatter = LatLongFormat::lat_format();
        assert_eq!(formatter.format(34.5), "34\u{00b0}30\"00'N");
        assert_eq!(formatter.format(0.0), "00\u{00b0}00\"00'N");
    }

    #[test]
    fn test_fmt_long() {
        let formatter = LatLongFormat::long_format();
        assert_eq!(formatter.format(34.5), "34\u{00b0}30\"00'E");
        assert_eq!(formatter.format(-7.25), "07\u{00b0}15\"00'W");
        assert_eq!(formatter.format(f64::NAN), "-");
    }

    #[test]
    fn test_fmt_seconds_carry() {
        let formatter = LatLongFormat::lat_format();
        assert_eq!(formatter.format(48.0 + 59.6 / 3600.0), "48\u{00b0}01\"00'N");
        assert_eq!(formatter.format(48.0 + 59.4 / 3600.0), "48\u{00b0}00\"59'N");
        assert_eq!(formatter.format(59.99999), "60\u{00b0}00\"00'N");
        assert_eq!(formatter.format(48.0225), "48\u{00b0}01\"21'N");
    }

    #[test]
    fn test_parse_lat() {
        let formatter = LatLongFormat::lat_format();
        assert_eq!(formatter.parse("34\u{00b0}30\"00'N").unwrap(), 34.5);
        assert_eq!(formatter.parse("34\u{00b0}30\"00'S").unwrap(), -34.5);
        assert!(close(formatter.parse("48 01 21N").unwrap(), 48.0225));
        assert_eq!(formatter.parse("34 30 00S").unwrap(), -34.5);
        assert_eq!(formatter.parse("48.5N").unwrap(), 48.5);
        assert_eq!(formatter.parse("48.5 s").unwrap(), -48.5);
    }

    #[test]
    fn test_parse_long() {
        let formatter = LatLongFormat::long_format();
        assert_eq!(formatter.parse("34\u{00b0}30\"00'E").unwrap(), 34.5);
        assert_eq!(formatter.parse("34\u{00b0}30\"00'W").unwrap(), -34.5);
        assert!(close(formatter.parse("7 49 57E").unwrap(), 7.8325));
        assert_eq!(formatter.parse("179 30").unwrap(), 179.5);
    }

    #[test]
    fn test_parse_leading_minus() {
        let formatter = LatLongFormat::lat_format();
        assert_eq!(formatter.parse("-34 30 00").unwrap(), -34.5);
        assert_eq!(formatter.parse(" -34\u{00b0}30\"").unwrap(), -34.5);
        assert_eq!(formatter.parse("-34 30 00S"), Err(CoordinateParseError::Format));
    }

    #[test]
    fn test_formatted_text_reads_back() {
        let formatter = LatLongFormat::long_format();
        let text = formatter.format(-7.8325);
        assert!(close(formatter.parse(&text).unwrap(), -7.8325));
    }

    #[test]
    fn test_parse_error() {
        let lat = LatLongFormat::lat_format();
        assert_eq!(lat.parse("134\u{00b0}30\"00'N"), Err(CoordinateParseError::Range));
        assert_eq!(lat.parse("90 00 01N"), Err(CoordinateParseError::Range));
        assert_eq!(lat.parse("48 60 00N"), Err(CoordinateParseError::Range));
        assert_eq!(lat.parse("48 01 21E"), Err(CoordinateParseError::Format));
        assert_eq!(lat.parse("48 01 21 5N"), Err(CoordinateParseError::Format));
        assert_eq!(lat.parse("N"), Err(CoordinateParseError::Format));
        assert_eq!(lat.parse(""), Err(CoordinateParseError::Format));
        assert_eq!(lat.parse("48 -1 21N"), Err(CoordinateParseError::Format));
    }
}
