// Number handling for 10-K summary cells, which use ',' as the thousands separator.
pub mod number_format {
    use anyhow::{anyhow, Result};
    use std::str::FromStr;

    pub const THOUSANDS_SEPARATOR: char = ',';

    // Parses decimals like "1,234.5" or " 72738 " into f64
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim().replace(THOUSANDS_SEPARATOR, "");

        let value = f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))?;
        if !value.is_finite() {
            return Err(anyhow!("Decimal '{}' is not a finite number", s));
        }
        Ok(value)
    }

    /// Lenient variant of [`parse_decimal`]: anything unparseable is missing.
    pub fn coerce_decimal(s: &str) -> Option<f64> {
        parse_decimal(s).ok()
    }

    // Accepts "2022" as well as float-formatted years such as "2022.0".
    pub fn parse_year(s: &str) -> Result<i32> {
        let normalized = s.trim().replace(THOUSANDS_SEPARATOR, "");
        if let Ok(year) = i32::from_str(&normalized) {
            return Ok(year);
        }

        let value = f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse year '{}': {}", s, e))?;
        let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
        if value.is_finite() && value.fract() == 0.0 && in_range {
            Ok(value as i32)
        } else {
            Err(anyhow!("Year '{}' is not a whole number", s))
        }
    }

    /// Percentage change from `previous` to `current`.
    /// Missing on either side, or a zero base, gives a missing result.
    pub fn pct_change(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
        match (previous, current) {
            (Some(prev), Some(cur)) if prev != 0.0 => Some((cur / prev - 1.0) * 100.0),
            _ => None,
        }
    }

}
