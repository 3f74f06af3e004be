//! Picks the "current" period out of a forecast document.

use crate::types::ForecastPeriod;

/// Period names that denote the nearest-term forecast.
pub const CURRENT_PERIOD_NAMES: [&str; 3] = ["Today", "This Afternoon", "Tonight"];

/// Returns the first period, in upstream (chronological) order, whose name is
/// one of [`CURRENT_PERIOD_NAMES`].
pub fn select_current(periods: &[ForecastPeriod]) -> Option<&ForecastPeriod> {
    periods
        .iter()
        .find(|p| CURRENT_PERIOD_NAMES.contains(&p.name.as_str()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::types::TemperatureUnit;

    fn period(name: &str, temperature: i64) -> ForecastPeriod {
        ForecastPeriod {
            name: name.to_string(),
            is_daytime: true,
            temperature,
            temperature_unit: TemperatureUnit::Fahrenheit,
            detailed_forecast: None,
        }
    }

    #[test]
    fn test_first_match_wins() {
        let periods = vec![
            period("Tonight", 50),
            period("Today", 70),
            period("This Afternoon", 72),
        ];
        assert_eq!(select_current(&periods).unwrap().temperature, 50);
    }

    #[test]
    fn test_skips_unrelated_periods() {
        let periods = vec![
            period("Overnight", 41),
            period("This Afternoon", 66),
            period("Tonight", 48),
        ];
        assert_eq!(select_current(&periods).unwrap().name, "This Afternoon");
    }

    #[test]
    fn test_none_when_no_current_name() {
        let periods = vec![period("Monday", 60), period("Monday Night", 45)];
        assert!(select_current(&periods).is_none());
        assert!(select_current(&[]).is_none());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let periods = vec![period("today", 60)];
        assert!(select_current(&periods).is_none());
    }
}
