/*
 * culture.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Cultures used for parsing and formatting field values.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// A supported culture.
///
/// A culture supplies number separators, currency and percent layout, the
/// patterns behind single-letter date formats, day/month ordering for free
/// date parsing, and the locale for month and day names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Culture {
    #[default]
    EnUs,
    EnGb,
    NlBe,
    FrBe,
    DeDe,
}

impl Culture {
    pub const ALL: [Culture; 5] = [
        Culture::EnUs,
        Culture::EnGb,
        Culture::NlBe,
        Culture::FrBe,
        Culture::DeDe,
    ];

    /// The culture identifier, e.g. `nl-BE`.
    pub fn identifier(self) -> &'static str {
        match self {
            Culture::EnUs => "en-US",
            Culture::EnGb => "en-GB",
            Culture::NlBe => "nl-BE",
            Culture::FrBe => "fr-BE",
            Culture::DeDe => "de-DE",
        }
    }

    pub fn chrono_locale(self) -> chrono::Locale {
        match self {
            Culture::EnUs => chrono::Locale::en_US,
            Culture::EnGb => chrono::Locale::en_GB,
            Culture::NlBe => chrono::Locale::nl_BE,
            Culture::FrBe => chrono::Locale::fr_BE,
            Culture::DeDe => chrono::Locale::de_DE,
        }
    }

    pub fn decimal_separator(self) -> &'static str {
        match self {
            Culture::EnUs | Culture::EnGb => ".",
            Culture::NlBe | Culture::FrBe | Culture::DeDe => ",",
        }
    }

    pub fn group_separator(self) -> &'static str {
        match self {
            Culture::EnUs | Culture::EnGb => ",",
            Culture::NlBe | Culture::DeDe => ".",
            Culture::FrBe => "\u{202f}",
        }
    }

    pub fn currency_symbol(self) -> &'static str {
        match self {
            Culture::EnUs => "$",
            Culture::EnGb => "£",
            Culture::NlBe | Culture::FrBe | Culture::DeDe => "€",
        }
    }

    /// Lay out a formatted (unsigned) amount as currency.
    pub fn currency(self, amount: &str, negative: bool) -> String {
        let sign = if negative { "-" } else { "" };
        match self {
            Culture::EnUs | Culture::EnGb => format!("{}{}{}", sign, self.currency_symbol(), amount),
            Culture::NlBe => format!("{} {}{}", self.currency_symbol(), sign, amount),
            Culture::FrBe | Culture::DeDe => format!("{}{} {}", sign, amount, self.currency_symbol()),
        }
    }

    /// Lay out a formatted (unsigned) number as a percentage.
    pub fn percent(self, amount: &str, negative: bool) -> String {
        let sign = if negative { "-" } else { "" };
        match self {
            Culture::EnUs | Culture::EnGb | Culture::NlBe => format!("{}{}%", sign, amount),
            Culture::FrBe | Culture::DeDe => format!("{}{}\u{a0}%", sign, amount),
        }
    }

    /// Whether numeric dates are written day first (`4/03/2024`).
    pub fn day_first(self) -> bool {
        !matches!(self, Culture::EnUs)
    }

    /// Separator substituted for `/` in date patterns.
    pub fn date_separator(self) -> &'static str {
        match self {
            Culture::EnUs | Culture::EnGb | Culture::NlBe => "/",
            Culture::FrBe => "-",
            Culture::DeDe => ".",
        }
    }

    pub fn short_date_pattern(self) -> &'static str {
        match self {
            Culture::EnUs => "M/d/yyyy",
            Culture::EnGb => "dd/MM/yyyy",
            Culture::NlBe => "d/MM/yyyy",
            Culture::FrBe => "dd/MM/yy",
            Culture::DeDe => "dd.MM.yyyy",
        }
    }

    pub fn long_date_pattern(self) -> &'static str {
        match self {
            Culture::EnUs => "dddd, MMMM d, yyyy",
            Culture::EnGb => "dddd, d MMMM yyyy",
            Culture::NlBe | Culture::FrBe => "dddd d MMMM yyyy",
            Culture::DeDe => "dddd, d. MMMM yyyy",
        }
    }

    pub fn short_time_pattern(self) -> &'static str {
        match self {
            Culture::EnUs => "h:mm tt",
            Culture::NlBe => "H:mm",
            Culture::EnGb | Culture::FrBe | Culture::DeDe => "HH:mm",
        }
    }

    pub fn long_time_pattern(self) -> &'static str {
        match self {
            Culture::EnUs => "h:mm:ss tt",
            Culture::NlBe => "H:mm:ss",
            Culture::EnGb | Culture::FrBe | Culture::DeDe => "HH:mm:ss",
        }
    }

    pub fn month_day_pattern(self) -> &'static str {
        match self {
            Culture::EnUs => "MMMM d",
            Culture::EnGb | Culture::NlBe | Culture::FrBe => "d MMMM",
            Culture::DeDe => "d. MMMM",
        }
    }

    pub fn year_month_pattern(self) -> &'static str {
        "MMMM yyyy"
    }

    /// Era designator for `g`.
    pub fn era(self) -> &'static str {
        match self {
            Culture::EnUs => "A.D.",
            Culture::EnGb => "AD",
            Culture::NlBe => "n.Chr.",
            Culture::FrBe => "ap. J.-C.",
            Culture::DeDe => "n. Chr.",
        }
    }

    /// AM/PM designators for `tt`.
    pub fn am_pm(self) -> (&'static str, &'static str) {
        match self {
            Culture::EnUs | Culture::EnGb => ("AM", "PM"),
            Culture::NlBe => ("a.m.", "p.m."),
            Culture::FrBe | Culture::DeDe => ("", ""),
        }
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Culture {
    type Err = ConfigError;

    /// Accepts `nl-BE`, `nl_BE` and any ASCII casing of either.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-");
        Culture::ALL
            .into_iter()
            .find(|c| c.identifier().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ConfigError::UnknownCulture(s.to_string()))
    }
}

impl TryFrom<String> for Culture {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("nl-BE".parse::<Culture>().unwrap(), Culture::NlBe);
        assert_eq!("nl_be".parse::<Culture>().unwrap(), Culture::NlBe);
        assert_eq!(" EN-us ".parse::<Culture>().unwrap(), Culture::EnUs);
        assert!(matches!(
            "xx-YY".parse::<Culture>(),
            Err(ConfigError::UnknownCulture(c)) if c == "xx-YY"
        ));
    }

    #[test]
    fn test_identifier_round_trips_through_display() {
        for culture in Culture::ALL {
            assert_eq!(culture.to_string().parse::<Culture>().unwrap(), culture);
        }
    }

    #[test]
    fn test_currency_layout() {
        assert_eq!(Culture::EnUs.currency("1,234.50", false), "$1,234.50");
        assert_eq!(Culture::EnUs.currency("1,234.50", true), "-$1,234.50");
        assert_eq!(Culture::NlBe.currency("1.234,50", true), "€ -1.234,50");
        assert_eq!(Culture::DeDe.currency("1.234,50", false), "1.234,50 €");
    }

    #[test]
    fn test_day_first() {
        assert!(!Culture::EnUs.day_first());
        assert!(Culture::NlBe.day_first());
        assert!(Culture::EnGb.day_first());
    }
}
