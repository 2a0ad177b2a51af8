/*
 * date.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Date parsing and date pictures.
//!
//! Values are first matched against a short list of ISO layouts, then parsed
//! freely in the configured parse culture. Pictures follow the familiar
//! custom date format language (`yyyy-MM-dd`, `dddd d MMMM yyyy`, `h:mm tt`)
//! plus the single-letter standard formats (`d`, `D`, `g`, `s`, ...).

use std::borrow::Cow;
use std::fmt::Write;

use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike,
};

use crate::attempt::FormatAttempt;
use crate::config::MergeConfig;
use crate::culture::Culture;

/// Message for a picture that cannot be applied.
pub const INVALID_FORMAT: &str = "Input string was not in a correct format.";

/// Layouts tried, in order, before free parsing, each with the fixed-width
/// shape a value must have (`9` is any ASCII digit).
const EXACT_FORMATS: [(&str, &str); 4] = [
    ("%Y-%m-%d", "9999-99-99"),
    ("%Y-%m-%d %H:%M", "9999-99-99 99:99"),
    ("%Y-%m-%dT%H:%M", "9999-99-99T99:99"),
    ("%Y-%m-%dT%H:%M:%S", "9999-99-99T99:99:99"),
];

/// ISO-like layouts accepted by free parsing in every culture.
const ISO_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const ROUND_TRIP: &str = "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffffK";
const RFC1123: &str = "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'";
const SORTABLE: &str = "yyyy'-'MM'-'dd'T'HH':'mm':'ss";
const UNIVERSAL_SORTABLE: &str = "yyyy'-'MM'-'dd HH':'mm':'ss'Z'";

/// Parse `value` and render it with `pattern`.
pub fn format_date_value(value: &str, pattern: &str, config: &MergeConfig) -> FormatAttempt {
    FormatAttempt::from_steps(parse_date(value, config.parse_culture), |date| {
        format_date(&date, pattern, config.culture)
    })
}

/// Parse a date value.
///
/// The exact layouts `yyyy-MM-dd`, `yyyy-MM-dd HH:mm`, `yyyy-MM-ddTHH:mm` and
/// `yyyy-MM-ddTHH:mm:ss` are tried first. Anything else is parsed freely:
/// RFC 3339, ISO date-times, numeric dates in the culture's day/month order
/// (`4/03/2024`, `04-03-24`, `4.3.2024 14:30`), and dates with month names
/// (`4 maart 2024`, `March 4, 2024`).
pub fn parse_date(value: &str, culture: Culture) -> Result<NaiveDateTime, String> {
    parse_exact(value)
        .or_else(|| parse_free(value.trim(), culture))
        .ok_or_else(|| format!("String '{}' was not recognized as a valid DateTime.", value))
}

fn parse_exact(value: &str) -> Option<NaiveDateTime> {
    EXACT_FORMATS.iter().find_map(|&(layout, shape)| {
        if !has_shape(value, shape) {
            None
        } else if layout.contains("%H") {
            NaiveDateTime::parse_from_str(value, layout).ok()
        } else {
            NaiveDate::parse_from_str(value, layout)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        }
    })
}

/// chrono's `%Y` and `%m` also take short fields, so widths are checked here.
fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'9' => v.is_ascii_digit(),
            _ => v == s,
        })
}

fn parse_free(value: &str, culture: Culture) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.naive_local());
    }
    ISO_FORMATS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .or_else(|| parse_numeric(value, culture))
        .or_else(|| parse_named(value, culture))
}

/// `d/M/yyyy`, `M/d/yyyy` or `yyyy/M/d` with `/`, `-` or `.`, optionally
/// followed by a time.
fn parse_numeric(value: &str, culture: Culture) -> Option<NaiveDateTime> {
    let (date_part, time_part) = match value.split_once(char::is_whitespace) {
        Some((date, time)) => (date, Some(time.trim())),
        None => (value, None),
    };

    let separator = ['/', '-', '.']
        .into_iter()
        .find(|sep| date_part.contains(*sep))?;
    let parts: Vec<&str> = date_part.split(separator).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    if !parts.iter().all(|p| is_digits(p, 4)) {
        return None;
    }

    let (year, month, day) = if first.len() > 2 {
        (*first, *second, *third)
    } else if culture.day_first() {
        (*third, *second, *first)
    } else {
        (*third, *first, *second)
    };
    if month.len() > 2 || day.len() > 2 {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(expand_year(year)?, month.parse().ok()?, day.parse().ok()?)?;
    let time = match time_part {
        None => NaiveTime::MIN,
        Some(time) => parse_time(time)?,
    };
    Some(date.and_time(time))
}

/// `H:mm` or `H:mm:ss`.
fn parse_time(value: &str) -> Option<NaiveTime> {
    let parts: Vec<&str> = value.split(':').collect();
    if !(2..=3).contains(&parts.len()) || !parts.iter().all(|p| is_digits(p, 2)) {
        return None;
    }
    let hour = parts[0].parse().ok()?;
    let minute = parts[1].parse().ok()?;
    let second = match parts.get(2) {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Dates with a month name, optionally preceded by a day name:
/// `4 maart 2024`, `maandag 4 maart 2024`, `March 4, 2024`, `4. März 2024`.
fn parse_named(value: &str, culture: Culture) -> Option<NaiveDateTime> {
    let mut tokens: Vec<String> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_end_matches('.').to_lowercase())
        .collect();

    if tokens.len() == 4 && day_names(culture).iter().any(|names| names.matches(&tokens[0])) {
        tokens.remove(0);
    }
    let [a, b, c] = tokens.as_slice() else {
        return None;
    };

    let (day, month, year) = if culture.day_first() {
        (a, b, c)
    } else {
        (b, a, c)
    };
    if !is_digits(day, 2) || !is_digits(year, 4) {
        return None;
    }
    let month = month_names(culture)
        .iter()
        .position(|names| names.matches(month))?;

    let date = NaiveDate::from_ymd_opt(expand_year(year)?, month as u32 + 1, day.parse().ok()?)?;
    Some(date.and_time(NaiveTime::MIN))
}

fn is_digits(s: &str, max_len: usize) -> bool {
    !s.is_empty() && s.len() <= max_len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Two-digit years fall in 1950..=2049.
fn expand_year(year: &str) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    Some(match year.len() {
        1 | 2 if value < 50 => 2000 + value,
        1 | 2 => 1900 + value,
        _ => value,
    })
}

/// Full and abbreviated forms of a month or day name, lowercased.
struct Names {
    full: String,
    short: String,
}

impl Names {
    fn matches(&self, token: &str) -> bool {
        token == self.full || token == self.short
    }
}

fn localized(date: &NaiveDateTime, spec: &str, culture: Culture) -> String {
    date.and_utc()
        .format_localized(spec, culture.chrono_locale())
        .to_string()
}

fn month_names(culture: Culture) -> Vec<Names> {
    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(2000, month, 1))
        .map(|date| date.and_time(NaiveTime::MIN))
        .map(|date| Names {
            full: localized(&date, "%B", culture).to_lowercase(),
            short: localized(&date, "%b", culture)
                .trim_end_matches('.')
                .to_lowercase(),
        })
        .collect()
}

fn day_names(culture: Culture) -> Vec<Names> {
    // 2000-01-03 is a Monday.
    (3..=9)
        .filter_map(|day| NaiveDate::from_ymd_opt(2000, 1, day))
        .map(|date| date.and_time(NaiveTime::MIN))
        .map(|date| Names {
            full: localized(&date, "%A", culture).to_lowercase(),
            short: localized(&date, "%a", culture)
                .trim_end_matches('.')
                .to_lowercase(),
        })
        .collect()
}

/// Render a date with a picture.
///
/// A one-character picture is a standard format and expands to the
/// culture's pattern; unknown letters are an error. Longer pictures are
/// rendered token by token.
pub fn format_date(date: &NaiveDateTime, pattern: &str, culture: Culture) -> Result<String, String> {
    let mut chars = pattern.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => format_standard(date, letter, culture),
        _ => render(date, pattern, culture),
    }
}

fn format_standard(date: &NaiveDateTime, letter: char, culture: Culture) -> Result<String, String> {
    let pattern: Cow<'static, str> = match letter {
        'd' => culture.short_date_pattern().into(),
        'D' => culture.long_date_pattern().into(),
        'f' => format!("{} {}", culture.long_date_pattern(), culture.short_time_pattern()).into(),
        'F' | 'U' => format!("{} {}", culture.long_date_pattern(), culture.long_time_pattern()).into(),
        'g' => format!("{} {}", culture.short_date_pattern(), culture.short_time_pattern()).into(),
        'G' => format!("{} {}", culture.short_date_pattern(), culture.long_time_pattern()).into(),
        'M' | 'm' => culture.month_day_pattern().into(),
        'o' | 'O' => ROUND_TRIP.into(),
        // Always English names.
        'R' | 'r' => return render(date, RFC1123, Culture::EnUs),
        's' => SORTABLE.into(),
        't' => culture.short_time_pattern().into(),
        'T' => culture.long_time_pattern().into(),
        'u' => UNIVERSAL_SORTABLE.into(),
        'Y' | 'y' => culture.year_month_pattern().into(),
        _ => return Err(INVALID_FORMAT.to_string()),
    };
    render(date, &pattern, culture)
}

fn render(date: &NaiveDateTime, pattern: &str, culture: Culture) -> Result<String, String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            'd' | 'M' | 'y' | 'h' | 'H' | 'm' | 's' | 'f' | 'F' | 't' | 'g' | 'z' => {
                let run = chars[i..].iter().take_while(|&&n| n == c).count();
                write_field(&mut out, date, c, run, culture)?;
                i += run;
            }
            // No time zone is attached to parsed values.
            'K' => i += 1,
            ':' => {
                out.push(':');
                i += 1;
            }
            '/' => {
                out.push_str(culture.date_separator());
                i += 1;
            }
            '\'' | '"' => {
                i += 1;
                let mut closed = false;
                while i < chars.len() {
                    match chars[i] {
                        q if q == c => {
                            closed = true;
                            i += 1;
                            break;
                        }
                        '\\' if i + 1 < chars.len() => {
                            out.push(chars[i + 1]);
                            i += 2;
                        }
                        other => {
                            out.push(other);
                            i += 1;
                        }
                    }
                }
                if !closed {
                    return Err(format!(
                        "Cannot find a matching quote character for the character '{}'.",
                        c
                    ));
                }
            }
            '%' => match chars.get(i + 1) {
                Some(&next) if next != '%' => {
                    out.push_str(&render(date, &next.to_string(), culture)?);
                    i += 2;
                }
                _ => return Err(INVALID_FORMAT.to_string()),
            },
            '\\' => match chars.get(i + 1) {
                Some(&next) => {
                    out.push(next);
                    i += 2;
                }
                None => return Err(INVALID_FORMAT.to_string()),
            },
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    Ok(out)
}

fn write_field(
    out: &mut String,
    date: &NaiveDateTime,
    c: char,
    run: usize,
    culture: Culture,
) -> Result<(), String> {
    let written = match c {
        'd' => match run {
            1 => write!(out, "{}", date.day()),
            2 => write!(out, "{:02}", date.day()),
            3 => write!(out, "{}", localized(date, "%a", culture)),
            _ => write!(out, "{}", localized(date, "%A", culture)),
        },
        'M' => match run {
            1 => write!(out, "{}", date.month()),
            2 => write!(out, "{:02}", date.month()),
            3 => write!(out, "{}", localized(date, "%b", culture)),
            _ => write!(out, "{}", localized(date, "%B", culture)),
        },
        'y' => match run {
            1 => write!(out, "{}", date.year() % 100),
            2 => write!(out, "{:02}", date.year() % 100),
            n => write!(out, "{:0width$}", date.year(), width = n),
        },
        'h' => {
            let hour = match date.hour() % 12 {
                0 => 12,
                h => h,
            };
            write_number(out, hour, run)
        }
        'H' => write_number(out, date.hour(), run),
        'm' => write_number(out, date.minute(), run),
        's' => write_number(out, date.second(), run),
        'f' | 'F' => {
            if run > 7 {
                return Err(INVALID_FORMAT.to_string());
            }
            let ticks = format!("{:07}", date.nanosecond() % 1_000_000_000 / 100);
            let digits = &ticks[..run];
            if c == 'f' {
                out.push_str(digits);
            } else {
                let trimmed = digits.trim_end_matches('0');
                if trimmed.is_empty() && out.ends_with('.') {
                    out.pop();
                }
                out.push_str(trimmed);
            }
            Ok(())
        }
        't' => {
            let (am, pm) = culture.am_pm();
            let designator = if date.hour() < 12 { am } else { pm };
            if run == 1 {
                out.extend(designator.chars().next());
            } else {
                out.push_str(designator);
            }
            Ok(())
        }
        'g' => write!(out, "{}", culture.era()),
        'z' => write_offset(out, date, run),
        _ => write!(out, "{}", c),
    };
    written.map_err(|e| e.to_string())
}

fn write_number(out: &mut String, value: u32, run: usize) -> std::fmt::Result {
    if run == 1 {
        write!(out, "{}", value)
    } else {
        write!(out, "{:02}", value)
    }
}

/// Offset of the local time zone at `date`.
fn write_offset(out: &mut String, date: &NaiveDateTime, run: usize) -> std::fmt::Result {
    let seconds = Local
        .offset_from_local_datetime(date)
        .earliest()
        .map_or(0, |offset| offset.fix().local_minus_utc());
    let sign = if seconds < 0 { '-' } else { '+' };
    let hours = seconds.abs() / 3600;
    let minutes = seconds.abs() % 3600 / 60;
    match run {
        1 => write!(out, "{}{}", sign, hours),
        2 => write!(out, "{}{:02}", sign, hours),
        _ => write!(out, "{}{:02}:{:02}", sign, hours, minutes),
    }
}
