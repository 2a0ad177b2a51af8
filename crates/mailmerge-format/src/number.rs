/*
 * number.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Number parsing and number pictures.
//!
//! Values are parsed as [`Decimal`] so pictures round exactly. Supported
//! pictures:
//!
//! - standard: `N`, `F`, `P`, `C`, `G`, each with an optional precision
//!   (`N0`, `F3`, `C2`)
//! - custom: `0` and `#` digit placeholders, `.` decimal point, `,` for
//!   grouping (between integer placeholders) or scaling by 1000 (directly
//!   before the point), `%` and `‰`, quoted literals, `\` escapes, and up to
//!   three `;`-separated sections for positive, negative and zero values
//!
//! Rounding is half away from zero.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::attempt::FormatAttempt;
use crate::config::MergeConfig;
use crate::culture::Culture;

pub const INVALID_INPUT: &str = "Input string was not in a correct format.";
pub const INVALID_SPECIFIER: &str = "Format specifier was invalid.";
const OVERFLOW: &str = "Value was either too large or too small for a Decimal.";

/// Parse `value` and render it with `pattern`.
pub fn format_number_value(value: &str, pattern: &str, config: &MergeConfig) -> FormatAttempt {
    FormatAttempt::from_steps(parse_number(value), |number| {
        format_number(number, pattern, config.culture)
    })
}

/// Parse a number with `.` as decimal point and optional `,` grouping.
pub fn parse_number(value: &str) -> Result<Decimal, String> {
    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if unsigned.is_empty() || unsigned.starts_with(',') {
        return Err(INVALID_INPUT.to_string());
    }
    Decimal::from_str(&unsigned.replace(',', "")).map_err(|_| INVALID_INPUT.to_string())
}

/// Render a number with a standard or custom picture.
pub fn format_number(value: Decimal, pattern: &str, culture: Culture) -> Result<String, String> {
    match standard_specifier(pattern) {
        Some((letter, precision)) => format_standard(value, letter, precision, culture),
        None => format_custom(value, pattern, culture),
    }
}

/// A letter optionally followed by precision digits.
fn standard_specifier(pattern: &str) -> Option<(char, Option<u32>)> {
    let mut chars = pattern.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    let digits = chars.as_str();
    if digits.is_empty() {
        return Some((letter, None));
    }
    if digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((letter, digits.parse().ok()))
}

fn format_standard(
    value: Decimal,
    letter: char,
    precision: Option<u32>,
    culture: Culture,
) -> Result<String, String> {
    let fixed = |value: Decimal, grouping: bool| {
        let digits = precision.unwrap_or(2) as usize;
        let section = Section::fixed(digits, grouping);
        let (text, rounded_zero) = section.render(value.abs(), culture)?;
        Ok::<_, String>((text, value.is_sign_negative() && !rounded_zero))
    };

    match letter.to_ascii_uppercase() {
        'N' => fixed(value, true).map(|(text, negative)| with_sign(text, negative)),
        'F' => fixed(value, false).map(|(text, negative)| with_sign(text, negative)),
        'C' => fixed(value, true).map(|(text, negative)| culture.currency(&text, negative)),
        'P' => {
            let percent = value.checked_mul(Decimal::ONE_HUNDRED).ok_or(OVERFLOW)?;
            fixed(percent, true).map(|(text, negative)| culture.percent(&text, negative))
        }
        'G' => {
            let value = match precision {
                None | Some(0) => value,
                Some(digits) => value
                    .round_sf_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
                    .ok_or(OVERFLOW)?
                    .normalize(),
            };
            Ok(value.to_string().replace('.', culture.decimal_separator()))
        }
        _ => Err(INVALID_SPECIFIER.to_string()),
    }
}

fn with_sign(text: String, negative: bool) -> String {
    if negative { format!("-{}", text) } else { text }
}

fn format_custom(value: Decimal, pattern: &str, culture: Culture) -> Result<String, String> {
    let sections = split_sections(pattern)
        .iter()
        .map(|s| Section::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    let first = &sections[0];
    let negative_section = sections.get(1).filter(|s| !s.is_empty());
    let zero_section = sections.get(2).filter(|s| !s.is_empty());

    if value.is_zero() {
        let section = zero_section.unwrap_or(first);
        return section.render(Decimal::ZERO, culture).map(|(text, _)| text);
    }

    let (section, signed) = match (value.is_sign_negative(), negative_section) {
        (true, Some(section)) => (section, false),
        (true, None) => (first, true),
        (false, _) => (first, false),
    };
    let (text, rounded_zero) = section.render(value.abs(), culture)?;
    if !rounded_zero {
        return Ok(with_sign(text, signed));
    }
    // A value that rounds to zero takes the zero section, or else the first.
    match zero_section {
        Some(zero) => zero.render(Decimal::ZERO, culture).map(|(text, _)| text),
        None if signed || value.is_sign_positive() => Ok(text),
        None => first.render(value.abs(), culture).map(|(text, _)| text),
    }
}

/// Split on `;` outside quotes and escapes. At most three sections are used.
fn split_sections(pattern: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (None, '\'' | '"') => {
                quote = Some(c);
                current.push(c);
            }
            (_, '\\') => {
                current.push(c);
                current.extend(chars.next());
            }
            (None, ';') if sections.len() < 2 => sections.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    sections.push(current);
    sections
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Literal(String),
    IntDigit,
    Point,
    FracDigit,
}

/// One parsed section of a custom picture.
#[derive(Debug, Default)]
struct Section {
    items: Vec<Item>,
    int_placeholders: usize,
    min_int: usize,
    max_frac: usize,
    min_frac: usize,
    grouping: bool,
    /// Power of ten applied before rounding (`%` is +2, a scaling comma -3).
    exponent: i32,
}

impl Section {
    /// The section behind `N`/`F` style pictures: `#,##0.00`.
    fn fixed(frac_digits: usize, grouping: bool) -> Self {
        let mut items = vec![Item::IntDigit];
        if frac_digits > 0 {
            items.push(Item::Point);
            items.extend(std::iter::repeat_n(Item::FracDigit, frac_digits));
        }
        Section {
            items,
            int_placeholders: 1,
            min_int: 1,
            max_frac: frac_digits,
            min_frac: frac_digits,
            grouping,
            exponent: 0,
        }
    }

    fn parse(pattern: &str) -> Result<Self, String> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut section = Section::default();
        let mut seen_point = false;
        let mut first_zero: Option<usize> = None;
        // Commas since the last integer placeholder.
        let mut pending_commas = 0;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                '0' | '#' if !seen_point => {
                    if pending_commas > 0 && section.int_placeholders > 0 {
                        section.grouping = true;
                    }
                    pending_commas = 0;
                    if c == '0' && first_zero.is_none() {
                        first_zero = Some(section.int_placeholders);
                    }
                    section.int_placeholders += 1;
                    section.items.push(Item::IntDigit);
                }
                '0' | '#' => {
                    section.max_frac += 1;
                    if c == '0' {
                        section.min_frac = section.max_frac;
                    }
                    section.items.push(Item::FracDigit);
                }
                '.' if !seen_point => {
                    seen_point = true;
                    section.exponent -= 3 * pending_commas;
                    pending_commas = 0;
                    section.items.push(Item::Point);
                }
                ',' if !seen_point => pending_commas += 1,
                ',' => {}
                '%' => {
                    section.exponent += 2;
                    section.push_literal("%");
                }
                '‰' => {
                    section.exponent += 3;
                    section.push_literal("‰");
                }
                '\'' | '"' => {
                    let close = chars[i + 1..]
                        .iter()
                        .position(|&q| q == c)
                        .ok_or_else(|| INVALID_SPECIFIER.to_string())?;
                    let literal: String = chars[i + 1..i + 1 + close].iter().collect();
                    section.push_literal(&literal);
                    i += close + 1;
                }
                '\\' => {
                    let next = chars.get(i + 1).ok_or_else(|| INVALID_SPECIFIER.to_string())?;
                    section.push_literal(&next.to_string());
                    i += 1;
                }
                other => section.push_literal(&other.to_string()),
            }
            i += 1;
        }

        if !seen_point {
            section.exponent -= 3 * pending_commas;
        }
        section.min_int = first_zero.map_or(0, |pos| section.int_placeholders - pos);
        Ok(section)
    }

    fn push_literal(&mut self, text: &str) {
        match self.items.last_mut() {
            Some(Item::Literal(existing)) => existing.push_str(text),
            _ => self.items.push(Item::Literal(text.to_string())),
        }
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render a non-negative value. Also reports whether it rounded to zero.
    fn render(&self, value: Decimal, culture: Culture) -> Result<(String, bool), String> {
        let scaled = scale(value, self.exponent)?;
        let rounded = scaled.round_dp_with_strategy(
            self.max_frac.min(28) as u32,
            RoundingStrategy::MidpointAwayFromZero,
        );

        let plain = rounded.to_string();
        let (int_text, frac_text) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

        let int_text = int_text.trim_start_matches('0');
        let int_digits: Vec<char> = if int_text.len() < self.min_int {
            let padding = self.min_int - int_text.len();
            std::iter::repeat_n('0', padding).chain(int_text.chars()).collect()
        } else {
            int_text.chars().collect()
        };

        let mut frac_digits: Vec<char> = frac_text.chars().collect();
        frac_digits.resize(self.max_frac, '0');
        while frac_digits.len() > self.min_frac && frac_digits.last() == Some(&'0') {
            frac_digits.pop();
        }

        let mut out = String::new();
        let mut int_index = 0;
        let mut frac_index = 0;
        for item in &self.items {
            match item {
                Item::Literal(text) => out.push_str(text),
                Item::IntDigit => {
                    self.write_int_digits(&mut out, &int_digits, int_index, culture);
                    int_index += 1;
                }
                Item::Point => {
                    if self.int_placeholders == 0 {
                        self.write_all_int_digits(&mut out, &int_digits, culture);
                    }
                    if !frac_digits.is_empty() {
                        out.push_str(culture.decimal_separator());
                    }
                }
                Item::FracDigit => {
                    if let Some(d) = frac_digits.get(frac_index) {
                        out.push(*d);
                    }
                    frac_index += 1;
                }
            }
        }
        Ok((out, rounded.is_zero()))
    }

    /// Write the digits that belong to integer placeholder `index`.
    ///
    /// Placeholders take digits from the right; the leftmost placeholder
    /// also takes every digit that has no placeholder of its own.
    fn write_int_digits(&self, out: &mut String, digits: &[char], index: usize, culture: Culture) {
        let position = self.int_placeholders - 1 - index;
        let len = digits.len();
        if index == 0 {
            if len > position {
                for (i, d) in digits[..len - position].iter().enumerate() {
                    self.write_digit(out, *d, len - 1 - i, culture);
                }
            }
        } else if position < len {
            self.write_digit(out, digits[len - 1 - position], position, culture);
        }
    }

    fn write_all_int_digits(&self, out: &mut String, digits: &[char], culture: Culture) {
        for (i, d) in digits.iter().enumerate() {
            self.write_digit(out, *d, digits.len() - 1 - i, culture);
        }
    }

    /// Write one digit; `position` counts from the right, starting at 0.
    fn write_digit(&self, out: &mut String, digit: char, position: usize, culture: Culture) {
        out.push(digit);
        if self.grouping && position > 0 && position % 3 == 0 {
            out.push_str(culture.group_separator());
        }
    }
}

fn scale(value: Decimal, exponent: i32) -> Result<Decimal, String> {
    let power = exponent.unsigned_abs();
    if power > 18 {
        return Err(OVERFLOW.to_string());
    }
    let factor = Decimal::from(10u64.pow(power));
    let scaled = if exponent >= 0 {
        value.checked_mul(factor)
    } else {
        value.checked_div(factor)
    };
    scaled.ok_or_else(|| OVERFLOW.to_string())
}
