//! Field coercers: raw cells into typed transaction fields
//!
//! Every coercer is a pure function of its inputs. Failures carry the
//! offending text but no row context; the assembler adds that.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::grid::Cell;
use crate::models::Money;

/// Layouts tried, in order, when no date format is configured
///
/// Slash dates read month first, as browsers and spreadsheet exports
/// from US banks do.
const PERMISSIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a, %d %b %Y",
];

const PERMISSIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const CURRENCY_SYMBOLS: &[char] = &[
    '$', '€', '£', '¥', '¢', '₹', '₽', '₩', '₪', '₫', '₺', '₴', '₱', '₦', '฿', '₡', '₲', '₵',
];

/// Why a cell could not be coerced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("cell is missing")]
    MissingCell,
    #[error("cannot parse '{0}' as a date")]
    InvalidDate(String),
    #[error("cannot parse '{0}' as an amount")]
    InvalidAmount(String),
}

/// How dates are read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFormat {
    /// Try the built-in list of common layouts
    Permissive,
    /// A single chrono format string, matched strictly
    Strict(String),
}

impl DateFormat {
    /// Interpret a user-supplied format
    ///
    /// Empty means permissive. Strings containing `%` are chrono formats;
    /// anything else is read as moment-style tokens (`DD/MM/YYYY`).
    pub fn from_user(format: &str) -> Self {
        let format = format.trim();
        if format.is_empty() {
            DateFormat::Permissive
        } else if format.contains('%') {
            DateFormat::Strict(format.to_string())
        } else {
            DateFormat::Strict(translate_moment_format(format))
        }
    }
}

/// Translate moment.js style tokens into a chrono format string
pub fn translate_moment_format(format: &str) -> String {
    // Longest tokens first so `MMMM` is not read as `MM` twice
    const TOKENS: &[(&str, &str)] = &[
        ("YYYY", "%Y"),
        ("MMMM", "%B"),
        ("dddd", "%A"),
        ("MMM", "%b"),
        ("ddd", "%a"),
        ("YY", "%y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("M", "%m"),
        ("D", "%d"),
        ("H", "%H"),
    ];

    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;
    'scan: while let Some(c) = rest.chars().next() {
        if c == '[' {
            // Bracketed text is literal
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end].replace('%', "%%"));
                rest = &rest[end + 1..];
                continue;
            }
        }
        for (token, chrono_token) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(chrono_token);
                rest = after;
                continue 'scan;
            }
        }
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Coerce a cell into a calendar date
pub fn coerce_date(cell: Option<&Cell>, format: &DateFormat) -> Result<NaiveDate, CoerceError> {
    let cell = cell.ok_or(CoerceError::MissingCell)?;
    let text = cell.as_text();
    let raw = text.trim();
    let invalid = || CoerceError::InvalidDate(raw.to_string());
    if raw.is_empty() {
        return Err(invalid());
    }

    match format {
        DateFormat::Strict(fmt) => NaiveDate::parse_from_str(raw, fmt)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, fmt).map(|dt| dt.date()))
            .map_err(|_| invalid()),
        DateFormat::Permissive => parse_permissive_date(raw).ok_or_else(invalid),
    }
}

fn parse_permissive_date(raw: &str) -> Option<NaiveDate> {
    PERMISSIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            PERMISSIVE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| DateTime::parse_from_rfc2822(raw).ok().map(|dt| dt.date_naive()))
}

/// Number formatting conventions of the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    /// `.` (1,234.56) or `,` (1.234,56)
    pub decimal_separator: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
        }
    }
}

impl NumberLocale {
    pub fn with_decimal_separator(decimal_separator: char) -> Self {
        Self { decimal_separator }
    }

    fn group_separator(&self) -> char {
        if self.decimal_separator == ',' {
            '.'
        } else {
            ','
        }
    }
}

/// Coerce a cell into an amount
///
/// Numeric cells pass through, rounded to cents. Text may carry currency
/// symbols or a three-letter currency code, grouping separators, spaces,
/// a leading `+`/`-`, a trailing `-`, or accounting parentheses.
pub fn coerce_amount(cell: Option<&Cell>, locale: NumberLocale) -> Result<Money, CoerceError> {
    match cell.ok_or(CoerceError::MissingCell)? {
        Cell::Number(n) => {
            Money::from_f64(*n).ok_or_else(|| CoerceError::InvalidAmount(n.to_string()))
        }
        Cell::Text(raw) => parse_amount_text(raw, locale)
            .ok_or_else(|| CoerceError::InvalidAmount(raw.trim().to_string())),
    }
}

fn parse_amount_text(raw: &str, locale: NumberLocale) -> Option<Money> {
    let mut s = strip_currency_code(raw.trim()).trim();

    let mut negative = false;
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        negative = true;
        s = inner.trim();
    }

    let mut digits = String::with_capacity(s.len());
    let mut grouping = DigitGrouping::default();
    for c in s.chars() {
        match c {
            '0'..='9' => {
                digits.push(c);
                grouping.digit();
            }
            '-' | '\u{2212}' if !negative => {
                negative = true;
                if !digits.is_empty() && !s.trim_end().ends_with(c) {
                    return None;
                }
            }
            '+' if digits.is_empty() => {}
            c if c == locale.decimal_separator => {
                digits.push('.');
                grouping.decimal_point()?;
            }
            c if c == locale.group_separator() => grouping.separator()?,
            '\'' | '\u{2019}' => grouping.separator()?,
            c if c.is_whitespace() => {}
            c if CURRENCY_SYMBOLS.contains(&c) => {}
            _ => return None,
        }
    }

    if !digits.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    grouping.finish()?;
    let amount = Money::parse(&digits).ok()?;
    Some(if negative { -amount } else { amount })
}

/// Thousands grouping of the integer part
///
/// Once a group separator appears, the leading group holds 1 to 3 digits
/// and every later group exactly 3, and no separator may follow the
/// decimal point. `1,5` or `1.234,56` under a `.` locale are rejected
/// rather than read as 15 or 1.23.
#[derive(Debug, Default)]
struct DigitGrouping {
    groups: Vec<usize>,
    run: usize,
    in_fraction: bool,
}

impl DigitGrouping {
    fn digit(&mut self) {
        self.run += 1;
    }

    fn separator(&mut self) -> Option<()> {
        if self.in_fraction {
            return None;
        }
        self.groups.push(self.run);
        self.run = 0;
        Some(())
    }

    fn decimal_point(&mut self) -> Option<()> {
        if self.in_fraction {
            return None;
        }
        self.close_integer_part()?;
        self.in_fraction = true;
        Some(())
    }

    fn finish(&mut self) -> Option<()> {
        if self.in_fraction {
            Some(())
        } else {
            self.close_integer_part()
        }
    }

    fn close_integer_part(&mut self) -> Option<()> {
        if self.groups.is_empty() {
            return Some(());
        }
        self.groups.push(self.run);
        let (first, rest) = self.groups.split_first()?;
        let valid = (1..=3).contains(first) && rest.iter().all(|&len| len == 3);
        valid.then_some(())
    }
}

/// Drop a leading or trailing ISO 4217 style code such as `USD`
fn strip_currency_code(s: &str) -> &str {
    let is_code = |part: &str| part.len() == 3 && part.bytes().all(|b| b.is_ascii_uppercase());

    if let Some((head, tail)) = s.split_once(char::is_whitespace) {
        if is_code(head) {
            return tail;
        }
    }
    if let Some((head, tail)) = s.rsplit_once(char::is_whitespace) {
        if is_code(tail) {
            return head;
        }
    }
    s
}

/// Description passthrough; an unmapped column gives an empty string
pub fn coerce_description(cell: Option<&Cell>) -> String {
    cell.map(|c| c.as_text().trim().to_string())
        .unwrap_or_default()
}
