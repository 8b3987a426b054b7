//! Typed value formatting.
//!
//! The free functions are the built-in formatters; [`TableFormatter`] wraps
//! them in a per-instance registry that callers can extend with their own
//! type formatters and with global post-processing steps.

use crate::column::Column;
use crate::text::truncate_to_width;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::str::FromStr;
use std::sync::Arc;
use termtable_data::CellValue;

pub type TypeFormatter = Arc<dyn Fn(&CellValue) -> String + Send + Sync>;
pub type GlobalFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

pub const BUILTIN_TYPES: [&str; 13] = [
    "integer",
    "float",
    "currency",
    "percentage",
    "date",
    "datetime",
    "boolean",
    "filesize",
    "duration",
    "email",
    "url",
    "phone",
    "status",
];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];
const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
const DURATION_UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

const STATUS_ICONS: [(&str, &[&str]); 5] = [
    (
        "✅",
        &["active", "enabled", "online", "running", "success", "completed", "done", "passed"],
    ),
    ("⛔", &["inactive", "disabled", "offline", "stopped"]),
    ("❌", &["error", "failed", "failure", "critical"]),
    ("⏳", &["pending", "waiting", "queued", "in_progress", "processing"]),
    ("🟡", &["warning"]),
];
const STATUS_DEFAULT_ICON: &str = "•";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrencyPosition {
    #[default]
    Prefix,
    Suffix,
}

impl FromStr for CurrencyPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prefix" | "before" => Ok(CurrencyPosition::Prefix),
            "suffix" | "after" => Ok(CurrencyPosition::Suffix),
            _ => Err(format!("unknown currency position '{}'", s)),
        }
    }
}

/// Knobs for the built-in formatters of one [`TableFormatter`]
#[derive(Debug, Clone, PartialEq)]
pub struct FormatterOptions {
    pub currency_symbol: String,
    pub currency_position: CurrencyPosition,
    pub decimals: usize,
    pub percentage_decimals: usize,
    pub filesize_precision: usize,
    pub date_format: String,
    pub thousands_separator: char,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            currency_position: CurrencyPosition::Prefix,
            decimals: 2,
            percentage_decimals: 1,
            filesize_precision: 1,
            date_format: "%Y-%m-%d".to_string(),
            thousands_separator: ',',
        }
    }
}

/// Registry of type formatters plus an ordered chain of global formatters.
#[derive(Clone, Default)]
pub struct TableFormatter {
    options: FormatterOptions,
    custom: HashMap<String, TypeFormatter>,
    globals: Vec<GlobalFormatter>,
}

impl fmt::Debug for TableFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut custom: Vec<&String> = self.custom.keys().collect();
        custom.sort();
        f.debug_struct("TableFormatter")
            .field("options", &self.options)
            .field("custom", &custom)
            .field("globals", &self.globals.len())
            .finish()
    }
}

impl TableFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormatterOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &FormatterOptions {
        &self.options
    }

    /// Register a formatter for `type_name`, shadowing any built-in of the
    /// same name.
    pub fn register_formatter<F>(&mut self, type_name: impl Into<String>, f: F)
    where
        F: Fn(&CellValue) -> String + Send + Sync + 'static,
    {
        self.custom.insert(type_name.into(), Arc::new(f));
    }

    /// Append a formatter that runs on every cell after type formatting.
    pub fn add_global_formatter<F>(&mut self, f: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.globals.push(Arc::new(f));
    }

    pub fn has_global_formatters(&self) -> bool {
        !self.globals.is_empty()
    }

    /// Drop custom and global formatters; built-ins stay available.
    pub fn clear_formatters(&mut self) {
        self.custom.clear();
        self.globals.clear();
    }

    pub fn has_formatter(&self, type_name: &str) -> bool {
        self.custom.contains_key(type_name) || builtin_name(type_name).is_some()
    }

    /// Full cell pipeline: default value for empties, then the column
    /// formatter, then the type formatter, then every global formatter.
    pub fn format_cell(&self, value: &CellValue, column: &Column, type_name: Option<&str>) -> String {
        if value.is_empty() {
            return column.default_value.clone();
        }

        let value: Cow<'_, CellValue> = match &column.formatter {
            Some(format) => Cow::Owned(CellValue::Str(format(value))),
            None => Cow::Borrowed(value),
        };

        let mut text = match type_name {
            Some(name) => self.format_typed(&value, name),
            None => value.to_string(),
        };

        for global in &self.globals {
            text = global(&text);
        }
        text
    }

    /// Format with a single type formatter. Unknown types pass the value
    /// through unchanged.
    pub fn format_typed(&self, value: &CellValue, type_name: &str) -> String {
        if let Some(custom) = self.custom.get(type_name) {
            return custom(value);
        }
        match builtin_name(type_name) {
            Some(name) => self.format_builtin(value, name),
            None => {
                tracing::trace!(type_name, "no formatter registered, passing value through");
                value.to_string()
            }
        }
    }

    fn format_builtin(&self, value: &CellValue, name: &str) -> String {
        let opts = &self.options;
        let sep = opts.thousands_separator;
        match name {
            "integer" => integer_with(value, sep),
            "float" => float_with(value, opts.decimals, sep),
            "currency" => currency_with(
                value,
                &opts.currency_symbol,
                opts.decimals,
                opts.currency_position,
                sep,
            ),
            "percentage" => format_percentage(value, opts.percentage_decimals),
            "date" => format_date(value, &opts.date_format),
            "datetime" => format_date(value, &format!("{} %H:%M:%S", opts.date_format)),
            "boolean" => format_boolean(value),
            "filesize" => match non_negative(value) {
                Some(bytes) => format_file_size(bytes, opts.filesize_precision),
                None => value.to_string(),
            },
            "duration" => match non_negative(value) {
                Some(seconds) => format_duration(seconds),
                None => value.to_string(),
            },
            "email" => format_email(&value.to_string()),
            "url" => format_url(&value.to_string()),
            "phone" => format_phone(&value.to_string()),
            "status" => format_status(&value.to_string()),
            _ => value.to_string(),
        }
    }
}

fn builtin_name(type_name: &str) -> Option<&'static str> {
    let name = match type_name.to_lowercase().replace(['-', ' '], "_").as_str() {
        "integer" | "int" | "number" => "integer",
        "float" | "decimal" => "float",
        "currency" | "money" => "currency",
        "percentage" | "percent" => "percentage",
        "date" => "date",
        "datetime" | "timestamp" => "datetime",
        "boolean" | "bool" => "boolean",
        "filesize" | "file_size" | "bytes" => "filesize",
        "duration" => "duration",
        "email" => "email",
        "url" => "url",
        "phone" => "phone",
        "status" => "status",
        _ => return None,
    };
    Some(name)
}

/// Numeric view of a cell; grouped strings like `1,234.5` parse too.
fn numeric(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Str(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            let parsed: f64 = cleaned.parse().ok()?;
            parsed.is_finite().then_some(parsed)
        }
        other => other.as_f64().filter(|f| f.is_finite()),
    }
}

fn integral(value: &CellValue) -> Option<i64> {
    match value {
        CellValue::Int(i) => Some(*i),
        CellValue::Str(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            cleaned.parse().ok()
        }
        _ => None,
    }
}

fn non_negative(value: &CellValue) -> Option<u64> {
    numeric(value).filter(|f| *f >= 0.0).map(|f| f as u64)
}

fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

/// `-1234567.891` with 2 decimals becomes `-1,234,567.89`.
fn group_fixed(number: f64, decimals: usize, sep: char) -> String {
    let fixed = format!("{:.*}", decimals, number.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if number < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, sep));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn integer_with(value: &CellValue, sep: char) -> String {
    if let Some(i) = integral(value) {
        let grouped = group_digits(&i.unsigned_abs().to_string(), sep);
        return if i < 0 { format!("-{}", grouped) } else { grouped };
    }
    match numeric(value) {
        Some(f) => group_fixed(f.round(), 0, sep),
        None => value.to_string(),
    }
}

fn float_with(value: &CellValue, decimals: usize, sep: char) -> String {
    match numeric(value) {
        Some(f) => group_fixed(f, decimals, sep),
        None => value.to_string(),
    }
}

fn currency_with(
    value: &CellValue,
    symbol: &str,
    decimals: usize,
    position: CurrencyPosition,
    sep: char,
) -> String {
    let Some(amount) = numeric(value) else {
        return value.to_string();
    };
    let grouped = group_fixed(amount, decimals, sep);
    let (sign, digits) = match grouped.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", grouped.as_str()),
    };
    match position {
        CurrencyPosition::Prefix => format!("{}{}{}", sign, symbol, digits),
        CurrencyPosition::Suffix => format!("{}{} {}", sign, digits, symbol),
    }
}

pub fn format_integer(value: &CellValue) -> String {
    integer_with(value, ',')
}

pub fn format_float(value: &CellValue, decimals: usize) -> String {
    float_with(value, decimals, ',')
}

/// Integers are grouped without decimals; everything numeric else gets
/// `decimals` places.
pub fn format_number(value: &CellValue, decimals: usize) -> String {
    if integral(value).is_some() {
        format_integer(value)
    } else {
        format_float(value, decimals)
    }
}

pub fn format_currency(
    value: &CellValue,
    symbol: &str,
    decimals: usize,
    position: CurrencyPosition,
) -> String {
    currency_with(value, symbol, decimals, position, ',')
}

/// The value is already a percentage: `45.5` becomes `45.5%`.
pub fn format_percentage(value: &CellValue, decimals: usize) -> String {
    match numeric(value) {
        Some(f) => format!("{:.*}%", decimals, f),
        None => value.to_string(),
    }
}

fn parse_datetime(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Int(secs) => DateTime::from_timestamp(*secs, 0).map(|dt| dt.naive_utc()),
        CellValue::Float(secs) if secs.is_finite() => {
            let whole = secs.trunc();
            let nanos = ((secs - whole) * 1e9).round() as u32;
            DateTime::from_timestamp(whole as i64, nanos).map(|dt| dt.naive_utc())
        }
        CellValue::Str(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.naive_local());
            }
            if let Some(dt) = DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
            {
                return Some(dt);
            }
            if let Some(date) = DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
            {
                return date.and_hms_opt(0, 0, 0);
            }
            if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                return s
                    .parse()
                    .ok()
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
                    .map(|dt| dt.naive_utc());
            }
            None
        }
        _ => None,
    }
}

fn try_format(dt: &NaiveDateTime, fmt: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", dt.format(fmt)).ok()?;
    Some(out)
}

/// Render a date-like value with a strftime pattern. Values that do not
/// parse, and patterns chrono rejects, yield the value's own text.
pub fn format_date(value: &CellValue, fmt: &str) -> String {
    parse_datetime(value)
        .and_then(|dt| try_format(&dt, fmt))
        .unwrap_or_else(|| value.to_string())
}

pub fn format_datetime(dt: &NaiveDateTime, fmt: &str) -> String {
    try_format(dt, fmt).unwrap_or_else(|| dt.to_string())
}

pub fn format_boolean(value: &CellValue) -> String {
    let flag = match value {
        CellValue::Bool(b) => Some(*b),
        CellValue::Int(1) => Some(true),
        CellValue::Int(0) => Some(false),
        CellValue::Str(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "enabled" => Some(true),
            "false" | "0" | "no" | "off" | "disabled" => Some(false),
            _ => None,
        },
        _ => None,
    };
    match flag {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => value.to_string(),
    }
}

/// Binary units; whole bytes never carry decimals.
pub fn format_file_size(bytes: u64, precision: usize) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.*} {}", precision, size, SIZE_UNITS[unit])
}

/// Two most significant units: `3900` is `1h 5m`, `3600` is `1h`.
pub fn format_duration(seconds: u64) -> String {
    let Some(lead) = DURATION_UNITS.iter().position(|(unit, _)| seconds >= *unit) else {
        return "0s".to_string();
    };

    let (unit, suffix) = DURATION_UNITS[lead];
    let mut out = format!("{}{}", seconds / unit, suffix);
    if let Some((next, next_suffix)) = DURATION_UNITS.get(lead + 1) {
        let rest = (seconds % unit) / next;
        if rest > 0 {
            out.push_str(&format!(" {}{}", rest, next_suffix));
        }
    }
    out
}

pub fn format_email(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn format_url(text: &str) -> String {
    let trimmed = text.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

pub fn format_phone(text: &str) -> String {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => format!(
            "+1 ({}) {}-{}",
            &digits[1..4],
            &digits[4..7],
            &digits[7..]
        ),
        _ => text.to_string(),
    }
}

/// `in_progress` becomes `⏳ In progress`; unknown keywords get a bullet.
pub fn format_status(text: &str) -> String {
    let key = text.trim().to_lowercase();
    let icon = STATUS_ICONS
        .iter()
        .find(|(_, keywords)| keywords.contains(&key.as_str()))
        .map(|(icon, _)| *icon)
        .unwrap_or(STATUS_DEFAULT_ICON);

    let label = key.replace('_', " ");
    let mut chars = label.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{} {}", icon, label)
}

/// Word-aware truncation for formatter-level use.
pub fn smart_truncate(text: &str, max: usize, ellipsis: &str) -> String {
    truncate_to_width(text, max, ellipsis, true)
}
