//! Locale-aware display formatting for money and dates
//!
//! Only the two locales the household app ships with are supported. Output
//! follows the conventions of each locale's standard number and date styles:
//!
//! | Locale | Currency       | Date       | Month label      |
//! |--------|----------------|------------|------------------|
//! | pt-BR  | `R$ 1.234,56`  | 31/12/2026 | dezembro de 2026 |
//! | en-US  | `$1,234.56`    | 12/31/2026 | December 2026    |

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[serde(rename = "en-US")]
    EnUs,
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
}

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::PtBr => "pt-BR",
        }
    }

    /// (thousands separator, decimal separator)
    fn separators(&self) -> (char, char) {
        match self {
            Self::EnUs => (',', '.'),
            Self::PtBr => ('.', ','),
        }
    }

    /// Full month name for a 1-based month, or `None` if out of range
    pub fn month_name(&self, month: u32) -> Option<&'static str> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        match self {
            Self::EnUs => MONTHS_EN.get(idx).copied(),
            Self::PtBr => MONTHS_PT.get(idx).copied(),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "en-us" | "en" => Ok(Self::EnUs),
            "pt-br" | "pt" => Ok(Self::PtBr),
            _ => Err(format!("Unknown locale: {} (valid: pt-BR, en-US)", s)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Symbol for a handful of common currency codes, the code itself otherwise
pub fn currency_symbol(code: &str) -> &str {
    match code.to_uppercase().as_str() {
        "BRL" => "R$",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        _ => code,
    }
}

/// Group the integer digits of a non-negative amount and attach two decimals
fn format_number(value: f64, locale: Locale) -> String {
    let (group_sep, decimal_sep) = locale.separators();
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(ch);
    }

    format!("{}{}{}", grouped, decimal_sep, frac)
}

/// Format a monetary amount, e.g. `R$ 1.234,56` or `-$12.00`
pub fn format_currency(value: f64, currency: &str, locale: Locale) -> String {
    if !value.is_finite() {
        return format!("{} {}", currency_symbol(currency), value);
    }

    let number = format_number(value, locale);
    // Don't print "-0,00" for values that round to zero
    let negative = value < 0.0 && number.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    let symbol = currency_symbol(currency);

    match locale {
        Locale::EnUs if symbol.chars().count() == 1 => format!("{}{}{}", sign, symbol, number),
        _ => format!("{}{} {}", sign, symbol, number),
    }
}

/// Short numeric date
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::PtBr => format!("{:02}/{:02}/{}", date.day(), date.month(), date.year()),
        Locale::EnUs => format!("{:02}/{:02}/{}", date.month(), date.day(), date.year()),
    }
}

/// Short numeric date with hours and minutes
pub fn format_date_time(at: NaiveDateTime, locale: Locale) -> String {
    let date = format_date(at.date(), locale);
    match locale {
        Locale::PtBr => format!("{}, {:02}:{:02}", date, at.hour(), at.minute()),
        Locale::EnUs => {
            let (pm, hour) = at.hour12();
            format!(
                "{}, {:02}:{:02} {}",
                date,
                hour,
                at.minute(),
                if pm { "PM" } else { "AM" }
            )
        }
    }
}

/// Long month-and-year label used for month buckets
pub fn month_label(year: i32, month: u32, locale: Locale) -> String {
    let name = locale.month_name(month).unwrap_or("?");
    match locale {
        Locale::PtBr => format!("{} de {}", name, year),
        Locale::EnUs => format!("{} {}", name, year),
    }
}

/// Format a percentage with one decimal, e.g. `8,6%`
pub fn format_percent(value: f64, locale: Locale) -> String {
    let (_, decimal_sep) = locale.separators();
    let fixed = format!("{:.1}", value);
    format!("{}%", fixed.replace('.', &decimal_sep.to_string()))
}
