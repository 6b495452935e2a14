//! Amount formatting behind a swappable interface.
//!
//! Aggregation works on plain integers; only the presentation layer turns
//! them into strings such as `$1,234`.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> &str {
        symbol_for(self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Digit grouping of a display locale. Amounts are whole units, so no
/// decimal separator is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            grouping_separator: ',',
        }
    }
}

impl LocaleConfig {
    /// Grouping for a handful of known tags; anything else gets the `en-US`
    /// comma under its own tag.
    pub fn for_tag(tag: &str) -> Self {
        let grouping_separator = match tag {
            "de-DE" | "es-ES" | "it-IT" | "pt-BR" => '.',
            "fr-FR" => '\u{202f}',
            "de-CH" => '\'',
            _ => ',',
        };
        Self {
            language_tag: tag.to_string(),
            grouping_separator,
        }
    }
}

pub fn symbol_for(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "TWD" => "NT$",
        "AUD" => "A$",
        _ => code,
    }
}

/// Formats whole amounts for display.
pub trait AmountFormatter {
    fn format_amount(&self, amount: u64) -> String;
}

/// Leading currency symbol followed by the grouped integer, e.g. `$1,234`.
#[derive(Debug, Clone, Default)]
pub struct CurrencyFormatter {
    pub locale: LocaleConfig,
    pub currency: CurrencyCode,
}

impl CurrencyFormatter {
    pub fn new(locale: LocaleConfig, currency: CurrencyCode) -> Self {
        Self { locale, currency }
    }
}

impl AmountFormatter for CurrencyFormatter {
    fn format_amount(&self, amount: u64) -> String {
        format!(
            "{}{}",
            self.currency.symbol(),
            format_number(&self.locale, amount)
        )
    }
}

pub fn format_number(locale: &LocaleConfig, value: u64) -> String {
    group_digits(&value.to_string(), locale.grouping_separator)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.chars().count();
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
