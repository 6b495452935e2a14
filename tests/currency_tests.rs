use expense_widget::{
    config::WidgetConfig,
    currency::{format_number, AmountFormatter, CurrencyCode, CurrencyFormatter, LocaleConfig},
};

#[test]
fn default_formatter_uses_dollar_and_commas() {
    let formatter = CurrencyFormatter::default();
    assert_eq!(formatter.format_amount(0), "$0");
    assert_eq!(formatter.format_amount(13), "$13");
    assert_eq!(formatter.format_amount(1234), "$1,234");
    assert_eq!(formatter.format_amount(1_000_000), "$1,000,000");
}

#[test]
fn locale_controls_grouping_separator() {
    let formatter = CurrencyFormatter::new(LocaleConfig::for_tag("de-DE"), CurrencyCode::new("eur"));
    assert_eq!(formatter.format_amount(1234567), "€1.234.567");

    let swiss = LocaleConfig::for_tag("de-CH");
    assert_eq!(format_number(&swiss, 25000), "25'000");
}

#[test]
fn config_builds_matching_formatter() {
    let config = WidgetConfig {
        locale: "zh-TW".into(),
        currency: "TWD".into(),
        ..WidgetConfig::default()
    };
    assert_eq!(config.formatter().format_amount(4500), "NT$4,500");
}

struct PlainUnits;

impl AmountFormatter for PlainUnits {
    fn format_amount(&self, amount: u64) -> String {
        format!("{amount} units")
    }
}

#[test]
fn formatter_can_be_swapped() {
    let formatter: Box<dyn AmountFormatter> = Box::new(PlainUnits);
    assert_eq!(formatter.format_amount(7), "7 units");
}
