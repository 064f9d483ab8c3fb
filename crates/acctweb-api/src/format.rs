//! Money formatting for rendered pages

use acctweb_config::{CurrencyConfig, SymbolPosition};
use rust_decimal::Decimal;

fn with_code(number: &str, currency: &CurrencyConfig) -> String {
    match currency.symbol_position {
        SymbolPosition::Before => format!("{} {}", currency.code, number),
        SymbolPosition::After => format!("{} {}", number, currency.code),
    }
}

fn magnitude(amount: Decimal, currency: &CurrencyConfig) -> String {
    acctweb_utils::format_decimal(
        amount.abs(),
        currency.decimal_places,
        &currency.thousands_separator,
        &currency.decimal_separator,
    )
}

/// Amount with currency code, e.g. `AED 18,450.75`
pub fn money(amount: Decimal, currency: &CurrencyConfig) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}{}", sign, with_code(&magnitude(amount, currency), currency))
}

/// Amount with an explicit sign, e.g. `+AED 7,350.00` or `-AED 619.97`
pub fn signed_money(amount: Decimal, currency: &CurrencyConfig) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "+" };
    format!("{}{}", sign, with_code(&magnitude(amount, currency), currency))
}
