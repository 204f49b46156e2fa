use rust_decimal::Decimal;
use warikan_domain::{FairShare, Money};
use warikan_i18n as i18n;

/// `1234567` -> `1,234,567`.
pub fn format_amount(money: Money) -> String {
    let value = money.amount();
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Amount with the locale currency suffix.
pub fn format_currency(money: Money) -> String {
    i18n::currency(format_amount(money))
}

/// Balance with an explicit `+` for creditors.
pub fn format_balance(money: Money) -> String {
    let sign = if money.is_positive() { "+" } else { "" };
    format!("{sign}{}", format_currency(money))
}

/// Fair share as shown to people: rounded up to a whole unit, with the exact
/// value appended when it has a fractional part.
pub fn format_fair_share(share: FairShare) -> String {
    let ceil = format_currency(share.ceil());
    if share.is_whole() {
        ceil
    } else {
        format!("{ceil} ({})", format_exact(share.exact()))
    }
}

fn format_exact(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}
