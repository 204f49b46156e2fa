use crate::{
    format::{format_balance, format_currency, format_fair_share},
    text_table::{Alignment, TextTableBuilder},
};
use rust_decimal::RoundingStrategy;
use std::borrow::Cow;
use warikan_application::LedgerSummary;
use warikan_domain::{FairShare, Money, Payment};
use warikan_i18n as i18n;

pub struct LedgerPresenter;

impl LedgerPresenter {
    /// Payment log with the 1-based positions used by `edit` and `delete`.
    pub fn render_payments(payments: &[Payment]) -> String {
        if payments.is_empty() {
            return i18n::NO_PAYMENTS_RECORDED.to_string();
        }

        TextTableBuilder::new()
            .alignments(&[
                Alignment::Right,
                Alignment::Left,
                Alignment::Right,
                Alignment::Left,
            ])
            .headers(&[
                Cow::Borrowed("#"),
                Cow::Borrowed(i18n::PAYER),
                Cow::Borrowed(i18n::AMOUNT),
                Cow::Borrowed(i18n::MEMO),
            ])
            .rows(payments.iter().enumerate().map(|(index, payment)| {
                [
                    Cow::Owned((index + 1).to_string()),
                    Cow::Borrowed(payment.payer().as_str()),
                    Cow::Owned(format_currency(payment.amount())),
                    Cow::Borrowed(payment.memo()),
                ]
            }))
            .build()
    }

    pub fn render_summary(summary: &LedgerSummary) -> String {
        let Some(share) = summary.fair_share else {
            return i18n::NO_PARTICIPANTS.to_string();
        };

        let table = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::PARTICIPANT),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::BALANCE),
            ])
            .rows(summary.paid.iter().map(|(name, paid)| {
                [
                    Cow::Borrowed(name.as_str()),
                    Cow::Owned(format_currency(*paid)),
                    Cow::Owned(format_indicative_balance(*paid, share)),
                ]
            }))
            .build();

        format!(
            "{}: {}\n{}: {}\n{}: {}\n{table}",
            i18n::TOTAL_SPENT,
            format_currency(summary.total_spent),
            i18n::PAYMENT_COUNT,
            summary.payment_count,
            i18n::FAIR_SHARE,
            format_fair_share(share),
        )
    }
}

// Per-person view only; the settlement engine owns the zero-sum rounding.
fn format_indicative_balance(paid: Money, share: FairShare) -> String {
    let rounded = (paid.as_decimal() - share.exact())
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    i64::try_from(rounded)
        .map(|units| format_balance(Money::from_i64(units)))
        .unwrap_or_else(|_| rounded.to_string())
}
