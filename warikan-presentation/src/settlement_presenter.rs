use crate::{
    format::{format_balance, format_currency, format_fair_share},
    text_table::{Alignment, TextTableBuilder},
};
use std::borrow::Cow;
use warikan_domain::{Settlement, Transfer};
use warikan_i18n as i18n;

pub struct SettlementPresenter;

pub struct SettlementView {
    pub overview: String,
    pub balance_table: String,
    /// One `debtor → creditor: amount` line per transfer, in engine order.
    pub transfer_lines: Vec<String>,
}

impl SettlementView {
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{}\n{}\n\n{}",
            self.overview,
            self.balance_table,
            i18n::SETTLEMENT_HEADER
        );
        if self.transfer_lines.is_empty() {
            text.push('\n');
            text.push_str(i18n::ALREADY_SETTLED);
        }
        for line in &self.transfer_lines {
            text.push('\n');
            text.push_str(line);
        }
        text
    }
}

impl SettlementPresenter {
    pub fn render(settlement: &Settlement) -> SettlementView {
        SettlementView {
            overview: format!(
                "{}: {} / {}: {}",
                i18n::TOTAL_SPENT,
                format_currency(settlement.total_spent),
                i18n::FAIR_SHARE,
                format_fair_share(settlement.fair_share)
            ),
            balance_table: Self::build_balance_table(settlement),
            transfer_lines: settlement.transfers.iter().map(format_transfer).collect(),
        }
    }

    pub fn build_balance_table(settlement: &Settlement) -> String {
        TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::PARTICIPANT),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::BALANCE),
            ])
            .rows(settlement.balances.iter().map(|entry| {
                [
                    Cow::Borrowed(entry.name.as_str()),
                    Cow::Owned(format_currency(entry.paid)),
                    Cow::Owned(format_balance(entry.balance)),
                ]
            }))
            .build()
    }
}

pub fn format_transfer(transfer: &Transfer) -> String {
    format!(
        "{} → {}: {}",
        transfer.from,
        transfer.to,
        format_currency(transfer.amount)
    )
}
