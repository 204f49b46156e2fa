#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

use std::fmt::Display;

#[cfg(feature = "ja")]
pub mod strings {
    pub const PARTICIPANT: &str = "参加者";
    pub const PAID: &str = "支払額";
    pub const BALANCE: &str = "収支";
    pub const AMOUNT: &str = "金額";
    pub const MEMO: &str = "メモ";
    pub const PAYER: &str = "立替者";
    pub const TOTAL_SPENT: &str = "合計";
    pub const FAIR_SHARE: &str = "1人あたり";
    pub const PAYMENT_COUNT: &str = "支払件数";
    pub const CURRENCY_SUFFIX: &str = "円";
    pub const SETTLEMENT_HEADER: &str = "清算方法";
    pub const ALREADY_SETTLED: &str = "全員の収支が0です。清算は不要です。";
    pub const NO_PAYMENTS_RECORDED: &str = "支払いはまだ記録されていません。";
    pub const NO_PARTICIPANTS: &str = "参加者が登録されていません。";
    pub const EMPTY_NAME: &str = "名前を入力してください";
    pub const EMPTY_PAYER: &str = "立替者を指定してください";
    pub const NO_PAYMENTS_TO_SETTLE: &str = "清算する支払いがありません";
    pub const TOTAL_OVERFLOW: &str = "支払いの合計が扱える範囲を超えています";
    pub const SPLIT_NO_PEOPLE: &str = "人数は1人以上を指定してください";
    pub const SPLIT_OVERFLOW: &str = "割り勘の金額が扱える範囲を超えています";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const PARTICIPANT: &str = "Participant";
    pub const PAID: &str = "Paid";
    pub const BALANCE: &str = "Balance";
    pub const AMOUNT: &str = "Amount";
    pub const MEMO: &str = "Memo";
    pub const PAYER: &str = "Payer";
    pub const TOTAL_SPENT: &str = "Total";
    pub const FAIR_SHARE: &str = "Per person";
    pub const PAYMENT_COUNT: &str = "Payments";
    pub const CURRENCY_SUFFIX: &str = " yen";
    pub const SETTLEMENT_HEADER: &str = "Settlement";
    pub const ALREADY_SETTLED: &str = "Everyone is even. Nothing to settle.";
    pub const NO_PAYMENTS_RECORDED: &str = "No payments recorded yet.";
    pub const NO_PARTICIPANTS: &str = "No participants registered.";
    pub const EMPTY_NAME: &str = "Name must not be empty";
    pub const EMPTY_PAYER: &str = "Payer must not be empty";
    pub const NO_PAYMENTS_TO_SETTLE: &str = "There are no payments to settle";
    pub const TOTAL_OVERFLOW: &str = "Payment total exceeds the supported range";
    pub const SPLIT_NO_PEOPLE: &str = "Number of people must be at least 1";
    pub const SPLIT_OVERFLOW: &str = "Split amount exceeds the supported range";
}

pub use strings::*;

#[cfg(feature = "ja")]
mod messages {
    use std::fmt::Display;

    pub fn participants_added(names: impl Display) -> String {
        format!("参加者を追加しました: {names}")
    }

    pub fn participant_removed(name: impl Display, removed_payments: usize) -> String {
        if removed_payments == 0 {
            format!("{name} さんを削除しました")
        } else {
            format!("{name} さんと支払い {removed_payments} 件を削除しました")
        }
    }

    pub fn payment_recorded(position: usize, payer: impl Display, amount: impl Display) -> String {
        format!("#{position} {payer} さんの立て替え {amount} を記録しました")
    }

    pub fn payment_edited(position: usize, payer: impl Display, amount: impl Display) -> String {
        format!("#{position} を {payer} さんの {amount} に修正しました")
    }

    pub fn payment_deleted(position: usize) -> String {
        format!("#{position} を削除しました")
    }

    pub fn payments_cleared(count: usize) -> String {
        format!("支払い {count} 件をリセットしました")
    }

    pub fn even_split(
        people: u32,
        per_person: impl Display,
        collected: impl Display,
        surplus: impl Display,
    ) -> String {
        format!("{people} 人で割り勘: 1人 {per_person} (集金 {collected}, 余り {surplus})")
    }

    pub fn duplicate_participant(name: impl Display) -> String {
        format!("{name} さんは既に登録されています")
    }

    pub fn unknown_participant(name: impl Display) -> String {
        format!("{name} さんは登録されていません")
    }

    pub fn non_positive_amount(amount: i64) -> String {
        format!("金額は正の数で入力してください (入力値: {amount})")
    }

    pub fn payment_not_found(position: usize, len: usize) -> String {
        format!("支払い #{position} は存在しません (記録 {len} 件)")
    }

    pub fn too_few_participants(count: usize) -> String {
        format!("清算には2人以上の参加者が必要です (現在 {count} 人)")
    }

    pub fn unknown_payer(name: impl Display) -> String {
        format!("支払い記録に未登録の参加者 {name} が含まれています")
    }

    pub fn split_non_positive_total(total: i64) -> String {
        format!("合計金額は正の数で入力してください (入力値: {total})")
    }

    pub fn split_invalid_unit(unit: i64) -> String {
        format!("端数の単位は正の数である必要があります (設定値: {unit})")
    }

    pub fn at_line(line: usize, message: impl Display) -> String {
        format!("行 {line}: {message}")
    }
}

#[cfg(not(feature = "ja"))]
mod messages {
    use std::fmt::Display;

    pub fn participants_added(names: impl Display) -> String {
        format!("Added participants: {names}")
    }

    pub fn participant_removed(name: impl Display, removed_payments: usize) -> String {
        match removed_payments {
            0 => format!("Removed {name}"),
            1 => format!("Removed {name} and 1 payment"),
            n => format!("Removed {name} and {n} payments"),
        }
    }

    pub fn payment_recorded(position: usize, payer: impl Display, amount: impl Display) -> String {
        format!("#{position} recorded: {payer} paid {amount}")
    }

    pub fn payment_edited(position: usize, payer: impl Display, amount: impl Display) -> String {
        format!("#{position} updated: {payer} paid {amount}")
    }

    pub fn payment_deleted(position: usize) -> String {
        format!("#{position} deleted")
    }

    pub fn payments_cleared(count: usize) -> String {
        format!("Cleared {count} payment(s)")
    }

    pub fn even_split(
        people: u32,
        per_person: impl Display,
        collected: impl Display,
        surplus: impl Display,
    ) -> String {
        format!(
            "Split among {people}: {per_person} each (collected {collected}, surplus {surplus})"
        )
    }

    pub fn duplicate_participant(name: impl Display) -> String {
        format!("'{name}' is already registered")
    }

    pub fn unknown_participant(name: impl Display) -> String {
        format!("'{name}' is not registered")
    }

    pub fn non_positive_amount(amount: i64) -> String {
        format!("Amount must be positive (got {amount})")
    }

    pub fn payment_not_found(position: usize, len: usize) -> String {
        format!("Payment #{position} does not exist ({len} recorded)")
    }

    pub fn too_few_participants(count: usize) -> String {
        format!("Settlement needs at least 2 participants (got {count})")
    }

    pub fn unknown_payer(name: impl Display) -> String {
        format!("A payment references unregistered participant '{name}'")
    }

    pub fn split_non_positive_total(total: i64) -> String {
        format!("Total must be positive (got {total})")
    }

    pub fn split_invalid_unit(unit: i64) -> String {
        format!("Rounding unit must be positive (configured {unit})")
    }

    pub fn at_line(line: usize, message: impl Display) -> String {
        format!("Line {line}: {message}")
    }
}

pub use messages::*;

pub struct SyntaxErrorMessage {
    line: usize,
    detail: String,
}

pub fn syntax_error(line: usize, detail: String) -> SyntaxErrorMessage {
    SyntaxErrorMessage { line, detail }
}

#[cfg(feature = "ja")]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "行 {} で構文エラー: {}", self.line, self.detail)
    }
}

#[cfg(not(feature = "ja"))]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at line {}: {}", self.line, self.detail)
    }
}

/// Appends the locale's currency suffix to an already formatted amount.
pub fn currency(amount: impl Display) -> String {
    format!("{amount}{CURRENCY_SUFFIX}")
}
