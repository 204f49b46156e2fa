#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub fn unexpected_input(input: &str) -> String {
    if input.is_empty() {
        "行の途中で入力が終わっています".to_string()
    } else {
        format!("解釈できない入力: {input}")
    }
}

#[cfg(feature = "ja")]
pub fn incomplete_input() -> String {
    "入力が不完全です".to_string()
}

#[cfg(not(feature = "ja"))]
pub fn unexpected_input(input: &str) -> String {
    if input.is_empty() {
        "unexpected end of line".to_string()
    } else {
        format!("unexpected input: {input}")
    }
}

#[cfg(not(feature = "ja"))]
pub fn incomplete_input() -> String {
    "incomplete input".to_string()
}
