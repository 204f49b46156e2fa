#![warn(clippy::uninlined_format_args)]

mod i18n;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_until, take_while1},
    character::complete::{char, digit1, multispace1, one_of, u32},
    combinator::{eof, map_res, opt, recognize, verify},
    error::ErrorKind,
    multi::{many0, many1},
    sequence::{delimited, preceded, terminated},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLine<'a> {
    pub payer: &'a str,
    /// Signed so that a typed `-500` reaches validation instead of failing
    /// to parse.
    pub amount: i64,
    pub memo: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Payments,
    Summary,
    Settle,
    Split { total: i64, people: u32 },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    Add(Vec<&'a str>),
    Remove(&'a str),
    Payment(PaymentLine<'a>),
    Edit {
        position: usize,
        payment: PaymentLine<'a>,
    },
    Delete {
        position: usize,
    },
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementWithLine<'a> {
    pub line: usize,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program<'a> {
    pub statements: Vec<StatementWithLine<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at line {line}: {detail}")]
    SyntaxError { line: usize, detail: String },
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-' || is_japanese_char(c))(input)
}

fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' | // Hiragana
        '\u{30A0}'..='\u{30FF}' | // Katakana
        '\u{4E00}'..='\u{9FFF}' | // Kanji
        '\u{3400}'..='\u{4DBF}'   // Kanji extension
    )
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c| c == '"'), char('"')),
        delimited(char('「'), take_till(|c| c == '」'), char('」')),
    ))
    .parse(input)
}

fn name(input: &str) -> IResult<&str, &str> {
    alt((quoted, identifier)).parse(input)
}

fn blank(input: &str) -> IResult<&str, &str> {
    fn fullwidth_space(input: &str) -> IResult<&str, &str> {
        take_while1(|c: char| c == '\u{3000}')(input)
    }

    fn comment(input: &str) -> IResult<&str, &str> {
        delimited(tag("/*"), take_until("*/"), tag("*/")).parse(input)
    }

    fn line_comment(input: &str) -> IResult<&str, &str> {
        recognize((tag("//"), take_till(|c| c == '\n'))).parse(input)
    }

    alt((multispace1, fullwidth_space, comment, line_comment)).parse(input)
}

fn sp(input: &str) -> IResult<&str, &str> {
    recognize(many0(blank)).parse(input)
}

fn sp1(input: &str) -> IResult<&str, &str> {
    recognize(many1(blank)).parse(input)
}

fn whole<'a, O>(
    parser: impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>> {
    terminated(parser, (sp, eof))
}

// 1000 or 1,000
fn number(input: &str) -> IResult<&str, i64> {
    map_res(
        recognize((digit1, many0((char(','), digit1)))),
        |digits: &str| digits.replace(',', "").parse::<i64>(),
    )
    .parse(input)
}

fn yen_unit(input: &str) -> IResult<&str, &str> {
    alt((tag("円"), tag("えん"), tag_no_case("yen"))).parse(input)
}

fn yen(input: &str) -> IResult<&str, i64> {
    (
        opt(char('-')),
        opt(alt((char('¥'), char('￥')))),
        number,
        opt((sp, yen_unit)),
    )
        .map(|(sign, _, amount, _)| if sign.is_some() { -amount } else { amount })
        .parse(input)
}

// Free text up to the end of the line or the first comment.
fn free_text(input: &str) -> IResult<&str, &str> {
    let end = [input.find("//"), input.find("/*")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(input.len());
    let text = input[..end].trim_end();
    if text.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::TakeUntil,
        )));
    }
    Ok((&input[text.len()..], text))
}

fn memo(input: &str) -> IResult<&str, &str> {
    alt((quoted, free_text)).parse(input)
}

fn position(input: &str) -> IResult<&str, usize> {
    preceded(
        char('#'),
        verify(map_res(digit1, str::parse::<usize>), |position| {
            *position >= 1
        }),
    )
    .parse(input)
}

fn paid_en(input: &str) -> IResult<&str, &str> {
    tag_no_case("paid").parse(input)
}

fn paid_ja(input: &str) -> IResult<&str, &str> {
    alt((
        tag("立て替えた"),
        tag("たてかえた"),
        tag("支払った"),
        tag("払った"),
    ))
    .parse(input)
}

// {payer} paid {amount} [for {memo}]
fn payment_en(input: &str) -> IResult<&str, PaymentLine<'_>> {
    (
        name,
        sp1,
        paid_en,
        sp1,
        yen,
        opt((sp1, tag_no_case("for"), sp1, memo)),
    )
        .map(|(payer, _, _, _, amount, memo)| PaymentLine {
            payer,
            amount,
            memo: memo.map(|(_, _, _, memo)| memo),
        })
        .parse(input)
}

// {payer} が {amount} 立て替えた [{memo}]
fn payment_ja(input: &str) -> IResult<&str, PaymentLine<'_>> {
    (
        name,
        sp,
        tag("が"),
        sp,
        yen,
        sp,
        paid_ja,
        opt(preceded(sp1, memo)),
    )
        .map(|(payer, _, _, _, amount, _, _, memo)| PaymentLine {
            payer,
            amount,
            memo,
        })
        .parse(input)
}

fn payment(input: &str) -> IResult<&str, PaymentLine<'_>> {
    alt((payment_ja, payment_en)).parse(input)
}

fn add(input: &str) -> IResult<&str, Vec<&str>> {
    fn separator(input: &str) -> IResult<&str, &str> {
        alt((recognize((sp, one_of(",、，"), sp)), sp1)).parse(input)
    }

    (
        alt((tag_no_case("add"), tag("参加"))),
        sp1,
        name,
        many0(preceded(separator, name)),
    )
        .map(|(_, _, first, rest)| {
            let mut names = Vec::with_capacity(rest.len() + 1);
            names.push(first);
            names.extend(rest);
            names
        })
        .parse(input)
}

fn remove(input: &str) -> IResult<&str, &str> {
    preceded((alt((tag_no_case("remove"), tag("削除"))), sp1), name).parse(input)
}

fn edit(input: &str) -> IResult<&str, (usize, PaymentLine<'_>)> {
    (
        alt((tag_no_case("edit"), tag("修正"))),
        sp,
        position,
        sp1,
        payment,
    )
        .map(|(_, _, position, _, payment)| (position, payment))
        .parse(input)
}

fn delete(input: &str) -> IResult<&str, usize> {
    preceded((alt((tag_no_case("delete"), tag("取消"))), sp), position).parse(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((
        alt((tag_no_case("!payments"), tag("!支払一覧"))).map(|_| Command::Payments),
        alt((tag_no_case("!summary"), tag("!集計"))).map(|_| Command::Summary),
        alt((tag_no_case("!settle"), tag("!清算"))).map(|_| Command::Settle),
        alt((tag_no_case("!reset"), tag("!リセット"))).map(|_| Command::Reset),
        (
            alt((tag_no_case("!split"), tag("!割り勘"))),
            sp1,
            yen,
            sp1,
            u32,
            opt((sp, alt((tag("人"), tag_no_case("people"))))),
        )
            .map(|(_, _, total, _, people, _)| Command::Split { total, people }),
    ))
    .parse(input)
}

fn statement(input: &str) -> IResult<&str, Statement<'_>> {
    alt((
        whole(command).map(Statement::Command),
        whole(edit).map(|(position, payment)| Statement::Edit { position, payment }),
        whole(delete).map(|position| Statement::Delete { position }),
        whole(add).map(Statement::Add),
        whole(remove).map(Statement::Remove),
        whole(payment).map(Statement::Payment),
    ))
    .parse(input)
}

fn syntax_error_detail(err: nom::Err<nom::error::Error<&str>>) -> String {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => i18n::unexpected_input(e.input.trim()),
        nom::Err::Incomplete(_) => i18n::incomplete_input(),
    }
}

/// Parses a script, one statement per line. Blank and comment-only lines are
/// skipped; the first malformed line aborts with its 1-based line number.
pub fn parse_program(input: &str) -> Result<Program<'_>, ParseError> {
    let mut statements = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let (rest, _) = sp(line).map_err(|e| ParseError::SyntaxError {
            line: idx + 1,
            detail: syntax_error_detail(e),
        })?;
        if rest.trim().is_empty() {
            continue;
        }
        match statement(rest) {
            Ok((_, statement)) => statements.push(StatementWithLine {
                line: idx + 1,
                statement,
            }),
            Err(e) => {
                return Err(ParseError::SyntaxError {
                    line: idx + 1,
                    detail: syntax_error_detail(e),
                });
            }
        }
    }

    Ok(Program { statements })
}
