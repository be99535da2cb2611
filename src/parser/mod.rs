use std::path::PathBuf;
use std::str::FromStr;
use chrono::NaiveDate;
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{multispace0, multispace1};
use nom::combinator::{eof, map, rest, value};
use nom::sequence::{preceded, terminated};
use nom::{IResult, InputTakeAtPosition};
use rust_decimal::Decimal;

/// A shell command, with amounts and dates already validated.
#[derive(Debug, PartialEq)]
pub(crate) enum Statement {
    /// OPEN account_type amount [date]
    Open(String, Decimal, Option<NaiveDate>),
    Summary,
    /// SELECT account_number
    Select(u32),
    List,
    /// ADD amount [date]
    Add(Decimal, Option<NaiveDate>),
    /// Monthly interest and fees
    Interest,
    /// EXPORT file_path
    Export(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("{0} is not a valid choice")]
    UnknownCommand(String),

    #[error("Please try again with a valid dollar amount.")]
    InvalidAmount(String),

    #[error("Please try again with a valid date in the format YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Please try again with a valid account number.")]
    InvalidAccountNumber(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Command words and their usage, in the order `help` shows them.
pub(crate) const COMMANDS: [(&str, &str); 9] = [
    ("open", "open <savings|checking> <amount> [YYYY-MM-DD]"),
    ("summary", "summary"),
    ("select", "select <account number>"),
    ("list", "list"),
    ("add", "add <amount> [YYYY-MM-DD]"),
    ("interest", "interest"),
    ("export", "export <file.csv>"),
    ("help", "help"),
    ("quit", "quit"),
];

/// Command as typed, before arguments are validated.
#[derive(Debug, Clone, PartialEq)]
enum RawStatement<'a> {
    Open(Vec<&'a str>),
    Summary,
    Select(Vec<&'a str>),
    List,
    Add(Vec<&'a str>),
    Interest,
    Export(&'a str),
    Help,
    Quit,
}

pub(crate) fn parse(input: &str) -> Result<Statement, ParseError> {
    let input = input.trim();
    match command(input) {
        Ok((_, raw)) => resolve(raw),
        Err(_) => Err(ParseError::UnknownCommand(input.to_string())),
    }
}

fn command(input: &str) -> IResult<&str, RawStatement> {
    alt((
        open,
        keyword_only("summary", RawStatement::Summary),
        select,
        keyword_only("list", RawStatement::List),
        add,
        alt((
            keyword_only("interest", RawStatement::Interest),
            keyword_only("fees", RawStatement::Interest),
        )),
        export,
        keyword_only("help", RawStatement::Help),
        alt((
            keyword_only("quit", RawStatement::Quit),
            keyword_only("exit", RawStatement::Quit),
        )),
    ))(input)
}

/// A command word with nothing after it
fn keyword_only<'a>(keyword: &'static str, statement: RawStatement<'a>) -> impl FnMut(&'a str) -> IResult<&'a str, RawStatement<'a>> {
    value(statement, terminated(tag_no_case(keyword), preceded(multispace0, eof)))
}

/// Command word followed by whitespace separated arguments, if any
fn keyword_args<'a>(keyword: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<&'a str>> {
    move |input: &'a str| {
        let (input, _) = tag_no_case(keyword)(input)?;
        let (input, args) = alt((
            map(preceded(multispace0, eof), |_| ""),
            preceded(multispace1, rest),
        ))(input)?;
        Ok((input, args.split_whitespace().collect()))
    }
}

/// open savings 100.00 2024-01-15
fn open(input: &str) -> IResult<&str, RawStatement> {
    map(keyword_args("open"), RawStatement::Open)(input)
}

/// select 1
fn select(input: &str) -> IResult<&str, RawStatement> {
    map(keyword_args("select"), RawStatement::Select)(input)
}

/// add -20.50 2024-01-16
fn add(input: &str) -> IResult<&str, RawStatement> {
    map(keyword_args("add"), RawStatement::Add)(input)
}

/// export './statements/savings.csv'
fn export(input: &str) -> IResult<&str, RawStatement> {
    let (input, _) = tag_no_case("export")(input)?;
    let (file_path, _) = multispace1(input)?;
    let quotation_marks: &[_] = &['\'', '"'];
    Ok(("", RawStatement::Export(file_path.trim().trim_matches(quotation_marks))))
}

fn resolve(raw: RawStatement) -> Result<Statement, ParseError> {
    match raw {
        RawStatement::Open(args) => match args.as_slice() {
            [acct_type, amount] => Ok(Statement::Open(acct_type.to_string(), parse_amount(amount)?, None)),
            [acct_type, amount, date] => Ok(Statement::Open(acct_type.to_string(), parse_amount(amount)?, Some(parse_date(date)?))),
            _ => Err(ParseError::Usage(COMMANDS[0].1)),
        },
        RawStatement::Select(args) => match args.as_slice() {
            [number] => number.parse::<u32>()
                .map(Statement::Select)
                .map_err(|_| ParseError::InvalidAccountNumber(number.to_string())),
            _ => Err(ParseError::Usage(COMMANDS[2].1)),
        },
        RawStatement::Add(args) => match args.as_slice() {
            [amount] => Ok(Statement::Add(parse_amount(amount)?, None)),
            [amount, date] => Ok(Statement::Add(parse_amount(amount)?, Some(parse_date(date)?))),
            _ => Err(ParseError::Usage(COMMANDS[4].1)),
        },
        RawStatement::Export("") => Err(ParseError::Usage(COMMANDS[6].1)),
        RawStatement::Export(file_path) => Ok(Statement::Export(PathBuf::from(file_path))),
        RawStatement::Summary => Ok(Statement::Summary),
        RawStatement::List => Ok(Statement::List),
        RawStatement::Interest => Ok(Statement::Interest),
        RawStatement::Help => Ok(Statement::Help),
        RawStatement::Quit => Ok(Statement::Quit),
    }
}

/// Parse a dollar amount such as `-1,234.50` or `$20` into an exact decimal.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, ParseError> {
    let (sign, digits) = match input.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", input.strip_prefix('+').unwrap_or(input)),
    };
    let digits = digits.strip_prefix('$').unwrap_or(digits).replace(',', "");

    match numeric(&digits) {
        Ok(("", number)) if !number.is_empty() => {
            Decimal::from_str(&format!("{sign}{number}")).map_err(|_| ParseError::InvalidAmount(input.to_string()))
        }
        _ => Err(ParseError::InvalidAmount(input.to_string())),
    }
}

/// Digits and decimal points
fn numeric(input: &str) -> IResult<&str, &str> {
    input.split_at_position_complete(|c: char| !(c.is_ascii_digit() || c == '.'))
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| ParseError::InvalidDate(input.to_string()))
}
