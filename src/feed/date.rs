use chrono::{NaiveDate, TimeDelta};

/// Date returned whenever a feed date cannot be parsed.
pub const FLOOR_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(d) => d,
    None => panic!("floor date out of range"),
};

/// Month names accepted at token index 2, January first.
pub const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Parses a feed date of the form `"13 de enero 2026"`.
///
/// The connector at index 1 is not checked. When the year token is missing
/// the month-name token is reused as the year, which can never be numeric, so
/// `"13 de enero"` resolves to [`FLOOR_DATE`] like every other unparsable
/// input. Day values outside the month roll over into the neighbouring month.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use feedwall::feed::{parse_date, FLOOR_DATE};
///
/// assert_eq!(parse_date("13 de enero 2026"), NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
/// assert_eq!(parse_date("13 de enero"), FLOOR_DATE);
/// assert_eq!(parse_date(""), FLOOR_DATE);
/// ```
pub fn parse_date(s: &str) -> NaiveDate {
    try_parse(s).unwrap_or(FLOOR_DATE)
}

fn try_parse(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }

    let day = leading_integer(parts[0])?;
    let month = month_index(parts[2])?;
    let year = leading_integer(parts.get(3).copied().unwrap_or(parts[2]))?;

    compose(year, month, day)
}

fn month_index(token: &str) -> Option<u32> {
    let lower = token.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == lower)
        .and_then(|i| u32::try_from(i).ok())
}

/// Integer prefix of a token: optional sign then ASCII digits, rest ignored.
fn leading_integer(token: &str) -> Option<i64> {
    let token = token.trim_start();
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Builds a calendar date the lenient way: two-digit years are 19xx and the
/// day is an offset from the first of the month.
fn compose(year: i64, month0: u32, day: i64) -> Option<NaiveDate> {
    let year = if (0..=99).contains(&year) {
        year + 1900
    } else {
        year
    };
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month0 + 1, 1)?;
    let offset = TimeDelta::try_days(day.checked_sub(1)?)?;
    first.checked_add_signed(offset)
}
