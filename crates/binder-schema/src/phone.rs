/// Formats free-form phone input as a US number, `(123) 456-7890`.
///
/// Non-digits are dropped and at most ten digits are kept. Partial input is
/// formatted progressively so it can be applied while someone is typing.
pub fn format_phone_number(value: &str) -> String {
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(10)
        .collect();

    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({digits}"),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}
