use std::fmt;

/// Format a balance as a human-readable currency string.
/// Example: 100.0 -> "100.00", -12.345 -> "-12.35"
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Parse a decimal string into a currency amount.
/// Example: "50.00" -> 50.0, "12.5" -> 12.5, "100" -> 100.0
///
/// Empty input is rejected rather than defaulting to zero, so callers can
/// distinguish a blank form field from an explicit "0".
pub fn parse_amount(input: &str) -> Result<f64, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    input
        .parse::<f64>()
        .map_err(|_| ParseAmountError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "empty amount"),
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
