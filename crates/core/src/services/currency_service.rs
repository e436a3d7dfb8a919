/// Formats amounts as money in the display currency.
///
/// Always two decimal places, `,` as thousands separator, and the sign in
/// front of the symbol: `-$1,234.50`. Known codes get their symbol
/// (prefix or suffix, as the currency is usually written); unknown codes
/// fall back to the code itself followed by a space.
#[derive(Debug, Clone)]
pub struct CurrencyService {
    currency: String,
}

impl CurrencyService {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.trim().to_uppercase(),
        }
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Format an amount, e.g. `1234.5` → `"$1,234.50"` for USD.
    #[must_use]
    pub fn format(&self, amount: f64) -> String {
        let digits = group_thousands(&format!("{:.2}", amount.abs()));
        // Values that round to zero never show a sign.
        let sign = if amount < 0.0 && digits != "0.00" { "-" } else { "" };

        match symbol_for(&self.currency) {
            Some((symbol, SymbolPosition::Prefix)) => format!("{sign}{symbol}{digits}"),
            Some((symbol, SymbolPosition::Suffix)) => format!("{sign}{digits} {symbol}"),
            None => format!("{sign}{} {digits}", self.currency),
        }
    }

    /// Format a plain ratio with two decimals (no currency symbol).
    #[must_use]
    pub fn format_ratio(&self, ratio: f64) -> String {
        format!("{ratio:.2}")
    }
}

enum SymbolPosition {
    Prefix,
    Suffix,
}

fn symbol_for(code: &str) -> Option<(&'static str, SymbolPosition)> {
    use SymbolPosition::*;
    match code {
        "USD" => Some(("$", Prefix)),
        "EUR" => Some(("€", Prefix)),
        "GBP" => Some(("£", Prefix)),
        "JPY" => Some(("¥", Prefix)),
        "INR" => Some(("₹", Prefix)),
        "CAD" => Some(("CA$", Prefix)),
        "AUD" => Some(("A$", Prefix)),
        "PLN" => Some(("zł", Suffix)),
        _ => None,
    }
}

/// Insert `,` every three digits of the integer part of `"1234567.89"`.
fn group_thousands(fixed: &str) -> String {
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed, ""));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{grouped}.{frac_part}")
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new("USD")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping() {
        assert_eq!(group_thousands("0.00"), "0.00");
        assert_eq!(group_thousands("999.99"), "999.99");
        assert_eq!(group_thousands("1000.00"), "1,000.00");
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
    }
}
