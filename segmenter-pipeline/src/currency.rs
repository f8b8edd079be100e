//! Rupiah display formatting for summary tables.

/// Format an amount as Indonesian Rupiah: `Rp` symbol, dot thousands
/// separators, comma decimal separator, two decimal places.
///
/// `format_rupiah(1234567.5)` → `"Rp 1.234.567,50"`.
pub fn format_rupiah(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;

    // Rounding cents can carry into the whole part (e.g. 1.999).
    let (whole, cents) = if cents >= 100 {
        (whole + 1, cents - 100)
    } else {
        (whole, cents)
    };

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    format!("{}Rp {},{:02}", sign, grouped, cents)
}
