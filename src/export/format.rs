//! German-locale number formatting for reports and terminal output.
//!
//! Grouping uses `.` and decimals use `,` (e.g. `1.548,89`). Rounding here is
//! for display only.

/// Formats an amount as whole euros, e.g. `316.241 €`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_euro(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let rounded = value.round();
    format!("{}{} €", sign(rounded), group_thousands(rounded.abs() as u64))
}

/// Formats a fraction as a percentage with two decimals, e.g. `63,25 %`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "n/a".to_string();
    }
    let hundredths = (fraction * 10_000.0).round();
    let abs = hundredths.abs() as u64;
    format!(
        "{}{},{:02} %",
        sign(hundredths),
        group_thousands(abs / 100),
        abs % 100
    )
}

/// Formats a number with at most two decimals, e.g. `19,87` or `1.548,9`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let hundredths = (value * 100.0).round();
    let abs = hundredths.abs() as u64;
    let whole = group_thousands(abs / 100);
    let cents = abs % 100;

    let digits = if cents == 0 {
        whole
    } else if cents % 10 == 0 {
        format!("{},{}", whole, cents / 10)
    } else {
        format!("{},{:02}", whole, cents)
    };
    format!("{}{}", sign(hundredths), digits)
}

fn sign(rounded: f64) -> &'static str {
    if rounded < 0.0 {
        "-"
    } else {
        ""
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
