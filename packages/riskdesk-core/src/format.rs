//! Display formatting for dashboard figures.
//!
//! Grouping follows the en-US convention (comma thousands separator, dot
//! decimal point).

/// Format a number with thousands grouping and at most `max_fraction`
/// decimals, dropping trailing zeros.
pub fn format_grouped(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }

    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let rounds_to_zero = frac_part.is_empty() && int_part.bytes().all(|b| b == b'0');
    let mut out = String::new();
    if value.is_sign_negative() && !rounds_to_zero {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Whole-dollar currency, e.g. `$1,000,000`.
///
/// The sign follows the dollar sign: `$-2,500`.
pub fn format_currency(value: f64) -> String {
    format!("${}", format_grouped(value, 0))
}

/// Duration in years, e.g. `5.20 Yrs`.
pub fn format_duration(years: f64) -> String {
    format!("{:.2} Yrs", years)
}

/// Liquidity score with one decimal, e.g. `72.3`.
pub fn format_liquidity(score: f64) -> String {
    format!("{:.1}", score)
}

/// A value already in percent units, e.g. `60.00%`.
pub fn format_percent(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

/// Loss badge for a signed fractional loss, e.g. `15.00% Loss`.
pub fn format_loss_badge(percentage_loss: f64) -> String {
    format!("{:.2}% Loss", percentage_loss.abs() * 100.0)
}

/// Projected impact as a negative currency magnitude, e.g. `-$150,000`.
pub fn format_loss(pnl: f64) -> String {
    format!("-${}", format_grouped(pnl.abs(), 3))
}

/// Shock-factor magnitude, e.g. `-12,500.5`.
pub fn format_driver(magnitude: f64) -> String {
    format_grouped(magnitude, 3)
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "∞".to_string()
    } else {
        "-∞".to_string()
    }
}
