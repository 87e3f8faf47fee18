//! Free-form numeric text handling.
//!
//! Text fields accept whatever the operator types. A value is read from the
//! longest leading numeric prefix (trailing garbage is ignored), and values
//! are written back in the shortest form that reads back to the same number.

/// Parse the longest valid numeric prefix of `raw`.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fractional part, an optional exponent, or `Infinity`. Anything
/// after the prefix is ignored, so `"12abc"` reads as `12` and `"1e"` reads
/// as `1`. Returns `None` when no digits lead the string.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parse `raw` and keep the result only if it is finite.
pub fn parse_finite(raw: &str) -> Option<f64> {
    parse_float_prefix(raw).filter(|v| v.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Canonical display string for a value.
///
/// Shortest round-trip digits, `0` for both zeroes, and exponent notation
/// (with an explicit `+` on positive exponents) outside `1e-6..1e21`.
pub fn canonical_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let s = format!("{value:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    value.to_string()
}

/// Round to two decimal places, the precision slider values are committed at.
///
/// Rounds the exact decimal expansion of `value`, so `1.005` (stored just
/// below the tie) becomes `1.00`. Exact ties round away from zero.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = value * 100.0;
    // Exact hundredths ties are multiples of 1/8, where `scaled` is exact.
    if scaled.fract().abs() == 0.5 && (value * 8.0).fract() == 0.0 {
        return scaled.round() / 100.0;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}
