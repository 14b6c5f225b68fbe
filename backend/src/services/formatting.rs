//! Numeric rounding and fixed-precision rendering shared by the narrative
//! generators.
//!
//! [`round_to`] scales, rounds and scales back, so `64.45` becomes `64.5`.
//! [`to_fixed`] instead rounds the exact binary value of its input: `1.45`
//! is stored as `1.4499999999999999556`, so it renders as `"1.4"`, while an
//! exact tie such as `62.25` renders as `"62.3"`.

/// Largest number of fractional decimal digits in any finite `f64`.
const MAX_FRACTION_DIGITS: usize = 1074;

/// Round `value` to `decimals` decimal places, ties away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Render `value` with exactly `decimals` digits after the point.
///
/// The digit after the last kept one is read from the exact decimal
/// expansion of `value`; five or more rounds the magnitude up. A result that
/// rounds to zero never carries a minus sign.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    let precision = exact_fraction_digits(magnitude).max(decimals + 1);
    let exact = format!("{:.*}", precision, magnitude);
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().take(decimals))
        .map(|b| b - b'0')
        .collect();
    if fraction.as_bytes().get(decimals).is_some_and(|&next| next >= b'5') {
        increment(&mut digits);
    }

    let whole_len = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 && digits.iter().any(|&d| d != 0) {
        out.push('-');
    }
    out.extend(digits[..whole_len].iter().map(|&d| char::from(b'0' + d)));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[whole_len..].iter().map(|&d| char::from(b'0' + d)));
    }
    out
}

/// Fractional decimal digits needed to print `magnitude` without rounding.
fn exact_fraction_digits(magnitude: f64) -> usize {
    let biased_exponent = ((magnitude.to_bits() >> 52) & 0x7ff) as i32;
    if biased_exponent == 0 {
        return MAX_FRACTION_DIGITS;
    }
    (52 - (biased_exponent - 1023)).clamp(0, MAX_FRACTION_DIGITS as i32) as usize
}

fn increment(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}
