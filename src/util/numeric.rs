//! C-style numeric conversions for option arguments.
//!
//! Option values are coerced, not validated: each parser consumes the
//! longest valid prefix and yields 0 when there is none, the way `strtol`
//! and `atof` behave.

/// Parse an integer with automatic base detection.
///
/// Accepts leading whitespace and a sign, then `0x`/`0X` for hexadecimal, a
/// leading `0` for octal, or decimal. Out-of-range values saturate.
pub fn parse_int_auto(text: &str) -> i64 {
    let (negative, digits) = split_sign(text.trim_start());

    let (radix, digits) = match digits.as_bytes() {
        [b'0', b'x' | b'X', d, ..] if d.is_ascii_hexdigit() => (16, &digits[2..]),
        [b'0', ..] => (8, digits),
        _ => (10, digits),
    };

    accumulate(digits, radix, negative)
}

/// Parse a decimal integer, like `atoi`.
pub fn parse_int_decimal(text: &str) -> i64 {
    let (negative, digits) = split_sign(text.trim_start());
    accumulate(digits, 10, negative)
}

/// Parse a floating point number independent of the process locale.
pub fn parse_float(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    // inf, infinity, nan
    let word = &text[end..];
    for special in ["infinity", "inf", "nan"] {
        if word
            .get(..special.len())
            .is_some_and(|w| w.eq_ignore_ascii_case(special))
        {
            return text[..end + special.len()].parse().unwrap_or(0.0);
        }
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn accumulate(digits: &str, radix: u32, negative: bool) -> i64 {
    let mut value: i128 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        value = value * i128::from(radix) + i128::from(d);
        // past i64 range; keep consuming digits without growing
        if value > i128::from(i64::MAX) + 1 {
            value = i128::from(i64::MAX) + 1;
        }
    }
    let signed = if negative { -value } else { value };
    signed.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
