//! Locale-independent numeric field parsing.
//!
//! Each parser reads the longest numeric prefix of a token and reports how
//! many bytes it consumed, so trailing garbage (`1.0f`, `3/4/5`) is left to the
//! caller. Nothing here allocates.

/// Parse a floating point prefix: `[+-] (digits [. digits] | . digits) [(e|E) [+-] digits]`.
///
/// Returns the value and the number of bytes consumed, or `None` if the token
/// does not start with a number.
pub fn parse_real_prefix(token: &str) -> Option<(f64, usize)> {
    let bytes = token.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent is optional; an `e` with no digits after it is not part of the number.
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp.min(bytes.len())..]);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    // The scanned prefix is plain ASCII in Rust float syntax.
    let value = token[..pos].parse::<f64>().ok()?;
    Some((value, pos))
}

/// Parse a signed integer prefix: `[+-] digits`.
pub fn parse_int_prefix(token: &str) -> Option<(i64, usize)> {
    let bytes = token.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    let end = sign + digits;
    let value = token[..end].parse::<i64>().ok()?;
    Some((value, end))
}

/// Parse a token as a float, ignoring trailing bytes.
#[inline]
pub fn parse_real(token: &str) -> Option<f64> {
    parse_real_prefix(token).map(|(v, _)| v)
}

/// Parse a token as an integer, ignoring trailing bytes.
#[inline]
pub fn parse_int(token: &str) -> Option<i64> {
    parse_int_prefix(token).map(|(v, _)| v)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
