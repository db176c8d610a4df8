//! Permissive numeric coercion for catalog fields.
//!
//! Malformed numbers never fail a row: the parsers take the longest numeric
//! prefix of the field, the way C's `atoi`/`atof` do, and fall back to zero
//! when there is none. The result records whether the fallback was used so
//! callers can report it.
//!
//! | Input      | `parse_year`   | `parse_price`   |
//! |------------|----------------|-----------------|
//! | `"1965"`   | 1965           | 1965.0          |
//! | `" 42abc"` | 42             | 42.0            |
//! | `"15.50"`  | 15             | 15.5            |
//! | `"12,50"`  | 12             | 12.0            |
//! | `"abc"`    | 0 (defaulted)  | 0.0 (defaulted) |
//! | `"inf"`    | 0 (defaulted)  | 0.0 (defaulted) |
//! | `"nan"`    | 0 (defaulted)  | 0.0 (defaulted) |
//! | `"0x1p3"`  | 0              | 0.0             |
//!
//! Unlike `atof`, infinities, NaN and hexadecimal floats are not recognised.

/// A coerced value and whether it is the zero fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coerced<T> {
    /// Parsed value, or zero when nothing numeric was found.
    pub value: T,
    /// `true` when the field held no numeric prefix at all.
    pub defaulted: bool,
}

impl<T: Default> Coerced<T> {
    fn fallback() -> Self {
        Coerced { value: T::default(), defaulted: true }
    }
}

/// Parse a publication year: optional whitespace, optional sign, digits.
///
/// Out-of-range values saturate at `i32::MIN`/`i32::MAX`.
#[must_use]
pub fn parse_year(field: &str) -> Coerced<i32> {
    let bytes = field.as_bytes();
    let mut pos = skip_space(bytes, 0);

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos = pos.saturating_add(1);
            true
        }
        Some(b'+') => {
            pos = pos.saturating_add(1);
            false
        }
        _ => false,
    };

    let mut value: i32 = 0;
    let mut digits = 0usize;
    while let Some(&b) = bytes.get(pos) {
        if !b.is_ascii_digit() {
            break;
        }
        let d = i32::from(b.wrapping_sub(b'0'));
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
        digits = digits.saturating_add(1);
        pos = pos.saturating_add(1);
    }

    if digits == 0 {
        return Coerced::fallback();
    }
    Coerced { value, defaulted: false }
}

/// Parse a price: the longest decimal prefix, with optional fraction and
/// exponent (`"9.99"`, `".5"`, `"1e2"`).
#[must_use]
pub fn parse_price(field: &str) -> Coerced<f32> {
    let bytes = field.as_bytes();
    let start = skip_space(bytes, 0);
    let mut pos = start;

    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        pos = pos.saturating_add(1);
    }

    let int_end = skip_digits(bytes, pos);
    let mut mantissa_digits = int_end.saturating_sub(pos);
    pos = int_end;

    if bytes.get(pos) == Some(&b'.') {
        let frac_end = skip_digits(bytes, pos.saturating_add(1));
        mantissa_digits = mantissa_digits.saturating_add(frac_end.saturating_sub(pos.saturating_add(1)));
        pos = frac_end;
    }

    if mantissa_digits == 0 {
        return Coerced::fallback();
    }

    // An exponent only counts when at least one digit follows it.
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos.saturating_add(1);
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp = exp.saturating_add(1);
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            pos = exp_end;
        }
    }

    // The prefix is pure ASCII, so both ends lie on char boundaries.
    match field.get(start..pos).map(str::parse::<f32>) {
        Some(Ok(value)) => Coerced { value, defaulted: false },
        _ => Coerced::fallback(),
    }
}

/// Index of the first byte at or after `pos` that is not C whitespace.
fn skip_space(bytes: &[u8], mut pos: usize) -> usize {
    while let Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c') = bytes.get(pos) {
        pos = pos.saturating_add(1);
    }
    pos
}

/// Index of the first non-digit byte at or after `pos`.
fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos = pos.saturating_add(1);
    }
    pos
}
