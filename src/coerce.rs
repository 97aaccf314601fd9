use crate::error::MapError;
use crate::value::Value;

/// The kind a stored value is converted *from*
///
/// Every integer width collapses into one of two integer classes and every
/// float width into one float class. Nulls, arrays and objects have no
/// scalar form and are rejected by [`Scalar::from_value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Str(&'a str),
}

impl<'a> Scalar<'a> {
    /// Normalizes a value for coercion into `expected`
    ///
    /// # Errors
    ///
    /// Returns `MapError::Unconvertible` for null, array and object values.
    pub fn from_value(value: &'a Value, expected: &'static str) -> Result<Self, MapError> {
        match value {
            Value::Int(n) => Ok(Scalar::Int(*n)),
            Value::Uint(n) => Ok(Scalar::Uint(*n)),
            Value::Float(n) => Ok(Scalar::Float(*n)),
            Value::Bool(b) => Ok(Scalar::Bool(*b)),
            Value::String(s) => Ok(Scalar::Str(s)),
            Value::Null | Value::Array(_) | Value::Object(_) => Err(MapError::Unconvertible {
                expected,
                found: value.type_name(),
            }),
        }
    }
}

/// A target type that stored values can be coerced into
///
/// Implemented for `i64`, `String`, `f64` and `bool`.
pub trait Coerce: Sized {
    /// Name used in error messages
    const TYPE_NAME: &'static str;

    /// Converts an already-normalized source value
    fn from_scalar(scalar: Scalar<'_>) -> Result<Self, MapError>;

    /// Converts a stored value, rejecting unconvertible kinds
    fn coerce(value: &Value) -> Result<Self, MapError> {
        Self::from_scalar(Scalar::from_value(value, Self::TYPE_NAME)?)
    }
}

impl Value {
    /// Converts this value into `T` following the coercion table
    ///
    /// ```
    /// use livemap::Value;
    ///
    /// assert_eq!(Value::from("2020").coerce::<i64>(), Ok(2020));
    /// assert_eq!(Value::from(60.3).coerce::<String>().as_deref(), Ok("60.3"));
    /// assert_eq!(Value::from(1u8).coerce::<bool>(), Ok(true));
    /// assert!(Value::Null.coerce::<f64>().is_err());
    /// ```
    pub fn coerce<T: Coerce>(&self) -> Result<T, MapError> {
        T::coerce(self)
    }
}

impl Coerce for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_scalar(scalar: Scalar<'_>) -> Result<Self, MapError> {
        Ok(match scalar {
            Scalar::Int(n) => n,
            Scalar::Uint(n) => n as i64,
            Scalar::Float(n) => n.trunc() as i64,
            Scalar::Bool(b) => i64::from(b),
            Scalar::Str(s) => lenient_int(s),
        })
    }
}

impl Coerce for String {
    const TYPE_NAME: &'static str = "string";

    fn from_scalar(scalar: Scalar<'_>) -> Result<Self, MapError> {
        Ok(match scalar {
            Scalar::Int(n) => n.to_string(),
            Scalar::Uint(n) => n.to_string(),
            Scalar::Float(n) => format_float(n),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Str(s) => s.to_owned(),
        })
    }
}

impl Coerce for f64 {
    const TYPE_NAME: &'static str = "float";

    fn from_scalar(scalar: Scalar<'_>) -> Result<Self, MapError> {
        match scalar {
            Scalar::Int(n) => Ok(n as f64),
            Scalar::Uint(n) => Ok(n as f64),
            Scalar::Float(n) => Ok(n),
            Scalar::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
            Scalar::Str(s) => parse_float_literal(s),
        }
    }
}

impl Coerce for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_scalar(scalar: Scalar<'_>) -> Result<Self, MapError> {
        match scalar {
            Scalar::Int(n) => Ok(n > 0),
            Scalar::Uint(n) => Ok(n > 0),
            Scalar::Float(n) => Ok(n > 0.0),
            Scalar::Bool(b) => Ok(b),
            Scalar::Str(s) => parse_bool_literal(s),
        }
    }
}

/// Integer coercion from text never fails: garbage reads as 0 and
/// overflow clamps to the nearest bound.
fn lenient_int(s: &str) -> i64 {
    match parse_int_literal(s) {
        Ok(n) => n,
        Err(IntLiteralError::Overflow { negative: false }) => i64::MAX,
        Err(IntLiteralError::Overflow { negative: true }) => i64::MIN,
        Err(IntLiteralError::Syntax) => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntLiteralError {
    Syntax,
    Overflow { negative: bool },
}

/// Parses a signed integer literal with an optional radix prefix
///
/// Accepts `0x`/`0o`/`0b` prefixes, a bare leading `0` for octal, and `_`
/// separators when the literal carries a `0` prefix.
fn parse_int_literal(s: &str) -> Result<i64, IntLiteralError> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if body.is_empty() {
        return Err(IntLiteralError::Syntax);
    }

    let prefixed = body.starts_with('0');
    let (radix, digits) = match body.as_bytes() {
        [b'0', b'x' | b'X', _, ..] => (16, &body[2..]),
        [b'0', b'o' | b'O', _, ..] => (8, &body[2..]),
        [b'0', b'b' | b'B', _, ..] => (2, &body[2..]),
        [b'0', _, ..] => (8, &body[1..]),
        _ => (10, body),
    };

    if digits.contains('_') && !(prefixed && underscores_ok(body)) {
        return Err(IntLiteralError::Syntax);
    }

    let mut magnitude: u64 = 0;
    let mut overflow = false;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix).ok_or(IntLiteralError::Syntax)?;
        match magnitude
            .checked_mul(u64::from(radix))
            .and_then(|m| m.checked_add(u64::from(digit)))
        {
            Some(m) => magnitude = m,
            None => overflow = true,
        }
    }

    let limit = if negative {
        i64::MIN.unsigned_abs()
    } else {
        i64::MAX as u64
    };
    if overflow || magnitude > limit {
        return Err(IntLiteralError::Overflow { negative });
    }

    Ok(if negative {
        0i64.wrapping_sub_unsigned(magnitude)
    } else {
        magnitude as i64
    })
}

/// Underscores may only sit between digits, or directly after a radix
/// prefix.
fn underscores_ok(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut start = 0;
    if let [b'0', p, ..] = bytes {
        if matches!(p.to_ascii_lowercase(), b'x' | b'o' | b'b') {
            start = 2;
        }
    }

    // '0' stands for "digit or prefix", '_' for an underscore, '!' otherwise
    let mut prev = if start == 2 { b'0' } else { b'!' };
    for &b in &bytes[start..] {
        if b == b'_' {
            if prev != b'0' {
                return false;
            }
            prev = b'_';
        } else if b.is_ascii_alphanumeric() {
            prev = b'0';
        } else {
            if prev == b'_' {
                return false;
            }
            prev = b'!';
        }
    }
    prev != b'_'
}

/// Parses a decimal or `0x` hexadecimal float literal
fn parse_float_literal(s: &str) -> Result<f64, MapError> {
    let n = s
        .parse::<f64>()
        .ok()
        .or_else(|| parse_hex_float(s))
        .ok_or_else(|| MapError::InvalidLiteral {
            expected: f64::TYPE_NAME,
            literal: s.to_string(),
        })?;

    // The parser rounds huge literals to infinity; only spelled-out
    // infinities are accepted as such.
    if n.is_infinite() && !is_infinity_literal(s) {
        return Err(MapError::OutOfRange {
            expected: f64::TYPE_NAME,
            literal: s.to_string(),
        });
    }
    Ok(n)
}

/// Parses `[+-]0x<hex mantissa>p[+-]<decimal exponent>`, e.g. `0x1.8p3`
///
/// The `p` exponent is mandatory. `_` may separate digits, or follow the
/// `0x` prefix.
fn parse_hex_float(s: &str) -> Option<f64> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let rest = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))?;
    let (mantissa, exponent) = rest.split_once(|c: char| c == 'p' || c == 'P')?;

    // The first 16 hex digits are kept; later integer digits only scale.
    let mut bits: u64 = 0;
    let mut scale: i64 = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut prev = b'0';
    for b in mantissa.bytes() {
        match b {
            b'_' if prev == b'0' => prev = b'_',
            b'.' if !seen_dot && prev != b'_' => {
                seen_dot = true;
                prev = b'.';
            }
            _ => {
                let digit = char::from(b).to_digit(16)?;
                if bits >> 60 == 0 {
                    bits = bits * 16 + u64::from(digit);
                    if seen_dot {
                        scale -= 4;
                    }
                } else if !seen_dot {
                    scale += 4;
                }
                seen_digit = true;
                prev = b'0';
            }
        }
    }
    if !seen_digit || prev == b'_' {
        return None;
    }

    let value = scale_by_pow2(bits as f64, parse_exponent(exponent)?.saturating_add(scale));
    Some(if negative { -value } else { value })
}

/// Signed decimal exponent, clamped far outside the `f64` range
fn parse_exponent(s: &str) -> Option<i64> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return None;
    }

    let mut magnitude: i64 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(10)?;
        magnitude = (magnitude * 10 + i64::from(digit)).min(100_000);
    }
    Some(if negative { -magnitude } else { magnitude })
}

/// Multiplies by `2^exp` in steps that stay within the normal range
fn scale_by_pow2(mut value: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    if value == 0.0 {
        return value;
    }
    while exp > STEP && value.is_finite() {
        value *= 2f64.powi(STEP as i32);
        exp -= STEP;
    }
    while exp < -STEP && value != 0.0 {
        value *= 2f64.powi(-STEP as i32);
        exp += STEP;
    }
    value * 2f64.powi(exp as i32)
}

fn is_infinity_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn parse_bool_literal(s: &str) -> Result<bool, MapError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(MapError::InvalidLiteral {
            expected: bool::TYPE_NAME,
            literal: s.to_string(),
        }),
    }
}

/// Formats a float with the fewest digits that parse back to the same value
///
/// Decimal exponents below -4 or from 6 up switch to scientific notation
/// with a signed, two-digit-minimum exponent (`1e+06`, `2.5e-07`).
pub fn format_float(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{n:e}");
    let Some((mantissa, exponent)) = scientific
        .split_once('e')
        .and_then(|(m, e)| e.parse::<i32>().ok().map(|e| (m, e)))
    else {
        return n.to_string();
    };

    if (-4..6).contains(&exponent) {
        n.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}
