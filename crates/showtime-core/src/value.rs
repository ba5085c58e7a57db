//! Values carried on wires and the integer coercion shared by numeric nodes.
//!
//! A terminal buffer slot holds `Option<Value>`: `None` is the absent marker.
//! Numeric nodes never fail on foreign input; they coerce it with
//! [`Value::coerce_int`], which falls back to 0.

use core::fmt;

/// An integer point on the plot plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i64,
    /// Vertical coordinate.
    pub y: i64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A value held in a terminal buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Integer.
    Int(i64),
    /// Floating point number. Only arrives through restored state.
    Float(f64),
    /// Boolean. Coerces to 0.
    Bool(bool),
    /// Text, parsed on coercion.
    Text(String),
    /// A 2D point produced by a Point node.
    Point(Point),
}

impl Value {
    /// Coerces the value to an integer.
    ///
    /// Integers pass through and text is parsed in `radix` (see
    /// [`parse_int`]). Unparsable text and every other kind, booleans
    /// included, coerce to 0.
    ///
    /// ```rust
    /// use showtime_core::Value;
    ///
    /// assert_eq!(Value::Int(7).coerce_int(10), 7);
    /// assert_eq!(Value::Text("42".into()).coerce_int(10), 42);
    /// assert_eq!(Value::Text("0x1f".into()).coerce_int(0), 31);
    /// assert_eq!(Value::Text("nope".into()).coerce_int(10), 0);
    /// ```
    pub fn coerce_int(&self, radix: u32) -> i64 {
        match self {
            Self::Int(n) => *n,
            Self::Text(text) => parse_int(text, radix).unwrap_or(0),
            Self::Float(_) | Self::Bool(_) | Self::Point(_) => 0,
        }
    }

    /// Returns the point if this value is one.
    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Point(p) => Some(*p),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Self::Point(p)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Point(p) => write!(f, "{p}"),
        }
    }
}

/// Formats a buffer slot, rendering absence as `null`.
pub fn display_slot(slot: Option<&Value>) -> String {
    slot.map_or_else(|| "null".to_owned(), ToString::to_string)
}

/// Parses an integer literal.
///
/// `radix` is 2..=36, or 0 to detect the base from a `0x`, `0o` or `0b`
/// prefix (decimal otherwise, where a leading zero is only valid for zero
/// itself). Surrounding whitespace, one sign and single `_` separators
/// between digits are accepted. Returns `None` on malformed input or when
/// the result does not fit in an `i64`.
///
/// ```rust
/// use showtime_core::value::parse_int;
///
/// assert_eq!(parse_int(" -1_000 ", 10), Some(-1000));
/// assert_eq!(parse_int("0b101", 0), Some(5));
/// assert_eq!(parse_int("ff", 16), Some(255));
/// assert_eq!(parse_int("012", 0), None);
/// ```
pub fn parse_int(text: &str, radix: u32) -> Option<i64> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = split_radix(unsigned, radix)?;

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    let magnitude = u64::from_str_radix(&cleaned, radix).ok()?;

    if negative {
        i64::try_from(-i128::from(magnitude)).ok()
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Resolves the effective radix and strips a matching base prefix.
fn split_radix(text: &str, radix: u32) -> Option<(u32, &str)> {
    let prefix = text
        .get(..2)
        .map(str::to_ascii_lowercase)
        .and_then(|p| match p.as_str() {
            "0x" => Some(16),
            "0o" => Some(8),
            "0b" => Some(2),
            _ => None,
        });

    match (radix, prefix) {
        (0, Some(detected)) => Some((detected, strip_separator(&text[2..]))),
        (0, None) => {
            let leading_zero = text.len() > 1
                && text.starts_with('0')
                && text.chars().any(|c| c != '0' && c != '_');
            (!leading_zero).then_some((10, text))
        }
        (r, Some(detected)) if r == detected => Some((r, strip_separator(&text[2..]))),
        (2..=36, _) => Some((radix, text)),
        _ => None,
    }
}

/// Drops one `_` directly after a base prefix (`0x_ff`).
fn strip_separator(digits: &str) -> &str {
    digits.strip_prefix('_').unwrap_or(digits)
}
