use super::ValidationError;

/// Largest integer an f64 represents exactly; wider "1e20"-style ids cannot match a row
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// A path identifier that passed the numeric-string check.
///
/// The check is the conventional one (sign, fraction and exponent allowed), so a
/// value such as `"1.5"` is well-formed but can never address a stored row.
/// `key()` is `None` for those and the lookup resolves to not-found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId {
    key: Option<i64>,
}

impl ProductId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if !is_numeric(raw) {
            return Err(ValidationError::InvalidIdentifier);
        }

        let trimmed = raw.trim_matches(is_php_whitespace);
        let key = if trimmed.bytes().all(|b| b.is_ascii_digit() || b == b'+' || b == b'-') {
            trimmed.parse::<i64>().ok()
        } else {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT_FLOAT_INT)
                .map(|v| v as i64)
        };

        Ok(Self { key })
    }

    pub fn key(&self) -> Option<i64> {
        self.key
    }
}

fn is_php_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}')
}

/// Numeric-string test: optional surrounding whitespace, optional sign,
/// digits with an optional fraction (or a bare fraction), optional exponent.
pub(crate) fn is_numeric(raw: &str) -> bool {
    let s = raw.trim_matches(is_php_whitespace).as_bytes();
    let mut i = 0;

    if i < s.len() && (s[i] == b'+' || s[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < s.len() && s[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < s.len() && s[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < s.len() && s[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < s.len() && (s[i] == b'e' || s[i] == b'E') {
        i += 1;
        if i < s.len() && (s[i] == b'+' || s[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < s.len() && s[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == s.len()
}
