//! Shared numeric-literal scanning, used by the dimension-token matchers in
//! `lexer::table` and by the grammar engine's term production, which needs
//! to split a `Length`/`Angle`/... token's text back into a value and a
//! unit string.

/// Length in bytes of the CSS number grammar (`[0-9]+`, `[0-9]*\.[0-9]+`,
/// optionally followed by an exponent) at the start of `s`, or `None` if `s`
/// doesn't start with a number.
pub(crate) fn number_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut seen_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        seen_digit = true;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        let mut frac = false;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
            frac = true;
        }
        if frac {
            i = j;
            seen_digit = true;
        }
    }
    if !seen_digit {
        return None;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    Some(i)
}

/// Matches a number followed immediately by one of `units` (case
/// insensitive), with a word-boundary check so e.g. `10spx` isn't read as
/// `10s` + stray `px`.
pub(crate) fn unit_suffix_len(s: &str, units: &[&str]) -> Option<usize> {
    let num_len = number_prefix_len(s)?;
    let rest = &s[num_len..];
    for unit in units {
        if rest.len() >= unit.len() && rest[..unit.len()].eq_ignore_ascii_case(unit) {
            let after = &rest[unit.len()..];
            let boundary_ok = after
                .chars()
                .next()
                .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'));
            if boundary_ok {
                return Some(num_len + unit.len());
            }
        }
    }
    None
}

/// Splits previously-matched dimension text (e.g. `"12.5px"`) into its
/// numeric value and unit string.
pub(crate) fn split_unit(text: &str) -> (f64, String) {
    let num_len = number_prefix_len(text).unwrap_or(0);
    let value = text[..num_len].parse::<f64>().unwrap_or(0.0);
    (value, text[num_len..].to_string())
}

pub(crate) fn parse_f64(text: &str) -> f64 {
    text.parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_prefix_covers_ints_decimals_and_exponents() {
        assert_eq!(number_prefix_len("12px"), Some(2));
        assert_eq!(number_prefix_len("12.5em"), Some(4));
        assert_eq!(number_prefix_len(".5s"), Some(2));
        assert_eq!(number_prefix_len("1e3Hz"), Some(3));
        assert_eq!(number_prefix_len("foo"), None);
    }

    #[test]
    fn unit_suffix_requires_word_boundary() {
        assert_eq!(unit_suffix_len("10px", &["px"]), Some(4));
        assert_eq!(unit_suffix_len("10pixel", &["px"]), None);
    }

    #[test]
    fn split_unit_separates_value_and_unit() {
        assert_eq!(split_unit("12.5px"), (12.5, "px".to_string()));
    }
}
