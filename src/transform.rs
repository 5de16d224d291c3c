//! Translation-offset codec for positioned groups
//!
//! A group's position is persisted only as the text of its `transform`
//! attribute, in the fixed form `translate(X Y)`. This module parses that
//! text and rewrites one or both axes, carrying the untouched axis over
//! unchanged.

use thiserror::Error;

/// Errors produced by the offset codec
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OffsetError {
    /// Transform text is not of the two-integer `translate(X Y)` form
    #[error("malformed translation offset '{text}'")]
    Malformed { text: String },
}

impl OffsetError {
    fn malformed(text: &str) -> Self {
        OffsetError::Malformed {
            text: text.to_string(),
        }
    }
}

/// Parse `translate(X Y)` into its two integer components.
pub fn parse_offset(text: &str) -> Result<(i64, i64), OffsetError> {
    let inner = text
        .trim()
        .strip_prefix("translate(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| OffsetError::malformed(text))?;

    let mut parts = inner
        .split(|c: char| c == ' ' || c == ',')
        .filter(|part| !part.is_empty());

    let x = parts
        .next()
        .and_then(|part| part.parse().ok())
        .ok_or_else(|| OffsetError::malformed(text))?;
    let y = parts
        .next()
        .and_then(|part| part.parse().ok())
        .ok_or_else(|| OffsetError::malformed(text))?;
    if parts.next().is_some() {
        return Err(OffsetError::malformed(text));
    }
    Ok((x, y))
}

/// Rewrite a translation expression, replacing whichever axes are supplied.
///
/// Omitted axes keep their current value:
///
/// ```
/// use votemap::transform::update_offset;
///
/// let t = update_offset("translate(1 2)", Some(5), None).unwrap();
/// assert_eq!(t, "translate(5 2)");
/// ```
pub fn update_offset(
    current: &str,
    x: Option<i64>,
    y: Option<i64>,
) -> Result<String, OffsetError> {
    let (cur_x, cur_y) = parse_offset(current)?;
    Ok(format!(
        "translate({} {})",
        x.unwrap_or(cur_x),
        y.unwrap_or(cur_y)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_components() {
        assert_eq!(parse_offset("translate(150 300)").unwrap(), (150, 300));
        assert_eq!(parse_offset("translate(-4 0)").unwrap(), (-4, 0));
    }

    #[test]
    fn test_parse_tolerates_comma_and_spacing() {
        assert_eq!(parse_offset("translate(10,20)").unwrap(), (10, 20));
        assert_eq!(parse_offset("  translate(10  20)  ").unwrap(), (10, 20));
    }

    #[test]
    fn test_update_single_axis() {
        assert_eq!(
            update_offset("translate(1 2)", Some(5), None).unwrap(),
            "translate(5 2)"
        );
        assert_eq!(
            update_offset("translate(1 2)", None, Some(9)).unwrap(),
            "translate(1 9)"
        );
    }

    #[test]
    fn test_update_round_trip() {
        let first = update_offset("translate(1 2)", Some(5), None).unwrap();
        let second = update_offset(&first, None, Some(9)).unwrap();
        assert_eq!(second, "translate(5 9)");
    }

    #[test]
    fn test_update_both_axes() {
        assert_eq!(
            update_offset("translate(150 300)", Some(100), Some(500)).unwrap(),
            "translate(100 500)"
        );
    }

    #[test]
    fn test_no_axes_keeps_current() {
        assert_eq!(
            update_offset("translate(7 8)", None, None).unwrap(),
            "translate(7 8)"
        );
    }

    #[test]
    fn test_malformed_inputs() {
        for text in [
            "",
            "translate()",
            "translate(1)",
            "translate(1 2 3)",
            "translate(a b)",
            "rotate(45)",
            "translate(1 2",
        ] {
            assert_eq!(
                parse_offset(text),
                Err(OffsetError::Malformed {
                    text: text.to_string()
                }),
                "expected '{}' to be rejected",
                text
            );
        }
    }
}
