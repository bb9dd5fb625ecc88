// ABOUTME: Input validation for tag names and colors
// ABOUTME: Rejects bad input at the boundary so it is never stored

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{TagsError, TagsResult};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid color pattern"));

/// A tag name must contain something other than whitespace
pub fn validate_tag_name(name: &str) -> TagsResult<()> {
    if name.trim().is_empty() {
        return Err(TagsError::EmptyName);
    }
    Ok(())
}

/// Accepts `#RGB` and `#RRGGBB`, any hex case
pub fn validate_color(color: &str) -> TagsResult<()> {
    if HEX_COLOR.is_match(color) {
        Ok(())
    } else {
        Err(TagsError::InvalidColor(color.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_color_valid() {
        for color in ["#FF5733", "#F53", "#abc", "#aBcDeF", "#000000", "#EF4444"] {
            assert!(validate_color(color).is_ok(), "{color} should be valid");
        }
    }

    #[test]
    fn test_validate_color_invalid() {
        for color in [
            "FF5733",     // missing #
            "123456",     // missing #
            "#FF5",       // bad length
            "#FF57333",   // bad length
            "#FF5733AA",  // alpha is not accepted
            "#GG5733",    // not hex
            "#FF5733\n",  // trailing newline
            " #FF5733",   // leading space
            "#",
            "",
        ] {
            assert!(
                matches!(validate_color(color), Err(TagsError::InvalidColor(_))),
                "{color:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_every_three_digit_gray_is_valid() {
        for digit in "0123456789abcdefABCDEF".chars() {
            let short = format!("#{0}{0}{0}", digit);
            let long = format!("#{0}{0}{0}{0}{0}{0}", digit);
            assert!(validate_color(&short).is_ok());
            assert!(validate_color(&long).is_ok());
        }
    }

    #[test]
    fn test_validate_tag_name() {
        assert!(validate_tag_name("Important").is_ok());
        assert!(matches!(validate_tag_name(""), Err(TagsError::EmptyName)));
        assert!(matches!(validate_tag_name(" \t "), Err(TagsError::EmptyName)));
    }
}
