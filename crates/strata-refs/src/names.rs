//! Ref name validation following git-style conventions.
//!
//! Valid names:
//! - Must be non-empty
//! - Must not contain whitespace, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - Must not contain `..` or `@{`
//! - Must not start or end with `.` or `/`
//! - Must not end with `.lock`
//! - Must not contain consecutive slashes
//! - Components between slashes must be non-empty and must not start
//!   with `.`

use crate::error::{RefError, RefResult};

/// Characters forbidden anywhere in a ref name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

/// Validate a full ref name (e.g. `refs/heads/survey/2024`), returning
/// `Ok(())` if valid.
pub fn validate_ref_name(name: &str) -> RefResult<()> {
    let invalid = |reason: &str| {
        Err(RefError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return invalid("must not be empty");
    }
    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(RefError::InvalidName {
                name: name.to_string(),
                reason: format!("contains forbidden character {ch:?}"),
            });
        }
    }
    if name.contains("..") {
        return invalid("must not contain '..'");
    }
    if name.contains("@{") {
        return invalid("must not contain '@{'");
    }
    if name.starts_with('.') || name.ends_with('.') {
        return invalid("must not start or end with '.'");
    }
    if name.starts_with('/') || name.ends_with('/') {
        return invalid("must not start or end with '/'");
    }
    if name.ends_with(".lock") {
        return invalid("must not end with '.lock'");
    }
    if name.contains("//") {
        return invalid("must not contain consecutive slashes");
    }
    for component in name.split('/') {
        if component.is_empty() {
            return invalid("path components must not be empty");
        }
        if component.starts_with('.') {
            return Err(RefError::InvalidName {
                name: name.to_string(),
                reason: format!("component must not start with '.': {component:?}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(validate_ref_name("HEAD").is_ok());
        assert!(validate_ref_name("refs/heads/master").is_ok());
        assert!(validate_ref_name("refs/heads/survey/2024-q1").is_ok());
        assert!(validate_ref_name("refs/tags/v1.0").is_ok());
        assert!(validate_ref_name("refs/remotes/origin/master").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(validate_ref_name("").is_err());
    }

    #[test]
    fn reject_double_dot() {
        assert!(validate_ref_name("refs/heads/a..b").is_err());
    }

    #[test]
    fn reject_whitespace_and_special_chars() {
        for bad in [
            "has space", "a\tb", "a~b", "a^b", "a:b", "a?b", "a*b", "a[b", "a\\b",
        ] {
            assert!(validate_ref_name(bad).is_err(), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn reject_boundary_dots_and_slashes() {
        assert!(validate_ref_name(".hidden").is_err());
        assert!(validate_ref_name("trailing.").is_err());
        assert!(validate_ref_name("/leading").is_err());
        assert!(validate_ref_name("trailing/").is_err());
    }

    #[test]
    fn reject_lock_suffix_and_reflog_syntax() {
        assert!(validate_ref_name("refs/heads/master.lock").is_err());
        assert!(validate_ref_name("master@{1}").is_err());
    }

    #[test]
    fn reject_empty_and_dotted_components() {
        assert!(validate_ref_name("refs//heads").is_err());
        assert!(validate_ref_name("refs/heads/.hidden").is_err());
    }
}
