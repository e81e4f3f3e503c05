//! Per-step field checks
//!
//! The email check is deliberately loose: something, `@`, something, `.`,
//! something. It is a typo catcher, not an address validator.

use regex::Regex;
use std::sync::OnceLock;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// Step 1 gate: the name must contain something other than whitespace
pub fn name_is_present(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Step 2 gate
pub fn email_looks_valid(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Submission gate: an empty message is not worth sending
pub fn message_is_present(message: &str) -> bool {
    !message.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rejects_blank() {
        assert!(!name_is_present(""));
        assert!(!name_is_present("   "));
        assert!(!name_is_present("\t\n"));
    }

    #[test]
    fn test_name_accepts_padded_text() {
        assert!(name_is_present("Ada"));
        assert!(name_is_present("  Ada  "));
    }

    #[test]
    fn test_email_accepts_simple_addresses() {
        assert!(email_looks_valid("a@b.co"));
        assert!(email_looks_valid("ada.lovelace@example.org"));
        assert!(email_looks_valid("first+tag@sub.domain.io"));
    }

    #[test]
    fn test_email_rejects_missing_parts() {
        for bad in ["", "bad", "a@b", "@b.co", "a@.co", "a@b.", "a b@c d", "a@ b.co"] {
            assert!(!email_looks_valid(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_email_is_unanchored() {
        // The pattern is searched, not matched against the whole input
        assert!(email_looks_valid("  a@b.co  "));
        assert!(email_looks_valid("mail me: a@b.co please"));
        assert!(email_looks_valid("a@@b..c"));
    }

    #[test]
    fn test_message_rejects_blank() {
        assert!(!message_is_present(""));
        assert!(!message_is_present(" \n \n"));
        assert!(message_is_present("hi"));
        assert!(message_is_present("\nhi\n"));
    }
}
