//! Property-based tests for the intake pipeline
//!
//! Exercises the validation, sanitization, and honeypot rules from
//! intake-core with proptest.

use proptest::prelude::*;

use intake_core::honeypot::is_bot;
use intake_core::sanitize::clean_text;
use intake_core::validate::{normalize_phone, validate_message, validate_name};

// ============================================================
// Strategies
// ============================================================

/// Names the form should always accept: letters with a single space.
fn acceptable_name() -> impl Strategy<Value = String> {
    ("[A-Za-z]{2,20}", "[A-Za-z]{1,20}").prop_map(|(a, b)| format!("{} {}", a, b))
}

/// A 10-digit Indian mobile subscriber number.
fn mobile_number() -> impl Strategy<Value = String> {
    "[6-9][0-9]{9}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Name Validation
    // ============================================================

    #[test]
    fn letters_and_spaces_always_pass(name in acceptable_name()) {
        let validated = validate_name(&name, "First name").unwrap();
        prop_assert_eq!(validated, name.trim().to_string());
    }

    #[test]
    fn names_with_digits_always_fail(
        prefix in "[A-Za-z]{1,10}",
        digit in "[0-9]{1,3}"
    ) {
        let name = format!("{}{}", prefix, digit);
        prop_assert!(validate_name(&name, "First name").is_err());
    }

    #[test]
    fn surrounding_whitespace_never_changes_the_verdict(name in acceptable_name()) {
        let padded = format!("  {}  ", name);
        prop_assert_eq!(
            validate_name(&padded, "First name").is_ok(),
            validate_name(&name, "First name").is_ok()
        );
    }

    // ============================================================
    // Phone Validation
    // ============================================================

    #[test]
    fn bare_mobile_numbers_normalize_to_themselves(number in mobile_number()) {
        prop_assert_eq!(normalize_phone(&number).unwrap(), number);
    }

    #[test]
    fn formatting_characters_are_stripped(number in mobile_number()) {
        let formatted = format!("+91 {} {}", &number[..5], &number[5..]);
        let normalized = normalize_phone(&formatted).unwrap();
        prop_assert_eq!(normalized, format!("91{}", number));
    }

    #[test]
    fn wrong_digit_counts_always_fail(digits in "[0-9]{1,9}|[0-9]{11}|[0-9]{13,16}") {
        prop_assert!(normalize_phone(&digits).is_err());
    }

    // ============================================================
    // Message Validation
    // ============================================================

    #[test]
    fn substantive_messages_pass(body in "[a-zA-Z]{10,200}") {
        prop_assert!(validate_message(&body).is_ok());
    }

    #[test]
    fn whitespace_padding_cannot_satisfy_the_minimum(pad in "[ \t]{10,40}") {
        let message = format!("hi{}", pad);
        prop_assert!(validate_message(&message).is_err());
    }

    #[test]
    fn oversized_messages_fail(extra in 1usize..200) {
        let message = "m".repeat(1000 + extra);
        prop_assert!(validate_message(&message).is_err());
    }

    // ============================================================
    // Sanitizer
    // ============================================================

    #[test]
    fn script_payloads_never_survive(
        payload in "[a-z(){};]{1,40}",
        keep in "[A-Za-z ]{1,40}"
    ) {
        let input = format!("<script>{}</script>{}", payload, keep);
        let cleaned = clean_text(&input);
        prop_assert!(!cleaned.to_lowercase().contains("<script"));
        prop_assert!(!cleaned.contains(&payload) || keep.contains(&payload));
    }

    #[test]
    fn simple_tags_are_always_removed(
        tag in "[a-z]{1,8}",
        inner in "[A-Za-z ]{1,40}"
    ) {
        let input = format!("<{tag}>{inner}</{tag}>");
        let cleaned = clean_text(&input);
        prop_assert!(!cleaned.contains('<'));
        prop_assert!(!cleaned.contains('>'));
    }

    #[test]
    fn plain_text_only_loses_whitespace_runs(text in "[A-Za-z,. ]{0,120}") {
        let cleaned = clean_text(&text);
        let expected = text.split_whitespace().collect::<Vec<_>>().join(" ");
        prop_assert_eq!(cleaned, expected);
    }

    // ============================================================
    // Honeypot
    // ============================================================

    #[test]
    fn any_visible_content_reads_as_bot(value in "[!-~]{1,30}") {
        prop_assert!(is_bot(Some(&value)));
    }

    #[test]
    fn pure_whitespace_never_reads_as_bot(value in "[ \t\r\n]{0,30}") {
        prop_assert!(!is_bot(Some(&value)));
    }
}
