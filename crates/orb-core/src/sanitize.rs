use std::sync::OnceLock;

use regex::Regex;

/// Maximum length of a sanitized name, in characters.
pub const MAX_NAME_CHARS: usize = 32;

/// Clean a raw name input.
///
/// Keeps letters, whitespace, and hyphens; collapses whitespace runs into a
/// single space; trims; truncates to [`MAX_NAME_CHARS`] characters.
pub fn sanitize_name(raw: &str) -> String {
    let kept = disallowed().replace_all(raw, "");
    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(MAX_NAME_CHARS).collect();
    // truncation can land right after a space
    truncated.trim_end().to_string()
}

// Anything outside the Letter category, whitespace, and `-`.
fn disallowed() -> &'static Regex {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    DISALLOWED.get_or_init(|| Regex::new(r"[^\p{L}\s-]").expect("valid name filter regex"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_symbols_and_digits() {
        assert_eq!(sanitize_name("  Jo@@hn   123!!"), "John");
    }

    #[test]
    fn keeps_cyrillic_and_hyphens() {
        assert_eq!(sanitize_name("Анна-Мария"), "Анна-Мария");
        assert_eq!(sanitize_name("Анна"), "Анна");
    }

    #[test]
    fn collapses_inner_whitespace() {
        assert_eq!(sanitize_name("Mary \t\n  Jane"), "Mary Jane");
    }

    #[test]
    fn empty_when_nothing_survives() {
        assert_eq!(sanitize_name("  123 !!  "), "");
        assert_eq!(sanitize_name(""), "");
    }

    #[test]
    fn truncates_without_trailing_space() {
        let raw = format!("{} {}", "a".repeat(31), "bcd");
        let clean = sanitize_name(&raw);
        assert_eq!(clean, "a".repeat(31));
        assert_eq!(sanitize_name(&"я".repeat(40)).chars().count(), 32);
    }

    #[test]
    fn drops_letter_numbers_and_vowel_signs() {
        assert_eq!(sanitize_name("Ⅻ"), "");
        assert_eq!(sanitize_name("Ⅻ Олег"), "Олег");
        assert_eq!(sanitize_name("रा"), "र");
    }

    proptest! {
        #[test]
        fn sanitized_names_are_clean(raw in any::<String>()) {
            let clean = sanitize_name(&raw);
            prop_assert!(clean.chars().count() <= MAX_NAME_CHARS);
            let letters = Regex::new(r"^[\p{L} -]*$").unwrap();
            prop_assert!(letters.is_match(&clean));
            prop_assert!(!clean.contains("  "));
            prop_assert_eq!(clean.trim(), clean.as_str());
        }

        #[test]
        fn sanitizing_is_idempotent(raw in "\\PC{0,64}") {
            let once = sanitize_name(&raw);
            prop_assert_eq!(sanitize_name(&once), once);
        }
    }
}
