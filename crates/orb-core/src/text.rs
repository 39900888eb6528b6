/// Greedy word wrap against a measured width.
///
/// Words are separated by whitespace. A word joins the current line while the
/// candidate line measures at most `max_width`; otherwise the line is emitted
/// and the word starts the next one. The first word of a line is always
/// accepted, so a single over-wide word gets a line of its own and no line is
/// ever empty. Returns no lines for blank text.
pub fn wrap_words<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Monospace measure: 10 units per character.
    fn mono(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn fits_on_one_line() {
        let lines = wrap_words("the orb sees", 1000.0, mono);
        assert_eq!(lines, vec!["the orb sees"]);
    }

    #[test]
    fn breaks_at_width() {
        let lines = wrap_words("one two three four", 70.0, mono);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn overlong_word_gets_own_line() {
        let lines = wrap_words("a extraordinarily b", 50.0, mono);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap_words("   ", 100.0, mono).is_empty());
    }

    #[test]
    fn cyrillic_is_measured_by_characters() {
        let lines = wrap_words("Судьба шепчет тебе", 130.0, mono);
        assert_eq!(lines, vec!["Судьба шепчет", "тебе"]);
    }

    proptest! {
        #[test]
        fn first_line_takes_exactly_k_words(
            words in prop::collection::vec("[a-zа-я]{1,8}", 2..12),
            k in 1usize..12,
        ) {
            let k = k.min(words.len() - 1);
            let text = words.join(" ");
            let max = mono(&words[..k].join(" "));
            let lines = wrap_words(&text, max, mono);
            prop_assert_eq!(lines[0].split(' ').count(), k);
        }

        #[test]
        fn lines_never_exceed_width(
            words in prop::collection::vec("[a-z]{1,6}", 1..20),
            max in 60.0f32..300.0,
        ) {
            let lines = wrap_words(&words.join(" "), max, mono);
            for line in &lines {
                prop_assert!(!line.is_empty());
                // words are at most 60 wide, so every line fits
                prop_assert!(mono(line) <= max);
            }
            prop_assert_eq!(lines.join(" "), words.join(" "));
        }
    }
}
