//! Word splitting and word validation.
//!
//! Words are separated by the ASCII space only. Tabs, newlines and other
//! control characters stay inside the word so that validation can reject it.
//! Document text collapses runs of spaces, query text does not.

use std::iter::FusedIterator;
use std::str::Split;

/// Lazy iterator over the non-empty space-separated words of a text
/// Clone it to restart from the current position
#[derive(Debug, Clone)]
pub struct Words<'a> {
    inner: Split<'a, char>,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|word| !word.is_empty())
    }
}

impl FusedIterator for Words<'_> {}

/// Split `text` into words
///
/// # Examples
/// ```
/// use search_server::server::token::split_into_words;
/// let words: Vec<&str> = split_into_words("  curly  cat ").collect();
/// assert_eq!(words, ["curly", "cat"]);
/// ```
#[inline]
pub fn split_into_words(text: &str) -> Words<'_> {
    Words { inner: text.split(' ') }
}

/// Split query text on every space, keeping empty tokens
///
/// Doubled, leading or trailing spaces produce empty tokens for the query
/// parser to reject. Text with no characters at all yields nothing.
///
/// # Examples
/// ```
/// use search_server::server::token::split_query_tokens;
/// let tokens: Vec<&str> = split_query_tokens("curly  cat").collect();
/// assert_eq!(tokens, ["curly", "", "cat"]);
/// assert_eq!(split_query_tokens("").count(), 0);
/// ```
#[inline]
pub fn split_query_tokens(text: &str) -> impl Iterator<Item = &str> + Clone {
    (!text.is_empty()).then(|| text.split(' ')).into_iter().flatten()
}

/// A word is valid when it has no control characters (below U+0020)
#[inline]
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_spaces_and_skips_empty_words() {
        let words: Vec<&str> = split_into_words("white cat  and yellow hat").collect();
        assert_eq!(words, ["white", "cat", "and", "yellow", "hat"]);
        assert_eq!(split_into_words("").count(), 0);
        assert_eq!(split_into_words("     ").count(), 0);
    }

    #[test]
    fn clone_restarts_from_current_position() {
        let mut words = split_into_words("a b c");
        assert_eq!(words.next(), Some("a"));
        let rest = words.clone();
        assert_eq!(words.collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(rest.collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn tabs_are_part_of_the_word() {
        let words: Vec<&str> = split_into_words("cat\tdog").collect();
        assert_eq!(words, ["cat\tdog"]);
        assert!(!is_valid_word(words[0]));
    }

    #[test]
    fn query_tokens_keep_empty_segments() {
        let tokens: Vec<&str> = split_query_tokens(" cat  dog ").collect();
        assert_eq!(tokens, ["", "cat", "", "dog", ""]);
        assert_eq!(split_query_tokens("cat").collect::<Vec<_>>(), ["cat"]);
        assert_eq!(split_query_tokens("").count(), 0);
    }

    #[test]
    fn validity() {
        assert!(is_valid_word("пушистый"));
        assert!(is_valid_word("-cat"));
        assert!(!is_valid_word("ca\u{12}t"));
        assert!(!is_valid_word("\u{0}"));
    }
}
