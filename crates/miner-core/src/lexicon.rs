//! Tokenization with exclusion filtering and compound-term splitting.
//!
//! A [`Lexicon`] is the immutable view of one run's dictionaries: the
//! exclusion set (brand names and user excludes), the compound-term
//! dictionary sorted longest-first, and the placeholder markers.
//!
//! Auto mode pipeline for one text field:
//! 1. Placeholder or empty text yields nothing
//! 2. Every character outside the working script, ASCII letters, digits and
//!    whitespace becomes a space
//! 3. Split on whitespace
//! 4. Drop words that are excluded or contain a digit
//! 5. Split the first (longest) dictionary term out of the word; the
//!    remainder survives only if it is not excluded, has no digit and is at
//!    least [`MIN_TERM_CHARS`] long
//! 6. Words with no dictionary term survive if at least [`MIN_TERM_CHARS`] long
//!
//! Manual mode stops after step 3: explicit keywords are never dropped.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::settings::{MinerConfig, Script};

/// Minimum length, in characters, of a mined term.
pub const MIN_TERM_CHARS: usize = 2;

/// Immutable dictionaries for one analysis run.
#[derive(Debug, Clone)]
pub struct Lexicon {
    script: Script,
    exclusions: HashSet<String>,
    dictionary: Vec<String>,
    placeholders: Vec<String>,
}

impl Lexicon {
    /// Build a lexicon from raw lists.
    ///
    /// Blank entries are discarded: an empty exclusion would match every
    /// tag as a substring, an empty dictionary term every word.
    pub fn new<E, D, P>(script: Script, exclusions: E, dictionary: D, placeholders: P) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let exclusions = non_blank(exclusions).collect();

        let mut terms: Vec<String> = Vec::new();
        for term in non_blank(dictionary) {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        // Stable: equal-length terms keep their configured order.
        terms.sort_by_key(|t| Reverse(t.chars().count()));

        Self {
            script,
            exclusions,
            dictionary: terms,
            placeholders: non_blank(placeholders).collect(),
        }
    }

    /// Build the lexicon described by `config`.
    #[must_use]
    pub fn from_config(config: &MinerConfig) -> Self {
        Self::new(
            config.script,
            config.brand_names.iter().chain(&config.user_exclude_list),
            &config.compound_dictionary,
            &config.placeholder_markers,
        )
    }

    /// Compound dictionary, longest term first.
    #[must_use]
    pub fn dictionary(&self) -> &[String] {
        &self.dictionary
    }

    /// Return `true` if `text` means "no data".
    #[must_use]
    pub fn is_placeholder(&self, text: &str) -> bool {
        let text = text.trim();
        text.is_empty() || self.placeholders.iter().any(|p| p.eq_ignore_ascii_case(text))
    }

    /// Return `true` if `word` is in the exclusion set.
    #[must_use]
    pub fn is_excluded(&self, word: &str) -> bool {
        self.exclusions.contains(word)
    }

    /// Return the first exclusion entry occurring inside `text`, if any.
    #[must_use]
    pub fn excluded_substring(&self, text: &str) -> Option<&str> {
        self.exclusions
            .iter()
            .map(String::as_str)
            .filter(|e| text.contains(e))
            // HashSet order is arbitrary; pick deterministically.
            .min()
    }

    /// Split `text` into candidate terms (auto mode).
    ///
    /// Duplicates are kept; counting happens downstream.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        if self.is_placeholder(text) {
            return Vec::new();
        }

        let cleaned = self.clean(text);
        let mut terms = Vec::new();
        for word in cleaned.split_whitespace() {
            if self.is_excluded(word) || contains_digit(word) {
                continue;
            }
            self.split_compound(word, &mut terms);
        }
        terms
    }

    /// Split `text` into terms without dropping anything (manual mode).
    ///
    /// Single characters and digit-bearing tokens survive; only the
    /// punctuation cleanup and whitespace split are applied.
    #[must_use]
    pub fn tokenize_manual(&self, text: &str) -> Vec<String> {
        if self.is_placeholder(text) {
            return Vec::new();
        }
        self.clean(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Replace every character outside the kept classes with a space.
    fn clean(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                if self.script.is_letter(c) || c.is_ascii_digit() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect()
    }

    /// Emit `word` into `out`, split around its longest dictionary term.
    ///
    /// The remainder is emitted before the dictionary term unless the term
    /// leads the word, so output follows reading order.
    fn split_compound(&self, word: &str, out: &mut Vec<String>) {
        let hit = self
            .dictionary
            .iter()
            .find_map(|term| word.find(term.as_str()).map(|start| (start, term)));

        let Some((start, term)) = hit else {
            if word.chars().count() >= MIN_TERM_CHARS {
                out.push(word.to_string());
            }
            return;
        };

        let remainder = format!("{}{}", &word[..start], &word[start + term.len()..]);
        let remainder = Some(remainder).filter(|r| self.keeps_fragment(r));

        if start == 0 {
            out.push(term.clone());
            out.extend(remainder);
        } else {
            out.extend(remainder);
            out.push(term.clone());
        }
    }

    fn keeps_fragment(&self, fragment: &str) -> bool {
        fragment.chars().count() >= MIN_TERM_CHARS
            && !self.is_excluded(fragment)
            && !contains_digit(fragment)
    }
}

/// Return `true` if `text` contains any numeric character.
#[must_use]
pub fn contains_digit(text: &str) -> bool {
    text.chars().any(char::is_numeric)
}

/// Split a delimited field into trimmed, non-empty pieces.
///
/// An empty `separator` leaves the field whole.
#[must_use]
pub fn split_delimited<'f>(field: &'f str, separator: &str) -> Vec<&'f str> {
    let pieces: Vec<&str> = if separator.is_empty() {
        vec![field]
    } else {
        field.split(separator).collect()
    };
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn non_blank<I>(items: I) -> impl Iterator<Item = String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lexicon(exclusions: &[&str], dictionary: &[&str]) -> Lexicon {
        Lexicon::new(Script::Hangul, exclusions, dictionary, ["-", "nan"])
    }

    // ── auto mode ───────────────────────────────────────────────────────

    #[test]
    fn tokenize_splits_compounds_in_reading_order() {
        let lex = lexicon(&[], &["자판기", "우유", "분유", "전지"]);
        assert_eq!(
            lex.tokenize("전지분유 1kg 자판기우유"),
            ["전지", "분유", "자판기", "우유"]
        );
    }

    #[test]
    fn tokenize_drops_excluded_and_digit_words() {
        let lex = lexicon(&["남양"], &[]);
        assert_eq!(lex.tokenize("남양 분유 2단계 800g 우유"), ["분유", "우유"]);
    }

    #[test]
    fn tokenize_strips_punctuation() {
        let lex = lexicon(&[], &[]);
        assert_eq!(lex.tokenize("[무료배송] 분유/우유, 간식!"), ["무료배송", "분유", "우유", "간식"]);
    }

    #[test]
    fn tokenize_drops_single_characters() {
        let lex = lexicon(&[], &[]);
        assert_eq!(lex.tokenize("차 a 커피 ab"), ["커피", "ab"]);
    }

    #[test]
    fn tokenize_word_equal_to_dictionary_term_emits_it_once() {
        let lex = lexicon(&[], &["우유"]);
        assert_eq!(lex.tokenize("우유"), ["우유"]);
    }

    #[test]
    fn tokenize_splits_only_first_occurrence_of_term() {
        // The second "우유" survives as the remainder
        let lex = lexicon(&[], &["우유"]);
        assert_eq!(lex.tokenize("우유우유"), ["우유", "우유"]);
        assert_eq!(lex.tokenize("우유커피우유"), ["우유", "커피우유"]);
    }

    #[test]
    fn tokenize_prefers_longest_dictionary_term() {
        // "제빵" must not shadow "제빵용" when both would match.
        let lex = lexicon(&[], &["제빵", "제빵용"]);
        assert_eq!(lex.dictionary(), ["제빵용", "제빵"]);
        assert_eq!(lex.tokenize("제빵용품"), ["제빵용"]);
    }

    #[test]
    fn tokenize_checks_remainder_against_exclusions() {
        let lex = lexicon(&["매일"], &["우유"]);
        assert_eq!(lex.tokenize("매일우유"), ["우유"]);
    }

    #[test]
    fn tokenize_placeholder_yields_nothing() {
        let lex = lexicon(&[], &[]);
        assert!(lex.tokenize("-").is_empty());
        assert!(lex.tokenize(" NaN ").is_empty());
        assert!(lex.tokenize("").is_empty());
    }

    #[test]
    fn tokenize_is_repeatable() {
        let lex = lexicon(&["브랜드"], &["분유"]);
        let text = "브랜드 전지분유 맛있는 분유";
        assert_eq!(lex.tokenize(text), lex.tokenize(text));
    }

    #[test]
    fn latin_script_drops_hangul() {
        let lex = Lexicon::new(Script::Latin, [""; 0], [""; 0], [""; 0]);
        assert_eq!(lex.tokenize("milk 우유 powder"), ["milk", "powder"]);
    }

    // ── manual mode ─────────────────────────────────────────────────────

    #[test]
    fn manual_mode_keeps_single_chars_and_digits() {
        let lex = lexicon(&["남양"], &["분유"]);
        assert_eq!(
            lex.tokenize_manual("남양, 1kg 차 전지분유"),
            ["남양", "1kg", "차", "전지분유"]
        );
    }

    // ── delimited fields ────────────────────────────────────────────────

    #[test]
    fn split_delimited_trims_and_skips_empty_pieces() {
        assert_eq!(split_delimited(" 우유 ,, 간식 ,", ","), ["우유", "간식"]);
        assert_eq!(split_delimited("우유,간식", ""), ["우유,간식"]);
    }

    // ── exclusions ──────────────────────────────────────────────────────

    #[test]
    fn blank_entries_are_discarded() {
        let lex = lexicon(&["", "  "], &[""]);
        assert!(lex.excluded_substring("아무거나").is_none());
        assert!(lex.dictionary().is_empty());
    }

    #[test]
    fn excluded_substring_finds_brand_inside_tag() {
        let lex = lexicon(&["남양"], &[]);
        assert_eq!(lex.excluded_substring("남양분유"), Some("남양"));
        assert_eq!(lex.excluded_substring("분유"), None);
    }
}
