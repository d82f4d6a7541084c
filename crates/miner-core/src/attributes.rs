//! Frequency-only mining of the attribute field.

use tracing::debug;

use crate::frequency::FrequencyTable;
use crate::lexicon::{Lexicon, MIN_TERM_CHARS, split_delimited};

/// Top `top_k` attribute values across `fields`.
///
/// Each field is split on `separator` and trimmed. Values shorter than
/// [`MIN_TERM_CHARS`], excluded values and placeholder cells are dropped.
pub fn mine_attributes<'a, I>(
    fields: I,
    lexicon: &Lexicon,
    separator: &str,
    top_k: usize,
) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut table = FrequencyTable::new();
    for field in fields.into_iter().flatten() {
        if lexicon.is_placeholder(field) {
            continue;
        }
        table.extend(
            split_delimited(field, separator)
                .into_iter()
                .filter(|v| {
                    v.chars().count() >= MIN_TERM_CHARS
                        && !lexicon.is_placeholder(v)
                        && !lexicon.is_excluded(v)
                }),
        );
    }
    debug!(distinct = table.len(), top_k, "Mined attribute values");
    table.most_common(top_k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Script;
    use pretty_assertions::assert_eq;

    #[test]
    fn mine_attributes_counts_and_ranks_values() {
        let lexicon = Lexicon::new(Script::Hangul, ["남양"], [""; 0], ["-"]);
        let fields = [
            Some("분말 | 국산 | 남양"),
            Some("국산|대용량|x"),
            None,
            Some("-"),
            Some("분말|국산"),
        ];
        let attributes = mine_attributes(fields, &lexicon, "|", 8);
        assert_eq!(
            attributes,
            [
                ("국산".to_string(), 3),
                ("분말".to_string(), 2),
                ("대용량".to_string(), 1),
            ]
        );
    }

    #[test]
    fn placeholder_values_inside_a_field_are_skipped() {
        let lexicon = Lexicon::new(Script::Hangul, [""; 0], [""; 0], ["-", "nan", "null"]);
        let fields = [Some("분말|nan|NULL"), Some("nan|분말")];
        assert_eq!(
            mine_attributes(fields, &lexicon, "|", 8),
            [("분말".to_string(), 2)]
        );
    }

    #[test]
    fn mine_attributes_truncates_to_top_k() {
        let lexicon = Lexicon::new(Script::Hangul, [""; 0], [""; 0], [""; 0]);
        let fields = [Some("가가|나나|다다|라라")];
        assert_eq!(mine_attributes(fields, &lexicon, "|", 2).len(), 2);
    }
}
