/// Utterance parsing: split recognized text into a command phrase and its parameter.
use crate::registry::CommandTable;
use crate::types::{Arity, CommandPhrase};

/// A parsed utterance. `phrase` is `None` when no registered phrase matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub phrase: Option<CommandPhrase>,
    /// Zero or one parameter: everything after the phrase, for unary commands.
    pub parameters: Vec<String>,
}

impl ParseResult {
    /// The matched phrase, or `""` when nothing matched.
    pub fn phrase_str(&self) -> &str {
        self.phrase.as_ref().map(CommandPhrase::as_str).unwrap_or("")
    }

    pub fn is_match(&self) -> bool {
        self.phrase.is_some()
    }
}

/// Match the shortest registered token-prefix of `text`.
///
/// Tokens are produced by splitting on single spaces, so repeated spaces yield
/// empty tokens. Scanning stops at the first prefix length that is registered;
/// a longer phrase that starts with a shorter registered one is never reached.
/// For unary commands the remaining tokens, re-joined with single spaces, form
/// the parameter. Case is left untouched.
pub fn parse(table: &CommandTable, text: &str) -> ParseResult {
    let tokens: Vec<&str> = text.split(' ').collect();

    for i in 1..=tokens.len() {
        let candidate = tokens[..i].join(" ");
        let Some(entry) = table.lookup(&candidate) else {
            continue;
        };

        let parameters = if entry.arity() == Arity::Unary && i < tokens.len() {
            vec![tokens[i..].join(" ")]
        } else {
            Vec::new()
        };
        return ParseResult {
            phrase: Some(entry.phrase.clone()),
            parameters,
        };
    }

    ParseResult::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{builtin_test_table, noop_nullary, noop_unary};

    #[test]
    fn unary_command_takes_rest_as_parameter() {
        let table = builtin_test_table();
        let result = parse(&table, "wyszukaj kotki");
        assert_eq!(result.phrase_str(), "wyszukaj");
        assert_eq!(result.parameters, ["kotki"]);
    }

    #[test]
    fn multi_word_phrase_keeps_parameter_case() {
        let table = builtin_test_table();
        let result = parse(&table, "sprawdź pogodę Warszawa");
        assert_eq!(result.phrase_str(), "sprawdź pogodę");
        assert_eq!(result.parameters, ["Warszawa"]);
    }

    #[test]
    fn multi_word_parameter_is_rejoined() {
        let table = builtin_test_table();
        let result = parse(&table, "powiedz dzień dobry wszystkim");
        assert_eq!(result.phrase_str(), "powiedz");
        assert_eq!(result.parameters, ["dzień dobry wszystkim"]);
    }

    #[test]
    fn unknown_text_yields_empty_result() {
        let table = builtin_test_table();
        let result = parse(&table, "coś nieznanego");
        assert_eq!(result.phrase_str(), "");
        assert!(result.parameters.is_empty());
        assert!(!result.is_match());
    }

    #[test]
    fn empty_text_yields_empty_result() {
        let table = builtin_test_table();
        assert_eq!(parse(&table, ""), ParseResult::default());
    }

    #[test]
    fn nullary_command_without_trailing_tokens() {
        let table = builtin_test_table();
        let result = parse(&table, "komendy");
        assert_eq!(result.phrase_str(), "komendy");
        assert!(result.parameters.is_empty());
    }

    #[test]
    fn nullary_command_ignores_trailing_tokens() {
        let table = builtin_test_table();
        let result = parse(&table, "komendy proszę");
        assert_eq!(result.phrase_str(), "komendy");
        assert!(result.parameters.is_empty());
    }

    #[test]
    fn unary_command_without_parameter_has_none() {
        let table = builtin_test_table();
        let result = parse(&table, "powiedz");
        assert_eq!(result.phrase_str(), "powiedz");
        assert!(result.parameters.is_empty());
    }

    #[test]
    fn partial_multi_word_phrase_does_not_match() {
        let table = builtin_test_table();
        assert!(!parse(&table, "sprawdź").is_match());
        assert!(!parse(&table, "włącz tryb").is_match());
    }

    #[test]
    fn repeated_spaces_produce_empty_tokens() {
        let table = builtin_test_table();
        let result = parse(&table, "wyszukaj  kotki");
        assert_eq!(result.phrase_str(), "wyszukaj");
        assert_eq!(result.parameters, [" kotki"]);

        // The phrase itself must be separated by exactly one space.
        assert!(!parse(&table, "sprawdź  pogodę kraków").is_match());
    }

    #[test]
    fn parser_does_not_lowercase() {
        let table = builtin_test_table();
        assert!(!parse(&table, "Komendy").is_match());
    }

    #[test]
    fn shorter_phrase_shadows_longer_one() {
        let mut table = CommandTable::new();
        table.register("szukaj", "", noop_unary()).unwrap();
        table.register("szukaj wikipedia", "", noop_unary()).unwrap();
        table.register("tryb", "", noop_nullary()).unwrap();
        table.register("tryb cichy", "", noop_nullary()).unwrap();

        let shadowed = table.shadowed_phrases();
        assert_eq!(shadowed.len(), 2);

        for (shorter, longer) in shadowed {
            for suffix in ["", " kot", " pies i kot"] {
                let input = format!("{longer}{suffix}");
                let result = parse(&table, &input);
                assert_eq!(result.phrase.as_ref(), Some(shorter), "input: {input}");
                assert_ne!(result.phrase.as_ref(), Some(longer));
            }
        }

        let result = parse(&table, "szukaj wikipedia kot");
        assert_eq!(result.parameters, ["wikipedia kot"]);
    }

    #[test]
    fn builtin_table_has_no_shadowed_phrases() {
        assert!(builtin_test_table().shadowed_phrases().is_empty());
    }
}
