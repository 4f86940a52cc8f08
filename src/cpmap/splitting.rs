//! Depth-aware splitting of array contents
//!
//! Every column in a save document is written as `Array(e1, e2, ...)`, and elements
//! themselves may be composite (`Array(...)`, `Vector(...)`), so a plain split on
//! commas would cut records in half. The splitter lexes the content into parens,
//! commas and opaque text runs with logos, tracks the parenthesis depth over that
//! token stream and only splits at depth 0.
//!
//! This is depth counting, not recursive descent: an unbalanced `)` just lowers the
//! depth and never fails.

use logos::Logos;

/// Tokens relevant to element splitting
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum SplitToken {
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token(",")]
    Comma,

    // Everything else, whitespace included, is opaque to the splitter
    #[regex(r"[^(),]+")]
    Text,
}

/// Tokenize array content, keeping spans so callers can slice the source
pub fn tokenize_with_spans(content: &str) -> Vec<(SplitToken, logos::Span)> {
    let mut lexer = SplitToken::lexer(content);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}

/// Split the inner text of an `Array(...)` expression into its top-level elements.
///
/// Elements are trimmed; empty elements (blank input, trailing commas) are dropped.
pub fn split_array_elements(content: &str) -> Vec<String> {
    let mut elements = Vec::new();
    if content.trim().is_empty() {
        return elements;
    }

    let mut depth: i32 = 0;
    let mut last_split = 0;
    for (token, span) in tokenize_with_spans(content) {
        match token {
            SplitToken::OpenParen => depth += 1,
            SplitToken::CloseParen => depth -= 1,
            SplitToken::Comma if depth == 0 => {
                elements.push(content[last_split..span.start].trim().to_string());
                last_split = span.end;
            }
            SplitToken::Comma | SplitToken::Text => {}
        }
    }
    elements.push(content[last_split..].trim().to_string());

    elements.retain(|element| !element.is_empty());
    elements
}

/// Strip a `Name(` prefix and the trailing `)` from trimmed text.
///
/// Returns the inner content, or `None` when the text is not of that shape.
pub fn strip_call<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.trim()
        .strip_prefix(name)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_nested_arrays_at_top_level_only() {
        assert_eq!(
            split_array_elements("Array(1,2), Array(3,4)"),
            vec!["Array(1,2)", "Array(3,4)"]
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(split_array_elements("").is_empty());
        assert!(split_array_elements("   \n\t ").is_empty());
    }

    #[test]
    fn test_trims_and_drops_empty_elements() {
        assert_eq!(
            split_array_elements("  True ,\n False,  ,0 , "),
            vec!["True", "False", "0"]
        );
    }

    #[test]
    fn test_deeply_nested_elements() {
        let content = "Array(Vector(0, 0, 0), 1.0, 11, Array(Vector(0, 1, 0), 5)), False";
        let elements = split_array_elements(content);
        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements[0],
            "Array(Vector(0, 0, 0), 1.0, 11, Array(Vector(0, 1, 0), 5))"
        );
        assert_eq!(elements[1], "False");
    }

    #[test]
    fn test_unbalanced_close_paren_does_not_panic() {
        let elements = split_array_elements("1), 2, 3");
        assert_eq!(elements, vec!["1), 2, 3"]);
    }

    #[test]
    fn test_tokenizer_spans() {
        let tokens = tokenize_with_spans("a(b,c)");
        let kinds: Vec<SplitToken> = tokens.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            kinds,
            vec![
                SplitToken::Text,
                SplitToken::OpenParen,
                SplitToken::Text,
                SplitToken::Comma,
                SplitToken::Text,
                SplitToken::CloseParen,
            ]
        );
        assert_eq!(tokens[3].1, 3..4);
    }

    #[test]
    fn test_strip_call() {
        assert_eq!(strip_call(" Vector(1, 2, 3) ", "Vector"), Some("1, 2, 3"));
        assert_eq!(strip_call("Array()", "Array"), Some(""));
        assert_eq!(strip_call("Vector(1, 2, 3", "Vector"), None);
        assert_eq!(strip_call("Array(1)", "Vector"), None);
    }
}
