//! Tokenizer for the declaration subset.
//!
//! Produces a flat token stream: identifiers, string literals (unescaped),
//! number/char atoms, and single-character punctuation. Line and block
//! comments are skipped.

use crate::error::GenerateError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Identifier or keyword.
    Ident(String),
    /// String literal content, quotes and escapes resolved.
    Str(String),
    /// Number or character literal, kept as raw text.
    Atom(String),
    /// A single punctuation character.
    Punct(char),
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Ident(text) => format!("'{text}'"),
            Self::Str(text) => format!("string \"{text}\""),
            Self::Atom(text) => format!("'{text}'"),
            Self::Punct(c) => format!("'{c}'"),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, GenerateError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
        } else if c == '/' && chars.get(i + 1) == Some(&'/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
        } else if c == '/' && chars.get(i + 1) == Some(&'*') {
            let start = i;
            i += 2;
            loop {
                if i + 1 >= chars.len() {
                    return Err(GenerateError::snippet(format!(
                        "unterminated block comment starting at offset {start}"
                    )));
                }
                if chars[i] == '*' && chars[i + 1] == '/' {
                    i += 2;
                    break;
                }
                i += 1;
            }
        } else if c == '"' {
            let start = i;
            i += 1;
            let mut text = String::new();
            loop {
                match chars.get(i) {
                    None => {
                        return Err(GenerateError::snippet(format!(
                            "unterminated string literal starting at offset {start}"
                        )));
                    }
                    Some('"') => {
                        i += 1;
                        break;
                    }
                    Some('\\') => {
                        i += 1;
                        match chars.get(i) {
                            Some(&escaped) => {
                                text.push(unescape(escaped));
                                i += 1;
                            }
                            None => {
                                return Err(GenerateError::snippet(format!(
                                    "unterminated string literal starting at offset {start}"
                                )));
                            }
                        }
                    }
                    Some(&ch) => {
                        text.push(ch);
                        i += 1;
                    }
                }
            }
            tokens.push(Token::Str(text));
        } else if c == '\'' {
            let start = i;
            let mut raw = String::from('\'');
            i += 1;
            loop {
                match chars.get(i) {
                    None => {
                        return Err(GenerateError::snippet(format!(
                            "unterminated character literal starting at offset {start}"
                        )));
                    }
                    Some('\\') => {
                        raw.push('\\');
                        if let Some(&escaped) = chars.get(i + 1) {
                            raw.push(escaped);
                        }
                        i += 2;
                    }
                    Some('\'') => {
                        raw.push('\'');
                        i += 1;
                        break;
                    }
                    Some(&ch) => {
                        raw.push(ch);
                        i += 1;
                    }
                }
            }
            tokens.push(Token::Atom(raw));
        } else if c.is_ascii_digit() {
            let mut raw = String::new();
            while let Some(&ch) = chars.get(i) {
                if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                    raw.push(ch);
                    i += 1;
                } else {
                    break;
                }
            }
            tokens.push(Token::Atom(raw));
        } else if is_ident_start(c) {
            let mut text = String::new();
            while let Some(&ch) = chars.get(i) {
                if is_ident_continue(ch) {
                    text.push(ch);
                    i += 1;
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(text));
        } else {
            tokens.push(Token::Punct(c));
            i += 1;
        }
    }

    Ok(tokens)
}

fn unescape(escaped: char) -> char {
    match escaped {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(text: &str) -> Token {
        Token::Ident(text.to_string())
    }

    #[test]
    fn tokenizes_an_annotated_signature() {
        let tokens = tokenize(r#"@GetMapping("/hello") void go();"#).expect("tokens");
        assert_eq!(
            tokens,
            vec![
                Token::Punct('@'),
                ident("GetMapping"),
                Token::Punct('('),
                Token::Str("/hello".to_string()),
                Token::Punct(')'),
                ident("void"),
                ident("go"),
                Token::Punct('('),
                Token::Punct(')'),
                Token::Punct(';'),
            ]
        );
    }

    #[test]
    fn skips_line_and_block_comments() {
        let tokens = tokenize("class A // trailing\n { /* body */ }").expect("tokens");
        assert_eq!(
            tokens,
            vec![
                ident("class"),
                ident("A"),
                Token::Punct('{'),
                Token::Punct('}'),
            ]
        );
    }

    #[test]
    fn resolves_string_escapes() {
        let tokens = tokenize(r#""a\"b\\c""#).expect("tokens");
        assert_eq!(tokens, vec![Token::Str(r#"a"b\c"#.to_string())]);
    }

    #[test]
    fn rejects_unterminated_strings() {
        let error = tokenize(r#"" open"#).expect_err("should fail");
        assert!(error.to_string().contains("unterminated string literal"));
    }

    #[test]
    fn keeps_numeric_literals_as_atoms() {
        let tokens = tokenize("int x = 42;").expect("tokens");
        assert_eq!(
            tokens,
            vec![
                ident("int"),
                ident("x"),
                Token::Punct('='),
                Token::Atom("42".to_string()),
                Token::Punct(';'),
            ]
        );
    }
}
