/*! Implements the tokenizer for alignment formulas.

The tokenizer is a pure function over the input text: it produces a lazy, finite
sequence of typed [`Token`]s driven by an [`OperatorConfig`], and reports malformed
input as a [`LexError`] carrying the byte offset of the offending character. Operator
spellings are resolved here, once; later stages never dispatch on raw text.

[`OperatorConfig`]: crate::config::OperatorConfig
*/
use crate::config::{OpClass, OperatorConfig};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Is the type of a [`Token`].
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TokenKind {
    /// A conjunction operator (`&`, `AND`).
    And,
    /// A disjunction operator (`|`, `OR`).
    Or,
    /// A negation operator (`!`, `NOT`).
    Not,
    /// An equality comparator (`=`).
    Eq,
    /// An inequality comparator (`<>`, `!=`).
    Neq,
    /// An opening parenthesis.
    LParen,
    /// A closing parenthesis.
    RParen,
    /// A variable identifier (`[A-Za-z0-9_]+`).
    Ident,
    /// The comparison value `0` or `1`, only ever directly after a comparator.
    Bit,
    /// A double-quoted display label attached to the preceding identifier.
    Label,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            TokenKind::And => "`AND`",
            TokenKind::Or => "`OR`",
            TokenKind::Not => "`NOT`",
            TokenKind::Eq => "`=`",
            TokenKind::Neq => "`<>`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Ident => "`identifier`",
            TokenKind::Bit => "`0` or `1`",
            TokenKind::Label => "`label`",
        };
        write!(f, "{}", text)
    }
}

/// Is one token of a formula, with its source text and byte offset.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

/// Is the type of errors returned by the tokenizer.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum LexError {
    /// Is returned when no token can start at the given offset.
    #[error("unrecognized character `{ch}` at offset {offset}")]
    UnknownCharacter { ch: char, offset: usize },

    /// Is returned when a display label is missing its closing quote.
    #[error("unterminated label starting at offset {offset}")]
    UnterminatedLabel { offset: usize },

    /// Is returned when a comparator is not followed by `0` or `1`.
    #[error("expected `0` or `1` after comparator at offset {offset}")]
    ExpectedBit { offset: usize },
}

/// A lazy tokenizer over a formula string. Restart by constructing a new instance;
/// after an error the iterator is fused.
pub struct Lexer<'a> {
    text: &'a str,
    config: &'a OperatorConfig,
    pos: usize,
    last: Option<TokenKind>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a tokenizer over `text` using the operator spellings of `config`.
    pub fn new(text: &'a str, config: &'a OperatorConfig) -> Self {
        Self {
            text,
            config,
            pos: 0,
            last: None,
            failed: false,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.text[self.pos..].chars().next() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn match_operator(&self) -> Option<(TokenKind, usize)> {
        for spec in self.config.specs() {
            let end = self.pos + spec.token.len();
            let slice = match self.text.get(self.pos..end) {
                Some(slice) => slice,
                None => continue,
            };
            let matched = if spec.word {
                slice.eq_ignore_ascii_case(&spec.token) && !self.word_char_at(end)
            } else {
                slice == spec.token
            };
            if matched {
                return Some((kind_of(spec.class), spec.token.len()));
            }
        }
        None
    }

    fn word_char_at(&self, offset: usize) -> bool {
        self.text
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map(is_word_char)
            .unwrap_or(false)
    }

    fn lex_label(&mut self, start: usize) -> Result<Token, LexError> {
        let body = &self.text[start + 1..];
        match body.find('"') {
            Some(end) => {
                self.pos = start + 1 + end + 1;
                Ok(Token {
                    kind: TokenKind::Label,
                    text: body[..end].to_string(),
                    offset: start,
                })
            }
            None => Err(LexError::UnterminatedLabel { offset: start }),
        }
    }

    fn lex_bit(&mut self, start: usize) -> Result<Token, LexError> {
        match self.text[start..].chars().next() {
            Some(ch) if ch == '0' || ch == '1' => {
                self.pos = start + 1;
                Ok(Token {
                    kind: TokenKind::Bit,
                    text: ch.to_string(),
                    offset: start,
                })
            }
            _ => Err(LexError::ExpectedBit { offset: start }),
        }
    }

    fn lex_ident(&mut self, start: usize) -> Result<Token, LexError> {
        let mut end = start;
        for ch in self.text[start..].chars() {
            if !is_word_char(ch) {
                break;
            }
            end += ch.len_utf8();
        }
        if end == start {
            let ch = self.text[start..].chars().next().unwrap();
            return Err(LexError::UnknownCharacter { ch, offset: start });
        }
        self.pos = end;
        Ok(Token {
            kind: TokenKind::Ident,
            text: self.text[start..end].to_string(),
            offset: start,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_whitespace();
        let start = self.pos;
        let expects_bit = self.last == Some(TokenKind::Eq) || self.last == Some(TokenKind::Neq);
        if start >= self.text.len() {
            if expects_bit {
                self.failed = true;
                return Some(Err(LexError::ExpectedBit { offset: start }));
            }
            return None;
        }

        let result = if expects_bit {
            // A comparator binds to the comparison value that follows it, so `X1`
            // in `A=1 & X1` stays an identifier while the `1` after `=` is a bit.
            self.lex_bit(start)
        } else if self.text[start..].starts_with('"') {
            self.lex_label(start)
        } else if let Some((kind, len)) = self.match_operator() {
            self.pos = start + len;
            Ok(Token {
                kind,
                text: self.text[start..start + len].to_string(),
                offset: start,
            })
        } else {
            self.lex_ident(start)
        };

        match &result {
            Ok(token) => self.last = Some(token.kind),
            Err(_) => self.failed = true,
        }
        Some(result)
    }
}

fn kind_of(class: OpClass) -> TokenKind {
    match class {
        OpClass::And => TokenKind::And,
        OpClass::Or => TokenKind::Or,
        OpClass::Not => TokenKind::Not,
        OpClass::Eq => TokenKind::Eq,
        OpClass::Neq => TokenKind::Neq,
        OpClass::LParen => TokenKind::LParen,
        OpClass::RParen => TokenKind::RParen,
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Tokenizes `text` eagerly, stopping at the first malformed token.
pub fn tokenize(text: &str, config: &OperatorConfig) -> Result<Vec<Token>, LexError> {
    debug!(len = text.len(), "tokenize start");
    let tokens = Lexer::new(text, config).collect::<Result<Vec<_>, _>>()?;
    debug!(tokens = tokens.len(), "tokenize ok");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        let config = OperatorConfig::default();
        tokenize(text, &config)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn symbols_and_keywords() {
        use TokenKind::*;
        assert_eq!(vec![Ident, And, Ident], kinds("A & B"));
        assert_eq!(vec![Ident, And, Ident], kinds("A AND B"));
        assert_eq!(vec![Ident, Or, Ident], kinds("A or B"));
        assert_eq!(
            vec![Not, LParen, Ident, Or, Ident, RParen],
            kinds("NOT (A | B)")
        );
    }

    #[test]
    fn comparators_bind_bits() {
        use TokenKind::*;
        assert_eq!(vec![Ident, Eq, Bit], kinds("A = 1"));
        assert_eq!(vec![Ident, Eq, Bit], kinds("A=0"));
        assert_eq!(vec![Ident, Neq, Bit], kinds("A<>1"));
        assert_eq!(vec![Ident, Neq, Bit], kinds("A!=1"));
        // `!` before an identifier is negation, not a comparator.
        assert_eq!(vec![Not, Ident], kinds("!A"));
    }

    #[test]
    fn digits_stay_in_identifiers() {
        let config = OperatorConfig::default();
        let tokens = tokenize("A1 & B_2", &config).unwrap();
        assert_eq!("A1", tokens[0].text);
        assert_eq!("B_2", tokens[2].text);
    }

    #[test]
    fn keywords_need_word_boundaries() {
        use TokenKind::*;
        // `ANDY` and `ORB` are identifiers, not operators.
        assert_eq!(vec![Ident], kinds("ANDY"));
        assert_eq!(vec![Ident, And, Ident], kinds("ORB AND ANDY"));
    }

    #[test]
    fn labels() {
        let config = OperatorConfig::default();
        let tokens = tokenize(r#"A3_7 "uses renewable energy""#, &config).unwrap();
        assert_eq!(TokenKind::Label, tokens[1].kind);
        assert_eq!("uses renewable energy", tokens[1].text);
        assert_eq!(5, tokens[1].offset);
    }

    #[test]
    fn offsets_are_reported() {
        let config = OperatorConfig::default();
        let tokens = tokenize("A & B", &config).unwrap();
        assert_eq!(vec![0, 2, 4], tokens.iter().map(|t| t.offset).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_character() {
        let config = OperatorConfig::default();
        let err = tokenize("A & %", &config).unwrap_err();
        assert_eq!(
            LexError::UnknownCharacter {
                ch: '%',
                offset: 4
            },
            err
        );
    }

    #[test]
    fn ordering_comparators_are_rejected() {
        let config = OperatorConfig::default();
        let err = tokenize("A <= 1", &config).unwrap_err();
        assert_eq!(
            LexError::UnknownCharacter {
                ch: '<',
                offset: 2
            },
            err
        );
        let err = tokenize("A >= 1", &config).unwrap_err();
        assert_eq!(
            LexError::UnknownCharacter {
                ch: '>',
                offset: 2
            },
            err
        );
    }

    #[test]
    fn unterminated_label() {
        let config = OperatorConfig::default();
        let err = tokenize(r#"A "dangling"#, &config).unwrap_err();
        assert_eq!(LexError::UnterminatedLabel { offset: 2 }, err);
    }

    #[test]
    fn comparator_without_bit() {
        let config = OperatorConfig::default();
        let err = tokenize("A = B", &config).unwrap_err();
        assert_eq!(LexError::ExpectedBit { offset: 4 }, err);
        let err = tokenize("A =", &config).unwrap_err();
        assert_eq!(LexError::ExpectedBit { offset: 3 }, err);
    }

    #[test]
    fn lexer_fuses_after_error() {
        let config = OperatorConfig::default();
        let mut lexer = Lexer::new("A %", &config);
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }
}
