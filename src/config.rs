/*! Defines the [`OperatorConfig`]: the validated table of operator spellings the
tokenizer recognizes.

Source formulas mix symbolic and word-form operators (`&`/`AND`, `|`/`OR`), and the
accepted spellings are configuration, not code. A configuration is decided once, at
load time; past the tokenizer boundary only typed tokens exist.

[`OperatorConfig`]: crate::config::OperatorConfig
*/
use serde_derive::Deserialize;
use std::fmt;
use thiserror::Error;

/// Is the type of errors arising from an invalid operator configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Is returned when the configuration is not well-formed JSON.
    #[error("operator config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Is returned when a required operator class has no spellings.
    #[error("operator class `{class}` must have at least one token")]
    EmptyClass { class: OpClass },

    /// Is returned when a spelling is blank.
    #[error("operator class `{class}` contains an empty token")]
    EmptyToken { class: OpClass },

    /// Is returned when one spelling appears in two different classes.
    #[error("token `{token}` is declared for both `{first}` and `{second}`")]
    DuplicateToken {
        token: String,
        first: OpClass,
        second: OpClass,
    },
}

/// Identifies a class of operators in the configuration.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum OpClass {
    And,
    Or,
    Not,
    Eq,
    Neq,
    LParen,
    RParen,
}

impl fmt::Display for OpClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            OpClass::And => "AND",
            OpClass::Or => "OR",
            OpClass::Not => "NOT",
            OpClass::Eq => "EQ",
            OpClass::Neq => "NEQ",
            OpClass::LParen => "LPAREN",
            OpClass::RParen => "RPAREN",
        };
        write!(f, "{}", name)
    }
}

/// Is one operator spelling, tagged with its class and whether it is a keyword.
///
/// Keyword spellings (purely alphabetic, e.g. `AND`) match case-insensitively and
/// only at word boundaries; symbol spellings (e.g. `&`, `<>`) match verbatim.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct OpSpec {
    pub token: String,
    pub class: OpClass,
    pub word: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(rename = "AND")]
    and: Vec<String>,
    #[serde(rename = "OR")]
    or: Vec<String>,
    #[serde(rename = "NOT", default)]
    not: Vec<String>,
    #[serde(rename = "EQ")]
    eq: Vec<String>,
    #[serde(rename = "NEQ")]
    neq: Vec<String>,
    #[serde(rename = "LPAREN")]
    lparen: Vec<String>,
    #[serde(rename = "RPAREN")]
    rparen: Vec<String>,
}

/// Is a validated operator configuration. Spellings are normalized (keywords
/// uppercased) and guaranteed unique across classes.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct OperatorConfig {
    specs: Vec<OpSpec>,
}

impl OperatorConfig {
    /// Builds a configuration from explicit class token lists, validating every
    /// spelling. `NOT` may be empty; every other class needs at least one spelling.
    pub fn new(
        and: Vec<String>,
        or: Vec<String>,
        not: Vec<String>,
        eq: Vec<String>,
        neq: Vec<String>,
        lparen: Vec<String>,
        rparen: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let classes = vec![
            (OpClass::And, and, true),
            (OpClass::Or, or, true),
            (OpClass::Not, not, false),
            (OpClass::Eq, eq, true),
            (OpClass::Neq, neq, true),
            (OpClass::LParen, lparen, true),
            (OpClass::RParen, rparen, true),
        ];

        let mut specs: Vec<OpSpec> = Vec::new();
        for (class, tokens, required) in classes {
            if required && tokens.is_empty() {
                return Err(ConfigError::EmptyClass { class });
            }
            for raw in tokens {
                let token = normalize_token(&raw);
                if token.is_empty() {
                    return Err(ConfigError::EmptyToken { class });
                }
                if let Some(existing) = specs.iter().find(|s| s.token == token) {
                    if existing.class != class {
                        return Err(ConfigError::DuplicateToken {
                            token,
                            first: existing.class,
                            second: class,
                        });
                    }
                    continue;
                }
                let word = is_word_token(&token);
                specs.push(OpSpec { token, class, word });
            }
        }

        // Longest-match-first, so `!=` wins over `!` and `AND` over `A`-prefixed idents.
        specs.sort_by(|a, b| b.token.len().cmp(&a.token.len()));
        Ok(Self { specs })
    }

    /// Loads and validates a configuration from its JSON form, e.g.
    /// `{"AND": ["&", "AND"], "OR": ["|", "OR"], ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Self::new(
            raw.and, raw.or, raw.not, raw.eq, raw.neq, raw.lparen, raw.rparen,
        )
    }

    /// Returns the operator spellings, longest first.
    #[inline(always)]
    pub fn specs(&self) -> &[OpSpec] {
        &self.specs
    }
}

impl Default for OperatorConfig {
    /// The stock operator set: `&`/`AND`, `|`/`OR`, `!`/`NOT`, `<>`/`!=`, `=` and
    /// round parentheses.
    fn default() -> Self {
        Self::new(
            vec!["&".into(), "AND".into()],
            vec!["|".into(), "OR".into()],
            vec!["!".into(), "NOT".into()],
            vec!["=".into()],
            vec!["<>".into(), "!=".into()],
            vec!["(".into()],
            vec![")".into()],
        )
        .expect("default operator config is valid")
    }
}

fn is_word_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| ch.is_ascii_alphabetic())
}

fn normalize_token(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_word_token(trimmed) {
        trimmed.to_ascii_uppercase()
    } else {
        trimmed.to_string()
    }
}
