/*! Implements a recursive descent parser for alignment formulas.

The grammar follows the fixed precedence `NOT` over `AND` over `OR`, with
parentheses for explicit grouping. Runs of the same binary operator are
collected into a single n-ary [`And`]/[`Or`] node rather than a left-leaning
chain, so `A & B & C` parses as one conjunction of three children.

```text
expr    := term (OR term)*
term    := factor (AND factor)*
factor  := NOT factor | LPAREN expr RPAREN | literal
literal := IDENT ((EQ | NEQ) BIT)? LABEL?
```

A bare identifier reads as `= 1`. Under the two-valued domain `= 0` is the
same constraint as `<> 1` and is normalized to it at parse time, while `<> 0`
is rejected as redundant.

[`And`]: crate::syntax::Ast::And
[`Or`]: crate::syntax::Ast::Or
*/
use crate::config::OperatorConfig;
use crate::lexer::{tokenize, LexError, Token, TokenKind};
use crate::syntax::{Ast, Literal, Polarity, Universe, Var};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Is the type of errors returned by the parser.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum ParseError {
    /// Is a tokenizer error.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Is returned when the input contains no tokens.
    #[error("formula is empty")]
    EmptyFormula,

    /// Is returned when a token cannot start or continue the current production.
    #[error("unexpected {kind} `{text}` at offset {offset}")]
    UnexpectedToken {
        kind: TokenKind,
        text: String,
        offset: usize,
    },

    /// Is returned when the formula ends in the middle of a production.
    #[error("unexpected end of formula")]
    UnexpectedEnd,

    /// Is returned for `<> 0`, which holds in every model of a two-valued
    /// domain and is always a mistake.
    #[error("comparison `{text} 0` at offset {offset} is always true; drop it or write `= 1`")]
    InvalidComparison { text: String, offset: usize },
}

/// Is a parsed formula together with its variable universe and the display
/// labels attached to variables in the source text.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Formula {
    ast: Ast,
    universe: Universe,
    labels: BTreeMap<Var, String>,
}

impl Formula {
    /// Parses `text` with the default operator spellings.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, &OperatorConfig::default())
    }

    /// Parses `text` with the operator spellings of `config`.
    pub fn parse_with(text: &str, config: &OperatorConfig) -> Result<Self, ParseError> {
        debug!(len = text.len(), "parse start");
        let tokens = tokenize(text, config)?;
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            labels: BTreeMap::new(),
        };
        if parser.peek().is_none() {
            return Err(ParseError::EmptyFormula);
        }
        let ast = parser.expr()?;
        if let Some(token) = parser.peek() {
            return Err(unexpected(token));
        }
        let universe = ast.vars().into_iter().cloned().collect::<Universe>();
        debug!(vars = universe.len(), "parse ok");
        Ok(Self {
            ast,
            universe,
            labels: parser.labels,
        })
    }

    /// Returns the syntax tree.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Returns the variables of the formula in order of first appearance.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Returns the display labels collected from the source text.
    pub fn labels(&self) -> &BTreeMap<Var, String> {
        &self.labels
    }

    /// Returns the display label of `var`, if one was given.
    pub fn label(&self, var: &Var) -> Option<&str> {
        self.labels.get(var).map(String::as_str)
    }
}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ast)
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    labels: BTreeMap<Var, String>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        match self.peek() {
            Some(token) if token.kind == kind => self.advance(),
            _ => None,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        match self.advance() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(unexpected(token)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn expr(&mut self) -> Result<Ast, ParseError> {
        let mut children = vec![self.term()?];
        while self.eat(TokenKind::Or).is_some() {
            children.push(self.term()?);
        }
        Ok(Ast::or(children))
    }

    fn term(&mut self) -> Result<Ast, ParseError> {
        let mut children = vec![self.factor()?];
        while self.eat(TokenKind::And).is_some() {
            children.push(self.factor()?);
        }
        Ok(Ast::and(children))
    }

    fn factor(&mut self) -> Result<Ast, ParseError> {
        match self.advance() {
            None => Err(ParseError::UnexpectedEnd),
            Some(token) => match token.kind {
                TokenKind::Not => Ok(Ast::not(self.factor()?)),
                TokenKind::LParen => {
                    let inner = self.expr()?;
                    self.expect(TokenKind::RParen)?;
                    Ok(inner)
                }
                TokenKind::Ident => self.literal(token),
                _ => Err(unexpected(token)),
            },
        }
    }

    fn literal(&mut self, ident: &Token) -> Result<Ast, ParseError> {
        let var = Var::from(ident.text.as_str());
        let polarity = match self.peek().map(|t| t.kind) {
            Some(TokenKind::Eq) => {
                let _ = self.advance();
                let bit = self.expect(TokenKind::Bit)?;
                if bit.text == "1" {
                    Polarity::Eq1
                } else {
                    Polarity::Neq1
                }
            }
            Some(TokenKind::Neq) => {
                let cmp = self.advance().unwrap();
                let bit = self.expect(TokenKind::Bit)?;
                if bit.text == "1" {
                    Polarity::Neq1
                } else {
                    return Err(ParseError::InvalidComparison {
                        text: cmp.text.clone(),
                        offset: cmp.offset,
                    });
                }
            }
            _ => Polarity::Eq1,
        };
        if let Some(label) = self.eat(TokenKind::Label) {
            self.labels.insert(var.clone(), label.text.clone());
        }
        Ok(Ast::literal(Literal::new(var, polarity)))
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        kind: token.kind,
        text: token.text.clone(),
        offset: token.offset,
    }
}
