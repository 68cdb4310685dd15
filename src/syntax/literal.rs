/*! Defines [`Var`], [`Polarity`] and [`Literal`] as the leaves of alignment formulas.

[`Var`]: crate::syntax::Var
[`Polarity`]: crate::syntax::Polarity
[`Literal`]: crate::syntax::Literal
*/
use serde_derive::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Represents a boolean variable with an opaque identifier code.
///
/// Variables order *naturally*: runs of digits compare numerically, so `A2` sorts
/// before `A10`. This ordering drives the presentation order of literals inside a
/// clause and is stable for identical inputs.
#[derive(PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct Var(pub String);

impl Var {
    /// Returns the identifier code of the receiver.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl<S: Into<String>> From<S> for Var {
    fn from(name: S) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Ord for Var {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Var {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Compares two identifiers piecewise, with digit runs compared as numbers and
// everything else case-insensitively. Ties are broken by the caller.
fn natural_cmp(left: &str, right: &str) -> Ordering {
    let mut lhs = left.chars().peekable();
    let mut rhs = right.chars().peekable();
    loop {
        match (lhs.peek().copied(), rhs.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                if l.is_ascii_digit() && r.is_ascii_digit() {
                    let ln = take_number(&mut lhs);
                    let rn = take_number(&mut rhs);
                    match ln.cmp(&rn) {
                        Ordering::Equal => continue,
                        ord => return ord,
                    }
                }
                // A digit sorts before any other character, as in a numeric-aware sort.
                match (l.is_ascii_digit(), r.is_ascii_digit()) {
                    (true, false) => return Ordering::Less,
                    (false, true) => return Ordering::Greater,
                    _ => {}
                }
                let lc = l.to_ascii_lowercase();
                let rc = r.to_ascii_lowercase();
                match lc.cmp(&rc) {
                    Ordering::Equal => {
                        lhs.next();
                        rhs.next();
                    }
                    ord => return ord,
                }
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars>) -> u128 {
    let mut value: u128 = 0;
    while let Some(ch) = chars.peek().copied() {
        if !ch.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(ch.to_digit(10).unwrap() as u128);
        chars.next();
    }
    value
}

/// Is the polarity of a [`Literal`]: asserted true or asserted false.
///
/// The variable domain is two-valued, so a source comparison `X = 0` denotes the
/// same polarity as `X <> 1` and both parse to [`Polarity::Neq1`].
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Polarity {
    /// The variable's comparison value equals `1`.
    Eq1,

    /// The variable's comparison value does not equal `1`.
    Neq1,
}

impl Polarity {
    /// Returns the opposite polarity.
    pub fn complement(self) -> Self {
        match self {
            Polarity::Eq1 => Polarity::Neq1,
            Polarity::Neq1 => Polarity::Eq1,
        }
    }
}

/// Represents a variable together with a polarity. Two literals on the same variable
/// with opposite polarity are logical complements.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug, Serialize, Deserialize)]
pub struct Literal {
    var: Var,
    polarity: Polarity,
}

impl Literal {
    /// Creates a new literal over `var` with the given `polarity`.
    pub fn new<V: Into<Var>>(var: V, polarity: Polarity) -> Self {
        Self {
            var: var.into(),
            polarity,
        }
    }

    /// Creates a positive (`Eq1`) literal over `var`.
    pub fn pos<V: Into<Var>>(var: V) -> Self {
        Self::new(var, Polarity::Eq1)
    }

    /// Creates a negative (`Neq1`) literal over `var`.
    pub fn neg<V: Into<Var>>(var: V) -> Self {
        Self::new(var, Polarity::Neq1)
    }

    /// Returns the variable of the receiver.
    #[inline(always)]
    pub fn var(&self) -> &Var {
        &self.var
    }

    /// Returns the polarity of the receiver.
    #[inline(always)]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Returns the complement of the receiver: the same variable with the opposite
    /// polarity.
    pub fn complement(&self) -> Self {
        Self {
            var: self.var.clone(),
            polarity: self.polarity.complement(),
        }
    }

    /// Returns true if `other` is the complement of the receiver.
    pub fn is_complement_of(&self, other: &Self) -> bool {
        self.var == other.var && self.polarity != other.polarity
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.polarity {
            Polarity::Eq1 => write!(f, "{}", self.var),
            Polarity::Neq1 => write!(f, "{}<>1", self.var),
        }
    }
}
