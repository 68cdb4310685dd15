/*! Defines the abstract syntax tree ([`Ast`]) of a parsed alignment formula and the
formula's [`Universe`] of distinct variables.

[`Ast`]: crate::syntax::Ast
[`Universe`]: crate::syntax::Universe
*/
use super::{Literal, Var};
use itertools::Itertools;
use serde_derive::Serialize;
use std::fmt;

/// Is the abstract syntax tree of an alignment formula.
///
/// A well-formed tree has [`Literal`]s at its leaves, and every `And`/`Or` node holds
/// at least two children: the [`Ast::and`] and [`Ast::or`] constructors flatten runs
/// of the same operator and collapse singleton groups, so associative chains arrive
/// already n-ary at the DNF transformation. An empty group denotes the identity of
/// its operator: the empty conjunction holds in every row and the empty disjunction
/// in none, and display, evaluation and the DNF transformation all agree on this
/// reading.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Ast {
    /// Is a leaf, wrapping a [`Literal`].
    Literal(Literal),

    /// Is the negation of a sub-formula.
    Not(Box<Ast>),

    /// Is an n-ary conjunction.
    And(Vec<Ast>),

    /// Is an n-ary disjunction.
    Or(Vec<Ast>),
}

impl Ast {
    /// Creates a leaf node from `literal`.
    pub fn literal(literal: Literal) -> Self {
        Self::Literal(literal)
    }

    /// Creates the negation of `formula`.
    pub fn not(formula: Self) -> Self {
        Self::Not(Box::new(formula))
    }

    /// Creates an n-ary conjunction of `children`, flattening nested conjunctions
    /// and collapsing a singleton group to its only child.
    pub fn and(children: Vec<Self>) -> Self {
        Self::nary(children, true)
    }

    /// Creates an n-ary disjunction of `children`, flattening nested disjunctions
    /// and collapsing a singleton group to its only child.
    pub fn or(children: Vec<Self>) -> Self {
        Self::nary(children, false)
    }

    fn nary(children: Vec<Self>, conjunction: bool) -> Self {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Self::And(grand) if conjunction => flat.extend(grand),
                Self::Or(grand) if !conjunction => flat.extend(grand),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.into_iter().next().unwrap()
        } else if conjunction {
            Self::And(flat)
        } else {
            Self::Or(flat)
        }
    }

    /// Returns the distinct variables of the receiver in first-appearance order.
    pub fn vars(&self) -> Vec<&Var> {
        match self {
            Self::Literal(lit) => vec![lit.var()],
            Self::Not(child) => child.vars(),
            Self::And(children) | Self::Or(children) => {
                children.iter().flat_map(Self::vars).unique().collect()
            }
        }
    }
}

impl From<Literal> for Ast {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{}", lit),
            Self::Not(child) => match **child {
                Self::Literal(_) => write!(f, "!{}", child),
                _ => write!(f, "!({})", child),
            },
            Self::And(children) => {
                if children.is_empty() {
                    return write!(f, "true");
                }
                let parts = children.iter().map(Self::bracket).join(" & ");
                write!(f, "{}", parts)
            }
            Self::Or(children) => {
                if children.is_empty() {
                    return write!(f, "false");
                }
                let parts = children.iter().map(Self::bracket).join(" | ");
                write!(f, "{}", parts)
            }
        }
    }
}

impl Ast {
    fn bracket(child: &Self) -> String {
        match child {
            Self::Literal(_) | Self::Not(_) => child.to_string(),
            _ => format!("({})", child),
        }
    }
}

/// Is the ordered set of distinct variables referenced by a formula, in first
/// appearance order. The order drives truth-table enumeration and the column
/// ordering of rendered output.
#[derive(PartialEq, Eq, Clone, Debug, Default, Serialize)]
pub struct Universe(Vec<Var>);

impl Universe {
    /// Creates an empty universe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `var` unless it is already present, preserving first-seen order.
    pub fn insert(&mut self, var: Var) {
        if !self.0.contains(&var) {
            self.0.push(var);
        }
    }

    /// Returns the position of `var` in the receiver.
    pub fn index_of(&self, var: &Var) -> Option<usize> {
        self.0.iter().position(|v| v == var)
    }

    /// Returns the variables of the receiver in order.
    #[inline(always)]
    pub fn vars(&self) -> &[Var] {
        &self.0
    }

    /// Returns the number of variables in the receiver.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the receiver contains no variables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Universe {
    type Item = &'a Var;
    type IntoIter = std::slice::Iter<'a, Var>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::iter::FromIterator<Var> for Universe {
    fn from_iter<I: IntoIterator<Item = Var>>(iter: I) -> Self {
        let mut universe = Self::new();
        for var in iter {
            universe.insert(var);
        }
        universe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nary_constructors_flatten() {
        let a = Ast::literal(Literal::pos("A"));
        let b = Ast::literal(Literal::pos("B"));
        let c = Ast::literal(Literal::pos("C"));

        let nested = Ast::and(vec![Ast::and(vec![a.clone(), b.clone()]), c.clone()]);
        match nested {
            Ast::And(children) => assert_eq!(3, children.len()),
            other => panic!("expected And, got {:?}", other),
        }

        // Mixed operators must not flatten across the boundary.
        let mixed = Ast::or(vec![Ast::and(vec![a.clone(), b.clone()]), c.clone()]);
        match mixed {
            Ast::Or(children) => assert_eq!(2, children.len()),
            other => panic!("expected Or, got {:?}", other),
        }
    }

    #[test]
    fn singleton_collapses() {
        let a = Ast::literal(Literal::pos("A"));
        assert_eq!(a, Ast::and(vec![a.clone()]));
        assert_eq!(a, Ast::or(vec![a.clone()]));
    }

    #[test]
    fn vars_in_first_appearance_order() {
        let ast = Ast::and(vec![
            Ast::literal(Literal::pos("B")),
            Ast::or(vec![
                Ast::literal(Literal::pos("A")),
                Ast::literal(Literal::neg("B")),
            ]),
        ]);
        let vars = ast.vars();
        assert_eq!(vec![&Var::from("B"), &Var::from("A")], vars);
    }

    #[test]
    fn display() {
        let ast = Ast::and(vec![
            Ast::literal(Literal::pos("X")),
            Ast::or(vec![
                Ast::literal(Literal::pos("Y")),
                Ast::literal(Literal::neg("Z")),
            ]),
        ]);
        assert_eq!("X & (Y | Z<>1)", ast.to_string());
        assert_eq!(
            "!(X & Y)",
            Ast::not(Ast::and(vec![
                Ast::literal(Literal::pos("X")),
                Ast::literal(Literal::pos("Y")),
            ]))
            .to_string()
        );
    }
}
