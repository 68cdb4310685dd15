/*! Defines the syntactic building blocks of alignment formulas: variables, literals,
abstract syntax trees and DNF clauses. */

mod ast;
mod clause;
mod literal;

pub use ast::{Ast, Universe};
pub use clause::{Clause, ClauseSet};
pub use literal::{Literal, Polarity, Var};
