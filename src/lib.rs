/*! Provides a set of tools for parsing boolean alignment formulas and normalizing them
into minimized Disjunctive Normal Form (DNF) rule sets.

A formula such as `BASE & (A1 | A2) & !G` references named boolean variables and is
processed in stages: the [`lexer`] turns the text into tokens, the [`parser`] builds an
abstract syntax tree together with the formula's variable universe, the [`transform`]
module rewrites the tree into a clause set and minimizes it, and the [`eval`] module
enumerates truth tables for cross-validation. The resulting clauses are the "alignment
rules" a rendering layer turns into tables; this crate never formats such output itself.
*/
pub mod analyze;
pub mod config;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod syntax;
pub mod transform;

pub use analyze::{analyze, Analysis, Error, Options};
