/*! Implements normal-form transformations on formula syntax trees.

The pipeline runs in two steps: [`ToNnf`] pushes negations down to the
literals, then [`ToDnf`] distributes conjunctions over disjunctions into a
[`ClauseSet`] while pruning contradictory clauses as they are formed.
[`Minimize`] removes duplicate and subsumed clauses from the result.

[`ClauseSet`]: crate::syntax::ClauseSet
*/
mod dnf;
mod minimize;
mod nnf;

pub use dnf::{DnfError, Limits, ToDnf};
pub use minimize::Minimize;
pub use nnf::ToNnf;
