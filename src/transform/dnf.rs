/*! Implements an algorithm for transforming a formula to Disjunctive Normal Form. */
use super::ToNnf;
use crate::parser::Formula;
use crate::syntax::{Ast, Clause, ClauseSet};
use thiserror::Error;
use tracing::debug;

/// Caps the working set during DNF expansion. Distribution can square the
/// clause count at every conjunction, so the cap is checked as clauses are
/// produced, not after.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Limits {
    /// Largest number of clauses the expansion may hold at any point.
    pub max_clauses: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_clauses: 4096 }
    }
}

/// Is the type of errors returned by the DNF transformation.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum DnfError {
    /// Is returned when expansion produces more clauses than the configured cap.
    #[error("formula expands past the budget of {limit} clauses")]
    ClauseLimitExceeded { limit: usize },
}

/// Is the trait of types that transform to Disjunctive Normal Form.
pub trait ToDnf {
    /// Transforms the receiver to an equivalent set of clauses under the
    /// default [`Limits`]. Clauses that pin a variable both ways are dropped
    /// at the moment they would form; a formula with no satisfiable clause
    /// yields the empty set.
    fn dnf(&self) -> Result<ClauseSet, DnfError> {
        self.dnf_with(&Limits::default())
    }

    /// Transforms the receiver to an equivalent set of clauses, holding at
    /// most `limits.max_clauses` clauses at any point of the expansion.
    fn dnf_with(&self, limits: &Limits) -> Result<ClauseSet, DnfError>;
}

impl ToDnf for Ast {
    fn dnf_with(&self, limits: &Limits) -> Result<ClauseSet, DnfError> {
        let clauses = expand(&self.nnf(), limits)?;
        debug!(clauses = clauses.len(), "dnf ok");
        Ok(ClauseSet::from(clauses))
    }
}

impl ToDnf for Formula {
    fn dnf_with(&self, limits: &Limits) -> Result<ClauseSet, DnfError> {
        self.ast().dnf_with(limits)
    }
}

fn expand(ast: &Ast, limits: &Limits) -> Result<Vec<Clause>, DnfError> {
    match ast {
        Ast::Literal(lit) => Ok(vec![Clause::from(lit.clone())]),
        // The receiver is in NNF, so a stray negation can only sit directly
        // on a literal; re-normalizing keeps this arm total anyway.
        Ast::Not(child) => expand(&Ast::not((**child).clone()).nnf(), limits),
        Ast::And(children) => {
            let mut acc: Option<Vec<Clause>> = None;
            for child in children {
                let next = expand(child, limits)?;
                acc = Some(match acc {
                    None => next,
                    Some(left) => conjoin(&left, &next, limits)?,
                });
            }
            // The empty conjunction holds everywhere: one clause of no literals.
            Ok(acc.unwrap_or_else(|| vec![Clause::new()]))
        }
        Ast::Or(children) => {
            let mut acc: Vec<Clause> = Vec::new();
            for child in children {
                for clause in expand(child, limits)? {
                    if !acc.contains(&clause) {
                        acc.push(clause);
                    }
                    if acc.len() > limits.max_clauses {
                        return Err(DnfError::ClauseLimitExceeded {
                            limit: limits.max_clauses,
                        });
                    }
                }
            }
            Ok(acc)
        }
    }
}

// Cartesian product of two clause lists. A merge that pins some variable to
// both polarities is a contradiction and never enters the working set.
fn conjoin(left: &[Clause], right: &[Clause], limits: &Limits) -> Result<Vec<Clause>, DnfError> {
    let mut out: Vec<Clause> = Vec::new();
    for l in left {
        for r in right {
            let merged = match l.merge(r) {
                Some(merged) => merged,
                None => continue,
            };
            if !out.contains(&merged) {
                out.push(merged);
            }
            if out.len() > limits.max_clauses {
                return Err(DnfError::ClauseLimitExceeded {
                    limit: limits.max_clauses,
                });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dnf_of(text: &str) -> String {
        text.parse::<Formula>().unwrap().dnf().unwrap().to_string()
    }

    #[test]
    fn literal_and_flat_shapes() {
        assert_eq!("A", dnf_of("A"));
        assert_eq!("A & B", dnf_of("A & B"));
        assert_eq!("A | B", dnf_of("A | B"));
    }

    #[test]
    fn distribution() {
        assert_eq!("(A & B) | (A & C)", dnf_of("A & (B | C)"));
        assert_eq!(
            "(A & C) | (A & D) | (B & C) | (B & D)",
            dnf_of("(A | B) & (C | D)")
        );
    }

    #[test]
    fn negation_distributes_before_expansion() {
        assert_eq!("A<>1 | B<>1", dnf_of("!(A & B)"));
        assert_eq!("A<>1 & B<>1", dnf_of("!(A | B)"));
        assert_eq!("(A<>1 & C) | (B<>1 & C)", dnf_of("!(A & B) & C"));
    }

    #[test]
    fn contradictions_are_pruned() {
        assert_eq!("A & B", dnf_of("A & (A<>1 | B)"));
        assert_eq!("false", dnf_of("A & A<>1"));
        assert_eq!("false", dnf_of("(A | B) & A<>1 & B<>1 & (A | B)"));
    }

    #[test]
    fn repeated_clauses_collapse() {
        assert_eq!("A", dnf_of("A | A | A"));
        assert_eq!("A & B", dnf_of("(A & B) | (B & A)"));
    }

    #[test]
    fn clause_limit_is_enforced() {
        let formula = "(A | B) & (C | D) & (E | F)".parse::<Formula>().unwrap();
        let limits = Limits { max_clauses: 4 };
        assert_eq!(
            Err(DnfError::ClauseLimitExceeded { limit: 4 }),
            formula.dnf_with(&limits)
        );
        assert_eq!(8, formula.dnf().unwrap().len());
    }

    #[test]
    fn empty_groups_expand_to_their_identity() {
        let top = Ast::and(Vec::new());
        let set = top.dnf().unwrap();
        assert_eq!(1, set.len());
        assert_eq!("true", set.to_string());

        let bottom = Ast::or(Vec::new());
        assert!(bottom.dnf().unwrap().is_empty());
    }

    #[test]
    fn pruning_keeps_expansion_under_the_limit() {
        // Every cross term with the leading conjunct contradicts, so the
        // working set never grows past one clause.
        let formula = "A & (A<>1 | B) & (A<>1 | C) & (A<>1 | D)"
            .parse::<Formula>()
            .unwrap();
        let limits = Limits { max_clauses: 2 };
        assert_eq!("A & B & C & D", formula.dnf_with(&limits).unwrap().to_string());
    }
}
