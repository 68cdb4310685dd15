/*! Implements clause-set minimization by duplicate removal and absorption. */
use crate::syntax::ClauseSet;
use tracing::debug;

/// Is the trait of types that minimize to an equivalent, smaller form.
pub trait Minimize {
    /// Returns an equivalent value with all redundancy removed.
    fn minimize(&self) -> Self;
}

impl Minimize for ClauseSet {
    /// Drops every clause that is a superset of another clause in the set:
    /// whenever the smaller clause holds, so does the disjunction, which makes
    /// the larger clause redundant (`A | (A & B)` is just `A`). Surviving
    /// clauses keep their first-appearance order.
    fn minimize(&self) -> Self {
        let clauses = self.clauses();
        let mut keep = vec![true; clauses.len()];
        // Scanning small clauses first lets a general clause knock out its
        // supersets before they are considered as absorbers themselves.
        let mut by_size = (0..clauses.len()).collect::<Vec<_>>();
        by_size.sort_by_key(|&i| clauses[i].len());
        for &i in &by_size {
            if !keep[i] {
                continue;
            }
            for j in 0..clauses.len() {
                if i != j && keep[j] && clauses[i].is_subset(&clauses[j]) {
                    keep[j] = false;
                }
            }
        }
        let survivors = clauses
            .iter()
            .zip(keep)
            .filter(|(_, kept)| *kept)
            .map(|(clause, _)| clause.clone())
            .collect::<Vec<_>>();
        debug!(before = clauses.len(), after = survivors.len(), "minimize ok");
        Self::from(survivors)
    }
}
