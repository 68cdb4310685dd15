/*! Defines DNF [`Clause`]s and ordered [`ClauseSet`]s.

[`Clause`]: crate::syntax::Clause
[`ClauseSet`]: crate::syntax::ClauseSet
*/
use super::Literal;
use itertools::Itertools;
use serde_derive::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;

/// Represents a conjunction of [`Literal`]s: one AND-group within a DNF.
///
/// A clause holds each variable at most once and never holds a literal together with
/// its complement; such a conjunction is a contradiction and is rejected at
/// construction rather than carried forward. Literals iterate in the natural order
/// of their variables.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug, Default, Serialize)]
pub struct Clause(BTreeSet<Literal>);

impl Clause {
    /// Creates the empty clause: the conjunction of no literals, which holds in
    /// every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clause from `literals`, or `None` if the conjunction contains a
    /// complementary pair. Duplicate literals collapse.
    pub fn try_new<I>(literals: I) -> Option<Self>
    where
        I: IntoIterator<Item = Literal>,
    {
        let set: BTreeSet<Literal> = literals.into_iter().collect();
        if has_complementary_pair(&set) {
            None
        } else {
            Some(Self(set))
        }
    }

    /// Returns the literals of the receiver clause.
    pub fn literals(&self) -> &BTreeSet<Literal> {
        &self.0
    }

    /// Consumes the receiver and returns its underlying literals.
    pub fn into_literals(self) -> BTreeSet<Literal> {
        self.0
    }

    /// Returns a clause containing all literals of the receiver and `other`, or
    /// `None` if the combination introduces a complementary pair.
    pub fn merge(&self, other: &Self) -> Option<Self> {
        Self::try_new(self.0.union(&other.0).cloned())
    }
}

// Complementary literals on the same variable sort adjacently, so one linear scan
// over the ordered set suffices.
fn has_complementary_pair(literals: &BTreeSet<Literal>) -> bool {
    let mut previous: Option<&Literal> = None;
    for lit in literals {
        if let Some(prev) = previous {
            if prev.is_complement_of(lit) {
                return true;
            }
        }
        previous = Some(lit);
    }
    false
}

impl From<Literal> for Clause {
    fn from(value: Literal) -> Self {
        let mut set = BTreeSet::new();
        set.insert(value);
        Self(set)
    }
}

impl Deref for Clause {
    type Target = BTreeSet<Literal>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "true");
        }
        write!(f, "{}", self.0.iter().join(" & "))
    }
}

/// Represents an ordered disjunction of [`Clause`]s: a formula in DNF.
///
/// Clause order is presentation-relevant (it numbers the "Alignment Rule N" output)
/// but not semantically relevant. Insertion keeps the first occurrence of an exact
/// duplicate; an empty set denotes the unsatisfiable formula, which is a valid
/// result and not an error.
#[derive(PartialEq, Eq, Clone, Debug, Default, Serialize)]
pub struct ClauseSet(Vec<Clause>);

impl ClauseSet {
    /// Creates an empty clause set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `clause` unless an identical clause is already present.
    pub fn insert(&mut self, clause: Clause) {
        if !self.0.contains(&clause) {
            self.0.push(clause);
        }
    }

    /// Returns the clauses of the receiver in order.
    #[inline(always)]
    pub fn clauses(&self) -> &[Clause] {
        &self.0
    }

    /// Returns the number of clauses in the receiver.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the receiver contains no clauses; the disjunction of zero
    /// clauses is false.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the clauses of the receiver.
    pub fn iter(&self) -> std::slice::Iter<Clause> {
        self.0.iter()
    }
}

impl From<Vec<Clause>> for ClauseSet {
    fn from(value: Vec<Clause>) -> Self {
        let mut set = Self::new();
        for clause in value {
            set.insert(clause);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ClauseSet {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ClauseSet {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "false");
        }
        if self.0.len() == 1 {
            return write!(f, "{}", self.0[0]);
        }
        let parts = self
            .0
            .iter()
            .map(|clause| {
                if clause.len() > 1 {
                    format!("({})", clause)
                } else {
                    clause.to_string()
                }
            })
            .join(" | ");
        write!(f, "{}", parts)
    }
}
