/*! Implements evaluation of formulas under variable assignments and exhaustive
truth-table enumeration over a [`Universe`].

An [`Assignment`] is one row of the table, identified by a bit pattern where
the first variable of the universe holds the most significant bit. Enumerating
the patterns in numeric order therefore yields the rows in lexicographic order
with `false` before `true`.

[`Universe`]: crate::syntax::Universe
*/
use crate::syntax::{Ast, Clause, ClauseSet, Polarity, Universe, Var};
use thiserror::Error;

/// Largest universe [`TruthTable::new`] will enumerate. Each extra variable
/// doubles the row count.
pub const MAX_TABLE_VARS: usize = 16;

/// Is the type of errors returned by truth-table enumeration.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum EvalError {
    /// Is returned when a universe has more variables than the enumeration cap
    /// allows.
    #[error("truth table over {variables} variables exceeds the cap of {limit}")]
    EnumerationLimitExceeded { variables: usize, limit: usize },
}

/// Is one row of a truth table: a total assignment of values to the variables
/// of a universe.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Assignment<'a> {
    universe: &'a Universe,
    bits: u128,
}

impl<'a> Assignment<'a> {
    /// Creates the assignment identified by `bits` over `universe`, with the
    /// first variable of the universe in the most significant position.
    pub fn new(universe: &'a Universe, bits: u128) -> Self {
        Self { universe, bits }
    }

    /// Returns the value of `var`. A variable outside the universe is unset
    /// and reads as `false`.
    pub fn value(&self, var: &Var) -> bool {
        match self.universe.index_of(var) {
            Some(index) => {
                let shift = self.universe.len() - 1 - index;
                self.bits >> shift & 1 == 1
            }
            None => false,
        }
    }

    /// Returns the values of the row in universe order.
    pub fn values(&self) -> Vec<bool> {
        self.universe
            .vars()
            .iter()
            .map(|var| self.value(var))
            .collect()
    }

    /// Returns the universe the assignment ranges over.
    pub fn universe(&self) -> &Universe {
        self.universe
    }
}

/// Is the trait of formula representations that can be evaluated under an
/// [`Assignment`].
pub trait Evaluate {
    /// Returns the value of the receiver in the given row.
    fn eval(&self, assignment: &Assignment) -> bool;
}

impl Evaluate for crate::syntax::Literal {
    fn eval(&self, assignment: &Assignment) -> bool {
        let set = assignment.value(self.var());
        match self.polarity() {
            Polarity::Eq1 => set,
            Polarity::Neq1 => !set,
        }
    }
}

impl Evaluate for Ast {
    fn eval(&self, assignment: &Assignment) -> bool {
        match self {
            Ast::Literal(lit) => lit.eval(assignment),
            Ast::Not(child) => !child.eval(assignment),
            Ast::And(children) => children.iter().all(|c| c.eval(assignment)),
            Ast::Or(children) => children.iter().any(|c| c.eval(assignment)),
        }
    }
}

impl Evaluate for Clause {
    fn eval(&self, assignment: &Assignment) -> bool {
        self.literals().iter().all(|lit| lit.eval(assignment))
    }
}

impl Evaluate for ClauseSet {
    /// The empty set has no satisfiable clause and evaluates to `false` in
    /// every row.
    fn eval(&self, assignment: &Assignment) -> bool {
        self.iter().any(|clause| clause.eval(assignment))
    }
}

/// Enumerates every assignment over a universe, in lexicographic order with
/// `false` before `true`.
pub struct TruthTable<'a> {
    universe: &'a Universe,
    next: u128,
    end: u128,
}

impl<'a> TruthTable<'a> {
    /// Creates a table over `universe`, refusing universes larger than
    /// [`MAX_TABLE_VARS`].
    pub fn new(universe: &'a Universe) -> Result<Self, EvalError> {
        Self::with_limit(universe, MAX_TABLE_VARS)
    }

    /// Creates a table over `universe` with an explicit cap on the variable
    /// count. The cap must stay below 128.
    pub fn with_limit(universe: &'a Universe, limit: usize) -> Result<Self, EvalError> {
        let variables = universe.len();
        if variables > limit || variables >= 128 {
            return Err(EvalError::EnumerationLimitExceeded { variables, limit });
        }
        Ok(Self {
            universe,
            next: 0,
            end: 1u128 << variables,
        })
    }

    /// Returns the number of rows of the table.
    pub fn rows(&self) -> u128 {
        self.end
    }

    /// Pairs every remaining row with the value of `formula` in it, for
    /// incremental consumption of (assignment, result) pairs.
    pub fn evaluated<E>(self, formula: &'a E) -> impl Iterator<Item = (Assignment<'a>, bool)>
    where
        E: Evaluate,
    {
        self.map(move |row| {
            let value = formula.eval(&row);
            (row, value)
        })
    }
}

impl<'a> Iterator for TruthTable<'a> {
    type Item = Assignment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let assignment = Assignment::new(self.universe, self.next);
        self.next += 1;
        Some(assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Formula;
    use crate::syntax::Literal;
    use crate::transform::{Minimize, ToDnf};

    fn universe(names: &[&str]) -> Universe {
        names.iter().map(|n| Var::from(*n)).collect()
    }

    #[test]
    fn first_variable_is_most_significant() {
        let universe = universe(&["A", "B"]);
        let rows = TruthTable::new(&universe)
            .unwrap()
            .map(|a| a.values())
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                vec![false, false],
                vec![false, true],
                vec![true, false],
                vec![true, true],
            ],
            rows
        );
    }

    #[test]
    fn row_count() {
        let universe = universe(&["A", "B", "C"]);
        let table = TruthTable::new(&universe).unwrap();
        assert_eq!(8, table.rows());
        assert_eq!(8, table.count());
    }

    #[test]
    fn empty_universe_has_one_row() {
        let universe = Universe::new();
        let rows = TruthTable::new(&universe).unwrap().count();
        assert_eq!(1, rows);
    }

    #[test]
    fn cap_is_enforced() {
        let names = (0..17).map(|i| format!("V{}", i)).collect::<Vec<_>>();
        let universe = names.iter().map(Var::from).collect::<Universe>();
        assert_eq!(
            Err(EvalError::EnumerationLimitExceeded {
                variables: 17,
                limit: MAX_TABLE_VARS
            }),
            TruthTable::new(&universe).map(|_| ())
        );
        assert!(TruthTable::with_limit(&universe, 20).is_ok());
    }

    #[test]
    fn literal_polarity() {
        let universe = universe(&["A"]);
        let unset = Assignment::new(&universe, 0);
        let set = Assignment::new(&universe, 1);
        assert!(!Literal::pos("A").eval(&unset));
        assert!(Literal::pos("A").eval(&set));
        assert!(Literal::neg("A").eval(&unset));
        assert!(!Literal::neg("A").eval(&set));
    }

    #[test]
    fn unknown_variable_reads_as_unset() {
        let universe = universe(&["A"]);
        let row = Assignment::new(&universe, 1);
        assert!(!Literal::pos("Z").eval(&row));
        assert!(Literal::neg("Z").eval(&row));
    }

    #[test]
    fn ast_and_clause_set_agree() {
        let formula = "(A | B<>1) & C".parse::<Formula>().unwrap();
        let rules = formula.dnf().unwrap().minimize();
        for row in TruthTable::new(formula.universe()).unwrap() {
            assert_eq!(formula.ast().eval(&row), rules.eval(&row));
        }
    }

    #[test]
    fn rows_pair_with_results() {
        let formula = "A & B".parse::<Formula>().unwrap();
        let pairs = TruthTable::new(formula.universe())
            .unwrap()
            .evaluated(formula.ast())
            .map(|(row, value)| (row.values(), value))
            .collect::<Vec<_>>();
        assert_eq!(4, pairs.len());
        assert_eq!((vec![true, true], true), pairs[3]);
        assert!(pairs[..3].iter().all(|(_, value)| !value));
    }

    #[test]
    fn empty_connectives_agree_across_representations() {
        let universe = Universe::new();
        let row = Assignment::new(&universe, 0);

        let top = Ast::and(Vec::new());
        assert!(top.eval(&row));
        assert!(top.dnf().unwrap().eval(&row));

        let bottom = Ast::or(Vec::new());
        assert!(!bottom.eval(&row));
        assert!(!bottom.dnf().unwrap().eval(&row));
    }

    #[test]
    fn empty_clause_set_is_false_everywhere() {
        let formula = "A & A<>1".parse::<Formula>().unwrap();
        let rules = formula.dnf().unwrap();
        assert!(rules.is_empty());
        for row in TruthTable::new(formula.universe()).unwrap() {
            assert!(!rules.eval(&row));
        }
    }
}
