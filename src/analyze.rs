/*! Implements the end-to-end analysis pipeline: parse the formula text,
expand it to DNF, and minimize the resulting rule set. */
use crate::config::OperatorConfig;
use crate::eval::{EvalError, TruthTable};
use crate::parser::{Formula, ParseError};
use crate::syntax::ClauseSet;
use crate::transform::{DnfError, Limits, Minimize, ToDnf};
use thiserror::Error;
use tracing::{debug, info};

/// Configures a run of [`analyze`].
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Operator spellings accepted by the tokenizer.
    pub operators: OperatorConfig,
    /// Working-set cap for DNF expansion.
    pub limits: Limits,
    /// Upper bound on the number of minimized rules, if any.
    pub max_rules: Option<usize>,
}

/// Is the type of errors returned by [`analyze`].
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum Error {
    /// Is an error of the tokenizer or parser.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Is an error of the DNF expansion.
    #[error(transparent)]
    Dnf(#[from] DnfError),

    /// Is returned when the minimized rule set is larger than
    /// [`Options::max_rules`].
    #[error("{rules} rules exceed the configured maximum of {limit}")]
    RuleLimitExceeded { rules: usize, limit: usize },
}

/// Is the result of analyzing a formula: the parsed formula and its minimized
/// rule set.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Analysis {
    formula: Formula,
    rules: ClauseSet,
}

impl Analysis {
    /// Returns the parsed formula.
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Returns the minimized rules, one clause per rule, in the order they
    /// first appeared during expansion.
    pub fn rules(&self) -> &ClauseSet {
        &self.rules
    }

    /// Enumerates the truth table of the formula's universe.
    pub fn truth_table(&self) -> Result<TruthTable, EvalError> {
        TruthTable::new(self.formula.universe())
    }
}

/// Runs the full pipeline on `text` under `options`.
pub fn analyze(text: &str, options: &Options) -> Result<Analysis, Error> {
    info!(len = text.len(), "analyze start");
    let formula = Formula::parse_with(text, &options.operators)?;
    let rules = formula.dnf_with(&options.limits)?.minimize();
    if let Some(limit) = options.max_rules {
        if rules.len() > limit {
            return Err(Error::RuleLimitExceeded {
                rules: rules.len(),
                limit,
            });
        }
    }
    debug!(vars = formula.universe().len(), rules = rules.len(), "analyze ok");
    Ok(Analysis { formula, rules })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline() {
        let analysis = analyze("A & (B | C)", &Options::default()).unwrap();
        assert_eq!("(A & B) | (A & C)", analysis.rules().to_string());
        assert_eq!(3, analysis.formula().universe().len());
    }

    #[test]
    fn minimization_runs_after_expansion() {
        let analysis = analyze("A & (A | B)", &Options::default()).unwrap();
        assert_eq!("A", analysis.rules().to_string());
    }

    #[test]
    fn rule_limit() {
        let options = Options {
            max_rules: Some(2),
            ..Options::default()
        };
        let err = analyze("(A & B) | (C & D) | (E & F)", &options).unwrap_err();
        assert_eq!(Error::RuleLimitExceeded { rules: 3, limit: 2 }, err);
        assert!(analyze("A | (A & B) | (A & C)", &options).is_ok());
    }

    #[test]
    fn errors_carry_their_stage() {
        assert!(matches!(
            analyze("A &", &Options::default()),
            Err(Error::Parse(_))
        ));
        let options = Options {
            limits: Limits { max_clauses: 2 },
            ..Options::default()
        };
        assert!(matches!(
            analyze("(A | B) & (C | D)", &options),
            Err(Error::Dnf(DnfError::ClauseLimitExceeded { limit: 2 }))
        ));
    }

    #[test]
    fn truth_table_access() {
        let analysis = analyze("A & B", &Options::default()).unwrap();
        let rows = analysis.truth_table().unwrap().count();
        assert_eq!(4, rows);
    }
}
