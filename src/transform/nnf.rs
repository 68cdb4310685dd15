/*! Implements an algorithm for transforming a formula to Negation Normal Form. */
use crate::syntax::Ast;

/// Is the trait of types that transform to Negation Normal Form, where negation
/// survives only as the polarity of individual literals.
pub trait ToNnf {
    /// Returns an equivalent formula with every `Not` node eliminated.
    fn nnf(&self) -> Ast;
}

impl ToNnf for Ast {
    fn nnf(&self) -> Ast {
        push_down(self)
    }
}

fn push_down(ast: &Ast) -> Ast {
    match ast {
        Ast::Literal(lit) => Ast::literal(lit.clone()),
        Ast::Not(child) => negate(child),
        Ast::And(children) => Ast::and(children.iter().map(push_down).collect()),
        Ast::Or(children) => Ast::or(children.iter().map(push_down).collect()),
    }
}

// De Morgan on the n-ary nodes; a literal flips its polarity in place.
fn negate(ast: &Ast) -> Ast {
    match ast {
        Ast::Literal(lit) => Ast::literal(lit.complement()),
        Ast::Not(child) => push_down(child),
        Ast::And(children) => Ast::or(children.iter().map(negate).collect()),
        Ast::Or(children) => Ast::and(children.iter().map(negate).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Formula;

    fn nnf_of(text: &str) -> String {
        text.parse::<Formula>().unwrap().ast().nnf().to_string()
    }

    #[test]
    fn literals_are_untouched() {
        assert_eq!("A", nnf_of("A"));
        assert_eq!("A<>1", nnf_of("A<>1"));
    }

    #[test]
    fn negated_literal_flips_polarity() {
        assert_eq!("A<>1", nnf_of("!A"));
        assert_eq!("A", nnf_of("!(A<>1)"));
    }

    #[test]
    fn double_negation() {
        assert_eq!("A", nnf_of("!(!A)"));
        assert_eq!("A<>1", nnf_of("!(!(!A))"));
    }

    #[test]
    fn de_morgan() {
        assert_eq!("A<>1 | B<>1", nnf_of("!(A & B)"));
        assert_eq!("A<>1 & B<>1", nnf_of("!(A | B)"));
    }

    #[test]
    fn nested_negations() {
        assert_eq!("(A<>1 & B<>1) | C", nnf_of("!((A | B) & !C)"));
        assert_eq!("A & (B<>1 | (C & D<>1))", nnf_of("A & !(B & !(C & !D))"));
    }

    #[test]
    fn nnf_is_idempotent() {
        let once = "!((A | B) & !C)".parse::<Formula>().unwrap().ast().nnf();
        assert_eq!(once, once.nnf());
    }
}
