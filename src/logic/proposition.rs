//! Propositional logic expressions
//!
//! A proposition is an immutable tree built from the literals `T` and `F`,
//! declared atomic variables, rule-template placeholders (meta variables),
//! negation, and the binary connectives and/or/xor/implies/biconditional.

use std::fmt;

/// Unary connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "¬",
        }
    }
}

/// Binary connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Implies,
    Biconditional,
}

impl BinaryOp {
    /// Binding strength; lower binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::And => 1,
            BinaryOp::Xor => 2,
            BinaryOp::Or => 3,
            BinaryOp::Implies => 4,
            BinaryOp::Biconditional => 5,
        }
    }

    /// Whether a chain of this operator may be written without parentheses
    pub fn is_associative(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Xor)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::And => "∧",
            BinaryOp::Or => "∨",
            BinaryOp::Xor => "⊕",
            BinaryOp::Implies => "→",
            BinaryOp::Biconditional => "↔",
        }
    }
}

/// A propositional logic expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Proposition {
    /// The literal true
    True,
    /// The literal false
    False,
    /// A declared propositional variable
    Atomic(String),
    /// A placeholder inside a rule template; never produced by the parser
    Meta(String),
    /// Unary connective application
    Unary(UnaryOp, Box<Proposition>),
    /// Binary connective application
    Binary(BinaryOp, Box<Proposition>, Box<Proposition>),
}

impl Proposition {
    pub fn atomic(name: impl Into<String>) -> Self {
        Proposition::Atomic(name.into())
    }

    pub fn meta(name: impl Into<String>) -> Self {
        Proposition::Meta(name.into())
    }

    pub fn not(arg: Proposition) -> Self {
        Proposition::Unary(UnaryOp::Not, Box::new(arg))
    }

    pub fn binary(op: BinaryOp, lhs: Proposition, rhs: Proposition) -> Self {
        Proposition::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn and(lhs: Proposition, rhs: Proposition) -> Self {
        Self::binary(BinaryOp::And, lhs, rhs)
    }

    pub fn or(lhs: Proposition, rhs: Proposition) -> Self {
        Self::binary(BinaryOp::Or, lhs, rhs)
    }

    pub fn xor(lhs: Proposition, rhs: Proposition) -> Self {
        Self::binary(BinaryOp::Xor, lhs, rhs)
    }

    pub fn implies(lhs: Proposition, rhs: Proposition) -> Self {
        Self::binary(BinaryOp::Implies, lhs, rhs)
    }

    pub fn biconditional(lhs: Proposition, rhs: Proposition) -> Self {
        Self::binary(BinaryOp::Biconditional, lhs, rhs)
    }

    /// Left-nested conjunction of `props`, seeded with `T`.
    ///
    /// The empty conjunction is `T`.
    pub fn conjunction<'a>(props: impl IntoIterator<Item = &'a Proposition>) -> Self {
        props
            .into_iter()
            .fold(Proposition::True, |acc, p| Proposition::and(acc, p.clone()))
    }

    /// Binding strength of the top-level node (0 for leaves and negation)
    pub fn precedence(&self) -> u8 {
        match self {
            Proposition::Binary(op, _, _) => op.precedence(),
            _ => 0,
        }
    }

    /// First atomic name (in left-to-right order) rejected by `is_declared`
    pub fn find_undeclared<'a>(&'a self, is_declared: &impl Fn(&str) -> bool) -> Option<&'a str> {
        match self {
            Proposition::Atomic(name) if !is_declared(name) => Some(name.as_str()),
            Proposition::Unary(_, arg) => arg.find_undeclared(is_declared),
            Proposition::Binary(_, lhs, rhs) => lhs
                .find_undeclared(is_declared)
                .or_else(|| rhs.find_undeclared(is_declared)),
            _ => None,
        }
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Proposition::Unary(_, arg) => 1 + arg.size(),
            Proposition::Binary(_, lhs, rhs) => 1 + lhs.size() + rhs.size(),
            _ => 1,
        }
    }
}

/// Whether `child`, printed as an operand of `parent`, needs parentheses
pub(crate) fn needs_parens(parent: BinaryOp, child: &Proposition, right: bool) -> bool {
    match child {
        Proposition::Binary(op, _, _) => {
            if !op.is_associative() && !parent.is_associative() {
                // → and ↔ never chain, not even with each other
                true
            } else if op.precedence() != parent.precedence() {
                op.precedence() > parent.precedence()
            } else {
                // Left-nested chains re-parse as written; right-nested ones do not.
                right
            }
        }
        _ => false,
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proposition::True => write!(f, "T"),
            Proposition::False => write!(f, "F"),
            Proposition::Atomic(name) | Proposition::Meta(name) => write!(f, "{}", name),
            Proposition::Unary(op, arg) => {
                if matches!(**arg, Proposition::Binary(..)) {
                    write!(f, "{}({})", op.symbol(), arg)
                } else {
                    write!(f, "{}{}", op.symbol(), arg)
                }
            }
            Proposition::Binary(op, lhs, rhs) => {
                if needs_parens(*op, lhs, false) {
                    write!(f, "({})", lhs)?;
                } else {
                    write!(f, "{}", lhs)?;
                }
                write!(f, "{}", op.symbol())?;
                if needs_parens(*op, rhs, true) {
                    write!(f, "({})", rhs)
                } else {
                    write!(f, "{}", rhs)
                }
            }
        }
    }
}
