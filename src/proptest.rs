//! Property-based tests for checking and compaction.
//!
//! Proofs are generated from random action scripts that only ever cite
//! accessible lines, so every generated proof is valid by construction.

use proptest::prelude::*;

use crate::checker::check;
use crate::logic::{unifiable, unify, Proposition};
use crate::optimizer::optimize;
use crate::parser::parse_proposition;
use crate::proof::{Declarations, Line, Number, Proof, RuleRef};
use crate::rules::RuleCatalog;

const ATOMS: [&str; 3] = ["p", "q", "r"];

// ============================================================================
// Arbitrary Implementations
// ============================================================================

/// Generate meta-free propositions over the declared atoms
fn arb_proposition() -> impl Strategy<Value = Proposition> {
    let leaf = prop_oneof![
        Just(Proposition::True),
        Just(Proposition::False),
        prop::sample::select(ATOMS.to_vec()).prop_map(Proposition::atomic),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Proposition::not),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Proposition::and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Proposition::or(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Proposition::xor(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Proposition::implies(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Proposition::biconditional(l, r)),
        ]
    })
}

#[derive(Debug, Clone)]
enum Action {
    Given(usize),
    IntroAnd(usize, usize),
    IntroOr(usize, usize),
    Open(usize),
    Close,
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        any::<usize>().prop_map(Action::Given),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Action::IntroAnd(a, b)),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Action::IntroOr(a, b)),
        any::<usize>().prop_map(Action::Open),
        Just(Action::Close),
    ]
}

fn arb_proof() -> impl Strategy<Value = Proof> {
    prop::collection::vec(arb_action(), 0..30).prop_map(|actions| build(&actions))
}

/// One open scope: its assumption and the lines written in it so far
struct Frame {
    assumption: Option<Proposition>,
    lines: Vec<(Number, Proposition)>,
}

struct Builder {
    frames: Vec<Frame>,
    lines: Vec<Line>,
    cursor: Number,
}

impl Builder {
    fn accessible(&self) -> Vec<(Number, Proposition)> {
        self.frames.iter().flat_map(|f| f.lines.iter().cloned()).collect()
    }

    fn push(&mut self, number: Number, prop: Proposition, rule: RuleRef) {
        if let Some(frame) = self.frames.last_mut() {
            frame.lines.push((number.clone(), prop.clone()));
        }
        self.cursor = number.clone();
        self.lines.push(Line::new(number, prop, rule));
    }

    fn given(&mut self, which: usize) {
        let prop = Proposition::atomic(ATOMS[which % 2]);
        let number = self.cursor.next();
        self.push(number, prop, RuleRef::bare("Given"));
    }

    fn close(&mut self) {
        if self.frames.len() < 2 {
            return;
        }
        let conclusion = match self.lines.last() {
            Some(line) => line.proposition.clone(),
            None => return,
        };
        let frame = self.frames.pop();
        if let Some(assumption) = frame.and_then(|f| f.assumption) {
            let number = self.cursor.decrease_level();
            self.push(
                number,
                Proposition::implies(assumption, conclusion),
                RuleRef::bare("Direct Proof Rule"),
            );
        }
    }

    fn apply(&mut self, action: &Action) {
        let accessible = self.accessible();
        match *action {
            Action::Given(which) => self.given(which),
            Action::IntroAnd(a, b) => {
                let (na, pa) = &accessible[a % accessible.len()];
                let (nb, pb) = &accessible[b % accessible.len()];
                if pa.size() + pb.size() > 16 {
                    return;
                }
                let number = self.cursor.next();
                self.push(
                    number,
                    Proposition::and(pa.clone(), pb.clone()),
                    RuleRef::new("Intro And", vec![na.clone(), nb.clone()]),
                );
            }
            Action::IntroOr(a, atom) => {
                let (na, pa) = &accessible[a % accessible.len()];
                if pa.size() > 16 {
                    return;
                }
                let number = self.cursor.next();
                self.push(
                    number,
                    Proposition::or(pa.clone(), Proposition::atomic(ATOMS[atom % ATOMS.len()])),
                    RuleRef::new("Intro Or", vec![na.clone()]),
                );
            }
            Action::Open(atom) => {
                let prop = Proposition::atomic(ATOMS[atom % ATOMS.len()]);
                let number = self.cursor.increase_level();
                self.frames.push(Frame {
                    assumption: Some(prop.clone()),
                    lines: Vec::new(),
                });
                self.push(number, prop, RuleRef::bare("Assumption"));
            }
            Action::Close => self.close(),
        }
    }
}

/// A valid proof that starts from the givens `p` and `q`
fn build(actions: &[Action]) -> Proof {
    let mut builder = Builder {
        frames: vec![Frame {
            assumption: None,
            lines: Vec::new(),
        }],
        lines: Vec::new(),
        cursor: Number::zero(),
    };
    builder.given(0);
    for action in actions {
        builder.apply(action);
    }
    while builder.frames.len() > 1 {
        builder.close();
    }

    let declarations = Declarations::from_parts(
        ATOMS,
        [Proposition::atomic("p"), Proposition::atomic("q")],
    )
    .freeze();
    Proof::new(false, declarations, builder.lines)
}

// ============================================================================
// Property Tests: Numbering and Unification
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Numbers along a valid proof strictly increase
    #[test]
    fn prop_numbers_strictly_increase(proof in arb_proof()) {
        for pair in proof.lines.windows(2) {
            prop_assert!(pair[0].number < pair[1].number);
        }
    }

    /// Every meta-free proposition matches itself
    #[test]
    fn prop_unify_reflexive(prop in arb_proposition()) {
        prop_assert!(unify(&prop, &prop).is_success());
    }

    /// Without meta variables, unification is structural equality
    #[test]
    fn prop_unify_without_meta_is_equality(a in arb_proposition(), b in arb_proposition()) {
        prop_assert_eq!(unifiable(&a, &b), a == b);
    }

    /// Display output parses back to the same tree
    #[test]
    fn prop_display_reparses(prop in arb_proposition()) {
        let parsed = parse_proposition(&prop.to_string());
        prop_assert_eq!(parsed.ok(), Some(prop));
    }
}

// ============================================================================
// Property Tests: Checking and Compaction
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Generated proofs are accepted
    #[test]
    fn prop_generated_proofs_check(proof in arb_proof()) {
        prop_assert!(check(&proof, &RuleCatalog::standard()).is_ok());
    }

    /// Compaction keeps the conclusion and never adds lines
    #[test]
    fn prop_optimize_shrinks(proof in arb_proof()) {
        let conclusion = check(&proof, &RuleCatalog::standard()).unwrap();
        let lines = optimize(&conclusion).unwrap();
        prop_assert!(lines.len() <= proof.lines.len());
        let last = lines.last().map(|l| l.proposition.clone());
        prop_assert_eq!(last.as_ref(), Some(conclusion.proposition()));
    }

    /// Compacted output checks, and compacting it again changes nothing
    #[test]
    fn prop_optimize_round_trip(proof in arb_proof()) {
        let catalog = RuleCatalog::standard();
        let conclusion = check(&proof, &catalog).unwrap();
        let lines = optimize(&conclusion).unwrap();

        let again = proof.with_lines(lines.clone());
        let conclusion = check(&again, &catalog).unwrap();
        prop_assert_eq!(optimize(&conclusion).unwrap(), lines);
    }
}
