//! Proof compaction
//!
//! The optimizer walks the step graph from the conclusion, so steps the
//! conclusion does not depend on are dropped. It then emits the remaining
//! steps in dependency order, always picking the ready step with the lowest
//! source number, and renumbers them with the same numbering rules the
//! checker enforces.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::rc::Rc;

use fnv::FnvHashMap;
use tracing::debug;

use crate::error::{ProofcError, ProofcResult};
use crate::proof::{Line, Number, RuleRef};
use crate::rules::{Step, StepKind};

#[derive(Debug)]
struct Vertex {
    step: Rc<Step>,
    /// Vertex ids of the step's dependencies, duplicates included
    dependencies: Vec<usize>,
    /// Dependencies not yet emitted
    blocking: usize,
    /// Vertices waiting on this one
    unblocks: Vec<usize>,
}

/// Scheduler state for one compaction run
#[derive(Debug, Default)]
pub struct Optimizer {
    vertices: Vec<Vertex>,
    index: FnvHashMap<*const Step, usize>,
    ready: BinaryHeap<Reverse<(Number, usize)>>,
}

impl Optimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the steps `conclusion` depends on as a renumbered proof
    pub fn optimize(&mut self, conclusion: &Rc<Step>) -> ProofcResult<Vec<Line>> {
        self.vertex(conclusion);
        debug!(vertices = self.vertices.len(), "scheduling proof steps");

        let lines = self.schedule();
        self.vertices.clear();
        self.index.clear();
        self.ready.clear();
        lines
    }

    fn schedule(&mut self) -> ProofcResult<Vec<Line>> {
        let mut numbers: Vec<Option<Number>> = vec![None; self.vertices.len()];
        let mut lines = Vec::with_capacity(self.vertices.len());
        let mut cursor = Number::zero();

        while let Some(Reverse((_, id))) = self.ready.pop() {
            let vertex = &self.vertices[id];
            cursor = vertex.step.number_after(&cursor);
            numbers[id] = Some(cursor.clone());

            let refs = if vertex.step.kind() == StepKind::DirectProofRule {
                Vec::new()
            } else {
                cite(&numbers, &vertex.dependencies, vertex.step.number())?
            };
            lines.push(Line::new(
                cursor.clone(),
                vertex.step.proposition().clone(),
                RuleRef::new(vertex.step.rule_name(), refs),
            ));

            let unblocks = std::mem::take(&mut self.vertices[id].unblocks);
            for next in unblocks {
                let waiting = &mut self.vertices[next];
                waiting.blocking -= 1;
                if waiting.blocking == 0 {
                    self.ready
                        .push(Reverse((waiting.step.number().clone(), next)));
                }
            }
        }

        Ok(lines)
    }

    /// Memoized vertex for `step`, created along with its dependencies
    fn vertex(&mut self, step: &Rc<Step>) -> usize {
        if let Some(&id) = self.index.get(&Rc::as_ptr(step)) {
            return id;
        }
        let dependencies: Vec<usize> = step.dependencies().iter().map(|d| self.vertex(d)).collect();

        let id = self.vertices.len();
        for &d in &dependencies {
            self.vertices[d].unblocks.push(id);
        }
        let blocking = dependencies.len();
        if blocking == 0 {
            self.ready.push(Reverse((step.number().clone(), id)));
        }
        self.vertices.push(Vertex {
            step: Rc::clone(step),
            dependencies,
            blocking,
            unblocks: Vec::new(),
        });
        self.index.insert(Rc::as_ptr(step), id);
        id
    }
}

/// New numbers of a step's dependencies, which are all emitted before it
fn cite(
    numbers: &[Option<Number>],
    dependencies: &[usize],
    source: &Number,
) -> ProofcResult<Vec<Number>> {
    dependencies
        .iter()
        .map(|&d| {
            numbers[d].clone().ok_or_else(|| {
                ProofcError::internal(format!(
                    "line {} was scheduled before one of its dependencies",
                    source
                ))
                .with_context("line", source.to_string())
            })
        })
        .collect()
}

/// Compact the proof concluded by `conclusion`
pub fn optimize(conclusion: &Rc<Step>) -> ProofcResult<Vec<Line>> {
    Optimizer::new().optimize(conclusion)
}
