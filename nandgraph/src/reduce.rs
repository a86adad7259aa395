use std::rc::Rc;

use log::{debug, trace};
use num_bigint::BigInt;

use crate::error::ReduceError;
use crate::gate::NandGate;
use crate::graph::Graph;
use crate::node::{Node, NodeRef};

/// A NAND group whose operands are both integer literals, e.g. `!(12.7)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Leaf<'a> {
    /// The whole group, from `!` to `)`.
    text: &'a str,
    lhs: &'a str,
    rhs: &'a str,
}

fn digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Match a leaf group at the very start of `s`.
///
/// Each operand must have at least one digit.
fn leaf_at(s: &str) -> Option<Leaf<'_>> {
    let after_open = s.strip_prefix("!(")?;
    let lhs_len = digits(after_open);
    if lhs_len == 0 {
        return None;
    }

    let after_dot = after_open[lhs_len..].strip_prefix('.')?;
    let rhs_len = digits(after_dot);
    if rhs_len == 0 {
        return None;
    }

    after_dot[rhs_len..].strip_prefix(')')?;

    // "!(" + lhs + "." + rhs + ")"
    let len = 2 + lhs_len + 1 + rhs_len + 1;
    Some(Leaf { text: &s[..len], lhs: &after_open[..lhs_len], rhs: &after_dot[..rhs_len] })
}

/// Find the leftmost leaf group in `buffer`.
fn find_leaf(buffer: &str) -> Option<Leaf<'_>> {
    buffer.match_indices('!').find_map(|(start, _)| leaf_at(&buffer[start..]))
}

/// The outcome of reducing one expression.
#[derive(Debug)]
pub struct Reduction {
    /// Every value seen, with an edge for each pair of values NANDed together.
    pub graph: Graph,
    /// The value of the expression.
    pub result: BigInt,
    /// The expression text after each reduction step.
    pub trace: Vec<String>,
}

/// Reduces a NAND expression one innermost group at a time.
///
/// Each step finds the leftmost `!(x.y)` with integer operands, NANDs the operands, records the operands and the
/// output in the graph, and substitutes the output back into the text. Once no group is left the remaining text must
/// be one integer, which is the result, or two dot-separated integers, whose bitwise AND is the result.
#[derive(Debug)]
pub struct Reducer {
    buffer: String,
    graph: Graph,
    trace: Vec<String>,
}

impl Reducer {
    /// Start reducing `expression` with an empty graph.
    #[must_use]
    pub fn new(expression: &str) -> Self {
        Self { buffer: expression.to_owned(), graph: Graph::new(), trace: Vec::new() }
    }

    /// The expression text as reduced so far.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The graph built so far.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Perform one reduction step, returning the gate that was evaluated.
    ///
    /// Returns `Ok(None)` once no group with two integer operands is left. Every occurrence of the reduced group's
    /// text is substituted at once, since identical groups have identical outputs.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::Graph`] if the graph rejects an insertion.
    pub fn step(&mut self) -> Result<Option<NandGate>, ReduceError> {
        let Some(leaf) = find_leaf(&self.buffer) else {
            return Ok(None);
        };

        let text = leaf.text.to_owned();
        let input_a = self.resolve(leaf.lhs)?;
        let input_b = self.resolve(leaf.rhs)?;

        let gate = NandGate::new(input_a, input_b);
        self.graph.insert_node(Rc::clone(gate.input_a()), true)?;
        self.graph.insert_node(Rc::clone(gate.input_b()), true)?;
        self.graph.insert_edge(&gate)?;
        self.graph.insert_node(Rc::clone(gate.output()), true)?;

        self.buffer = self.buffer.replace(&text, &gate.output().value().to_string());
        debug!("{text} => {gate}: {}", self.buffer);
        self.trace.push(self.buffer.clone());

        Ok(Some(gate))
    }

    /// Reduce every remaining group and combine what is left into the result.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::InvalidInputFormat`] if the text left over is not one or two dot-separated integers.
    pub fn finish(mut self) -> Result<Reduction, ReduceError> {
        while self.step()?.is_some() {}

        let operands = self
            .buffer
            .split('.')
            .map(str::parse::<BigInt>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| self.invalid())?;

        let result = match operands.as_slice() {
            [only] => only.clone(),
            [a, b] => a & b,
            _ => return Err(self.invalid()),
        };
        debug!("{} => {result}", self.buffer);

        Ok(Reduction { graph: self.graph, result, trace: self.trace })
    }

    /// Prefer the vertex already holding this value over a fresh node.
    fn resolve(&self, literal: &str) -> Result<NodeRef, ReduceError> {
        let value = literal.parse::<BigInt>().map_err(|_| self.invalid())?;

        match self.graph.lookup(&value) {
            Ok(node) => {
                trace!("reusing {node}");
                Ok(node)
            }
            Err(_) => Ok(Node::shared(value)),
        }
    }

    fn invalid(&self) -> ReduceError {
        ReduceError::InvalidInputFormat { residual: self.buffer.clone() }
    }
}

/// Reduce `expression` to its value, building the graph of paired values along the way.
///
/// # Errors
///
/// Returns [`ReduceError::InvalidInputFormat`] if the expression does not reduce to one or two integers.
pub fn reduce(expression: &str) -> Result<Reduction, ReduceError> {
    Reducer::new(expression).finish()
}
