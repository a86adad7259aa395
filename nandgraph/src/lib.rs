//! Evaluation of NAND-only boolean expressions, recording which values were combined as a graph.
//!
//! Expressions are written with `!(x.y)` for the NAND of `x` and `y`, and `x.y` at the top level for the AND of two
//! terms, for example `!(C.D).!(!(A.B).C)` once every letter is replaced by an integer. Operands are integers
//! rather than single bits.
//!
//! Evaluation does not parse the expression into a tree. Instead it repeatedly rewrites the text: the leftmost group
//! whose operands are both integer literals is evaluated and its text is replaced by the decimal output. Because a
//! group only matches once its operands are literals, groups are always reduced innermost-first. When no group is
//! left, the text is either one integer (the result) or two integers (whose AND is the result).
//!
//! The NAND of two integers is taken in two's complement and then read back as an unsigned number in a field just
//! wide enough for it. The field starts at four bits and doubles as needed, so `!(1.2)` is `16 - 1 = 15`.
//!
//! Every operand and output is recorded as a vertex of a [`Graph`], with values deduplicated so that a value
//! produced by one gate is the same vertex when a later gate consumes it. Each gate adds an edge from its first input
//! to its second: the graph records which values were paired, not how values flow into outputs.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod error;
pub mod gate;
pub mod graph;
pub mod node;
pub mod reduce;

pub use error::{GraphError, ReduceError};
pub use gate::{nand, NandGate};
pub use graph::Graph;
pub use node::{Node, NodeRef};
pub use reduce::{reduce, Reducer, Reduction};
