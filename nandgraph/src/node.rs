use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;

/// A shared handle to a node.
///
/// Gates and the graph hold nodes through this handle, so a node resolved from the graph is the same allocation
/// wherever it is referenced.
pub type NodeRef = Rc<Node>;

/// An immutable integer-valued vertex.
///
/// Two nodes holding equal values are the same vertex as far as a [`Graph`](crate::graph::Graph) is concerned,
/// even when they are separate allocations.
#[derive(Clone, Debug)]
pub struct Node {
    value: BigInt,
}

impl Node {
    /// Create a node holding `value`.
    #[must_use]
    pub fn new(value: impl Into<BigInt>) -> Self {
        Self { value: value.into() }
    }

    /// Create a node behind a shared handle.
    #[must_use]
    pub fn shared(value: impl Into<BigInt>) -> NodeRef {
        Rc::new(Self::new(value))
    }

    /// The value this node holds.
    #[must_use]
    pub const fn value(&self) -> &BigInt {
        &self.value
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node: [{}]", self.value)
    }
}
