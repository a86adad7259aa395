use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use once_cell::unsync::OnceCell;

use crate::node::{Node, NodeRef};

/// Width of the narrowest unsigned field a NAND result is read back through.
const MIN_WIDTH: usize = 4;

/// NAND two integers, reading the signed complement back as an unsigned value.
///
/// `!(a & b)` is taken in two's complement, then reinterpreted as unsigned within a field just wide enough to hold
/// its magnitude. The field starts at four bits and doubles until `|!(a & b)| < 2^width`, and the result is
/// `2^width - |!(a & b)|`. The result is never negative.
#[must_use]
pub fn nand(a: &BigInt, b: &BigInt) -> BigInt {
    let complement = !(a & b);
    let magnitude = complement.magnitude();

    let mut width = MIN_WIDTH;
    while magnitude >= &(BigUint::one() << width) {
        width *= 2;
    }

    BigInt::from((BigUint::one() << width) - magnitude)
}

/// A two-input NAND gate.
///
/// The output node is computed on first read and cached until [`NandGate::reset`].
#[derive(Debug)]
pub struct NandGate {
    input_a: NodeRef,
    input_b: NodeRef,
    output: OnceCell<NodeRef>,
}

impl NandGate {
    /// Create a gate over two existing nodes.
    #[must_use]
    pub fn new(input_a: NodeRef, input_b: NodeRef) -> Self {
        Self { input_a, input_b, output: OnceCell::new() }
    }

    /// The first input, and the origin of the edge this gate adds to a graph.
    #[must_use]
    pub const fn input_a(&self) -> &NodeRef {
        &self.input_a
    }

    /// The second input.
    #[must_use]
    pub const fn input_b(&self) -> &NodeRef {
        &self.input_b
    }

    /// The output node, computing it if this is the first read since construction or reset.
    pub fn output(&self) -> &NodeRef {
        self.output.get_or_init(|| Node::shared(nand(self.input_a.value(), self.input_b.value())))
    }

    /// Returns true if the output has been computed and is cached.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.output.get().is_some()
    }

    /// Drop the cached output. The inputs are untouched.
    pub fn reset(&mut self) {
        self.output.take();
    }
}

impl fmt::Display for NandGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NAND({}, {}) -> {}", self.input_a.value(), self.input_b.value(), self.output().value())
    }
}
