use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use itertools::Itertools;
use num_bigint::BigInt;
use petgraph::prelude::*;

use crate::error::GraphError;
use crate::gate::NandGate;
use crate::node::{Node, NodeRef};

/// A graph of the values a reduction has seen.
///
/// Vertices are nodes, deduplicated by value. An edge runs from a gate's first input to its second input, so the
/// graph records which values were paired by a NAND rather than how values flow into gate outputs.
#[derive(Debug, Default)]
pub struct Graph {
    graph: StableGraph<NodeRef, (), Directed>,
    index: HashMap<BigInt, NodeIndex>,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a vertex holds the same value as `node`.
    #[must_use]
    pub fn contains(&self, node: &Node) -> bool {
        self.index.contains_key(node.value())
    }

    /// Returns the vertex holding `value`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if no vertex holds `value`.
    pub fn lookup(&self, value: &BigInt) -> Result<NodeRef, GraphError> {
        self.index
            .get(value)
            .map(|&index| Rc::clone(&self.graph[index]))
            .ok_or_else(|| GraphError::NodeNotFound(value.clone()))
    }

    /// Add `node` as a vertex with no outgoing edges.
    ///
    /// If a vertex with the same value is already present the graph is left unchanged, and the call succeeds only
    /// when `ignore_existing` is set.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeExists`] for a duplicate value when `ignore_existing` is false.
    pub fn insert_node(&mut self, node: NodeRef, ignore_existing: bool) -> Result<(), GraphError> {
        if self.contains(&node) {
            if ignore_existing {
                return Ok(());
            }
            return Err(GraphError::NodeExists(node.value().clone()));
        }

        let value = node.value().clone();
        let index = self.graph.add_node(node);
        self.index.insert(value, index);
        Ok(())
    }

    /// Record the pairing of a gate's inputs as an edge from `input_a` to `input_b`.
    ///
    /// Adding an edge that already exists is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DanglingEdge`] unless both inputs are already vertices.
    pub fn insert_edge(&mut self, gate: &NandGate) -> Result<(), GraphError> {
        let from = gate.input_a().value();
        let to = gate.input_b().value();

        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => {
                self.graph.update_edge(a, b, ());
                Ok(())
            }
            _ => Err(GraphError::DanglingEdge { from: from.clone(), to: to.clone() }),
        }
    }

    /// Returns true if there is an edge from the vertex holding `from` to the vertex holding `to`.
    #[must_use]
    pub fn has_edge(&self, from: &BigInt, to: &BigInt) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Number of distinct values in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct input pairings in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over the vertices in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRef> + '_ {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    /// The destination set of the vertex holding the same value as `node`, ordered by value.
    ///
    /// A value that is not a vertex has no destinations.
    #[must_use]
    pub fn successors(&self, node: &Node) -> Vec<NodeRef> {
        self.index.get(node.value()).map_or_else(Vec::new, |&index| {
            self.graph
                .neighbors_directed(index, Outgoing)
                .map(|next| Rc::clone(&self.graph[next]))
                .sorted_by(|a, b| a.value().cmp(b.value()))
                .collect()
        })
    }

    /// Write the graph in Graphviz DOT format.
    #[allow(clippy::missing_errors_doc)]
    pub fn write_graphviz<W: Write>(&self, mut f: W) -> std::io::Result<()> {
        writeln!(f, "strict digraph {{")?;

        for node in self.graph.node_indices() {
            writeln!(f, "{} [shape=box,label=\"{}\"];", node.index(), self.graph[node].value())?;
        }

        for edge in self.graph.edge_indices() {
            if let Some((from, to)) = self.graph.edge_endpoints(edge) {
                writeln!(f, "{} -> {};", from.index(), to.index())?;
            }
        }

        writeln!(f, "}}")
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph with nodes: [{}]", self.nodes().map(|node| node.value()).join(", "))?;
        writeln!(f)?;
        writeln!(f, "Edges:")?;

        for node in self.nodes() {
            let successors = self.successors(node);
            if successors.is_empty() {
                writeln!(f, "\t{node}\t-->\tNo Edges")?;
            }
            for next in successors {
                writeln!(f, "\t{node}\t-->\t{next}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use num_bigint::BigInt;
    use test_log::test;

    use super::Graph;
    use crate::error::GraphError;
    use crate::gate::NandGate;
    use crate::node::Node;

    #[test]
    fn membership_is_by_value() {
        let mut graph = Graph::new();
        graph.insert_node(Node::shared(3), false).unwrap();

        assert!(graph.contains(&Node::new(3)));
        assert!(!graph.contains(&Node::new(4)));
    }

    #[test]
    fn duplicate_node() {
        let mut graph = Graph::new();
        let first = Node::shared(7);
        graph.insert_node(Rc::clone(&first), false).unwrap();

        assert_eq!(graph.insert_node(Node::shared(7), false), Err(GraphError::NodeExists(BigInt::from(7))));
        assert_eq!(graph.insert_node(Node::shared(7), true), Ok(()));
        assert_eq!(graph.node_count(), 1);

        // The first allocation is the one kept.
        let stored = graph.lookup(&BigInt::from(7)).unwrap();
        assert!(Rc::ptr_eq(&stored, &first));
    }

    #[test]
    fn lookup_missing() {
        let graph = Graph::new();
        assert_eq!(graph.lookup(&BigInt::from(1)).unwrap_err(), GraphError::NodeNotFound(BigInt::from(1)));
    }

    #[test]
    fn edge_requires_both_endpoints() {
        let mut graph = Graph::new();
        let a = Node::shared(1);
        let b = Node::shared(2);
        graph.insert_node(Rc::clone(&a), false).unwrap();

        let gate = NandGate::new(a, b);
        assert_eq!(
            graph.insert_edge(&gate),
            Err(GraphError::DanglingEdge { from: BigInt::from(1), to: BigInt::from(2) })
        );
        assert_eq!(graph.edge_count(), 0);
        // Insertion is not implicit.
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn edge_is_idempotent() {
        let mut graph = Graph::new();
        let a = Node::shared(1);
        let b = Node::shared(2);
        graph.insert_node(Rc::clone(&a), false).unwrap();
        graph.insert_node(Rc::clone(&b), false).unwrap();

        let gate = NandGate::new(a, b);
        graph.insert_edge(&gate).unwrap();
        graph.insert_edge(&gate).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(&BigInt::from(1), &BigInt::from(2)));
        assert!(!graph.has_edge(&BigInt::from(2), &BigInt::from(1)));
    }

    #[test]
    fn edge_endpoints_match_by_value() {
        let mut graph = Graph::new();
        graph.insert_node(Node::shared(5), false).unwrap();
        graph.insert_node(Node::shared(6), false).unwrap();

        // Fresh allocations with the same values still hit the stored vertices.
        let gate = NandGate::new(Node::shared(5), Node::shared(6));
        graph.insert_edge(&gate).unwrap();

        let successors = graph.successors(&Node::new(5));
        assert_eq!(successors.len(), 1);
        assert_eq!(successors[0].value(), &BigInt::from(6));
    }

    #[test]
    fn display_lists_every_node() {
        let mut graph = Graph::new();
        let a = Node::shared(1);
        let b = Node::shared(2);
        graph.insert_node(Rc::clone(&a), false).unwrap();
        graph.insert_node(Rc::clone(&b), false).unwrap();
        graph.insert_edge(&NandGate::new(a, b)).unwrap();

        let listing = graph.to_string();
        assert_eq!(
            listing,
            "Graph with nodes: [1, 2]\n\nEdges:\n\tNode: [1]\t-->\tNode: [2]\n\tNode: [2]\t-->\tNo Edges\n"
        );
    }

    #[test]
    fn graphviz() {
        let mut graph = Graph::new();
        let a = Node::shared(10);
        let b = Node::shared(20);
        graph.insert_node(Rc::clone(&a), false).unwrap();
        graph.insert_node(Rc::clone(&b), false).unwrap();
        graph.insert_edge(&NandGate::new(a, b)).unwrap();

        let mut out = Vec::new();
        graph.write_graphviz(&mut out).unwrap();
        let dot = String::from_utf8(out).unwrap();

        assert!(dot.starts_with("strict digraph {\n"));
        assert!(dot.contains("0 [shape=box,label=\"10\"];\n"));
        assert!(dot.contains("1 [shape=box,label=\"20\"];\n"));
        assert!(dot.contains("0 -> 1;\n"));
        assert!(dot.ends_with("}\n"));
    }
}
