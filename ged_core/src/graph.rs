//! Labeled undirected graphs with dense integer ids.
//!
//! A [`Graph`] is built up front with [`Graph::add_node`] and
//! [`Graph::add_edge`] and is immutable for the duration of a distance
//! computation. Every node and edge carries exactly one [`LabelId`]; use
//! [`DUMMY_LABEL`](crate::types::DUMMY_LABEL) for unlabeled elements.

use crate::error::GedError;
use crate::types::{EdgeId, LabelId, NodeId};

/// One undirected edge with its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Edge {
    /// First endpoint.
    tail: NodeId,
    /// Second endpoint.
    head: NodeId,
    /// Label of the edge.
    label: LabelId,
}

/// An immutable (after construction) labeled undirected graph.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// Label of each node, indexed by [`NodeId`].
    node_labels: Vec<LabelId>,
    /// All edges, indexed by [`EdgeId`].
    edges: Vec<Edge>,
    /// Incident edge ids per node, indexed by [`NodeId`].
    incident: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with the given label and returns its id.
    pub fn add_node(&mut self, label: LabelId) -> NodeId {
        let id = NodeId::from(self.node_labels.len());
        self.node_labels.push(label);
        self.incident.push(Vec::new());
        id
    }

    /// Adds an undirected edge between two existing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownNode`] if either endpoint does not exist.
    pub fn add_edge(
        &mut self,
        tail: NodeId,
        head: NodeId,
        label: LabelId,
    ) -> Result<EdgeId, GedError> {
        self.check_node(tail)?;
        self.check_node(head)?;
        let id = EdgeId::from(self.edges.len());
        self.edges.push(Edge { tail, head, label });
        self.incident[tail.as_usize()].push(id);
        if head != tail {
            self.incident[head.as_usize()].push(id);
        }
        Ok(id)
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.node_labels.len()
    }

    /// Number of edges in the graph.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over all node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_labels.len()).map(NodeId::from)
    }

    /// Iterates over all edge ids in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).map(EdgeId::from)
    }

    /// Returns the label of a node.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownNode`] if the id is out of range.
    pub fn node_label(&self, node: NodeId) -> Result<LabelId, GedError> {
        self.node_labels
            .get(node.as_usize())
            .copied()
            .ok_or(GedError::UnknownNode(node))
    }

    /// Returns the label of an edge.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownEdge`] if the id is out of range.
    pub fn edge_label(&self, edge: EdgeId) -> Result<LabelId, GedError> {
        self.edge(edge).map(|e| e.label)
    }

    /// Returns both endpoints of an edge.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownEdge`] if the id is out of range.
    pub fn endpoints(&self, edge: EdgeId) -> Result<(NodeId, NodeId), GedError> {
        self.edge(edge).map(|e| (e.tail, e.head))
    }

    /// Returns the ids of the edges incident to a node.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownNode`] if the id is out of range.
    pub fn incident_edges(&self, node: NodeId) -> Result<&[EdgeId], GedError> {
        self.incident
            .get(node.as_usize())
            .map(Vec::as_slice)
            .ok_or(GedError::UnknownNode(node))
    }

    /// Returns the degree of a node.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownNode`] if the id is out of range.
    pub fn degree(&self, node: NodeId) -> Result<usize, GedError> {
        self.incident_edges(node).map(<[EdgeId]>::len)
    }

    /// Finds the edge between two nodes, in either orientation.
    ///
    /// Returns `None` when the nodes are not adjacent or either id is out of
    /// range.
    #[must_use]
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        let incident = self.incident.get(a.as_usize())?;
        incident.iter().copied().find(|&e| {
            let edge = &self.edges[e.as_usize()];
            (edge.tail == a && edge.head == b) || (edge.tail == b && edge.head == a)
        })
    }

    /// Returns true if the node id is valid for this graph.
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.as_usize() < self.node_labels.len()
    }

    fn check_node(&self, node: NodeId) -> Result<(), GedError> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(GedError::UnknownNode(node))
        }
    }

    fn edge(&self, edge: EdgeId) -> Result<&Edge, GedError> {
        self.edges
            .get(edge.as_usize())
            .ok_or(GedError::UnknownEdge(edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DUMMY_LABEL;

    fn triangle() -> Graph {
        let mut g = Graph::new();
        let a = g.add_node(LabelId::new(0));
        let b = g.add_node(LabelId::new(1));
        let c = g.add_node(LabelId::new(2));
        g.add_edge(a, b, LabelId::new(10)).unwrap();
        g.add_edge(b, c, LabelId::new(11)).unwrap();
        g.add_edge(c, a, LabelId::new(12)).unwrap();
        g
    }

    #[test]
    fn nodes_and_edges_are_dense() {
        let g = triangle();
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 3);
        let ids: Vec<usize> = g.nodes().map(NodeId::as_usize).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn incident_edges_match_degree() {
        let g = triangle();
        for node in g.nodes() {
            assert_eq!(g.degree(node).unwrap(), 2);
            assert_eq!(g.incident_edges(node).unwrap().len(), 2);
        }
    }

    #[test]
    fn edge_between_is_orientation_free() {
        let g = triangle();
        let (a, b) = (NodeId::new(0), NodeId::new(1));
        assert_eq!(g.edge_between(a, b), g.edge_between(b, a));
        assert!(g.edge_between(a, b).is_some());
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let g = triangle();
        assert!(matches!(
            g.node_label(NodeId::new(99)),
            Err(GedError::UnknownNode(_))
        ));
        assert!(matches!(
            g.edge_label(EdgeId::new(99)),
            Err(GedError::UnknownEdge(_))
        ));
        let mut g = g;
        assert!(g.add_edge(NodeId::new(0), NodeId::new(99), DUMMY_LABEL).is_err());
    }

    #[test]
    fn self_loop_is_counted_once_in_incidence() {
        let mut g = Graph::new();
        let a = g.add_node(DUMMY_LABEL);
        g.add_edge(a, a, LabelId::new(0)).unwrap();
        assert_eq!(g.degree(a).unwrap(), 1);
    }
}
