//! The graph collection shared by all distance computations.
//!
//! [`GedData`] owns the registered graphs (a dense arena indexed by
//! [`GraphId`]) and the collection's edit cost function. All cost queries go
//! through its checked accessors, which fail fast when the cost function
//! breaks the non-negativity contract.

use tracing::debug;

use crate::costs::EditCosts;
use crate::error::GedError;
use crate::graph::Graph;
use crate::node_map::NodeMap;
use crate::types::{GraphId, LabelId};

/// A collection of graphs together with an edit cost function.
pub struct GedData {
    /// Registered graphs, indexed by [`GraphId`].
    graphs: Vec<Graph>,
    /// The cost function supplied for this collection.
    costs: Box<dyn EditCosts>,
}

impl GedData {
    /// Creates a collection with the given cost function and no graphs.
    #[must_use]
    pub fn new(costs: Box<dyn EditCosts>) -> Self {
        Self {
            graphs: Vec::new(),
            costs,
        }
    }

    /// Registers a graph and returns its id. Ids are allocated contiguously.
    pub fn add_graph(&mut self, graph: Graph) -> GraphId {
        let id = GraphId::from(self.graphs.len());
        debug!(
            "registering graph {}: {} nodes, {} edges",
            id,
            graph.num_nodes(),
            graph.num_edges()
        );
        self.graphs.push(graph);
        id
    }

    /// Returns a registered graph.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownGraph`] if the id is not registered.
    pub fn graph(&self, id: GraphId) -> Result<&Graph, GedError> {
        self.graphs
            .get(id.as_usize())
            .ok_or(GedError::UnknownGraph(id))
    }

    /// Number of registered graphs.
    #[must_use]
    pub fn num_graphs(&self) -> usize {
        self.graphs.len()
    }

    /// Iterates over all registered graph ids.
    pub fn graph_ids(&self) -> impl Iterator<Item = GraphId> + '_ {
        (0..self.graphs.len()).map(GraphId::from)
    }

    /// Checked node substitution cost.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::ContractViolation`] if the cost function returns
    /// a negative value.
    pub fn node_subst_cost(&self, from: LabelId, to: LabelId) -> Result<f64, GedError> {
        Self::checked(self.costs.node_subst_cost(from, to), "node substitution")
    }

    /// Checked node deletion cost.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::ContractViolation`] on a negative cost.
    pub fn node_del_cost(&self, label: LabelId) -> Result<f64, GedError> {
        Self::checked(self.costs.node_del_cost(label), "node deletion")
    }

    /// Checked node insertion cost.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::ContractViolation`] on a negative cost.
    pub fn node_ins_cost(&self, label: LabelId) -> Result<f64, GedError> {
        Self::checked(self.costs.node_ins_cost(label), "node insertion")
    }

    /// Checked edge substitution cost.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::ContractViolation`] on a negative cost.
    pub fn edge_subst_cost(&self, from: LabelId, to: LabelId) -> Result<f64, GedError> {
        Self::checked(self.costs.edge_subst_cost(from, to), "edge substitution")
    }

    /// Checked edge deletion cost.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::ContractViolation`] on a negative cost.
    pub fn edge_del_cost(&self, label: LabelId) -> Result<f64, GedError> {
        Self::checked(self.costs.edge_del_cost(label), "edge deletion")
    }

    /// Checked edge insertion cost.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::ContractViolation`] on a negative cost.
    pub fn edge_ins_cost(&self, label: LabelId) -> Result<f64, GedError> {
        Self::checked(self.costs.edge_ins_cost(label), "edge insertion")
    }

    /// Evaluates the true edit cost induced by a node map between two
    /// registered graphs.
    ///
    /// Node operations are charged directly from the map. Edge operations
    /// are induced: an edge of `g` is substituted when both endpoints are
    /// mapped and the image edge exists in `h`, deleted otherwise; edges of
    /// `h` not covered by a substitution are inserted. The result is the
    /// cost of a feasible edit path, hence a valid upper bound on the true
    /// distance.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownGraph`] for unregistered ids,
    /// [`GedError::UnknownNode`] when the map does not cover the graphs, or
    /// [`GedError::ContractViolation`] on a negative cost.
    pub fn induced_edit_cost(
        &self,
        g_id: GraphId,
        h_id: GraphId,
        map: &NodeMap,
    ) -> Result<f64, GedError> {
        let g = self.graph(g_id)?;
        let h = self.graph(h_id)?;

        let mut total = 0.0;

        for i in g.nodes() {
            let label = g.node_label(i)?;
            total += match map.image(i)? {
                Some(k) => self.node_subst_cost(label, h.node_label(k)?)?,
                None => self.node_del_cost(label)?,
            };
        }
        for k in h.nodes() {
            if map.pre_image(k)?.is_none() {
                total += self.node_ins_cost(h.node_label(k)?)?;
            }
        }

        for e in g.edges() {
            let (u, v) = g.endpoints(e)?;
            let label = g.edge_label(e)?;
            total += match (map.image(u)?, map.image(v)?) {
                (Some(u_img), Some(v_img)) => match h.edge_between(u_img, v_img) {
                    Some(f) => self.edge_subst_cost(label, h.edge_label(f)?)?,
                    None => self.edge_del_cost(label)?,
                },
                _ => self.edge_del_cost(label)?,
            };
        }
        for f in h.edges() {
            let (u, v) = h.endpoints(f)?;
            let covered = match (map.pre_image(u)?, map.pre_image(v)?) {
                (Some(u_pre), Some(v_pre)) => g.edge_between(u_pre, v_pre).is_some(),
                _ => false,
            };
            if !covered {
                total += self.edge_ins_cost(h.edge_label(f)?)?;
            }
        }

        Ok(total)
    }

    fn checked(cost: f64, what: &str) -> Result<f64, GedError> {
        if cost >= 0.0 {
            Ok(cost)
        } else {
            Err(GedError::contract_violation(format!(
                "{what} cost is negative: {cost}"
            )))
        }
    }
}
