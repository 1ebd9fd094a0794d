//! Edit cost functions over the label alphabet.
//!
//! A cost function is supplied once per graph collection and queried through
//! the checked accessors on [`crate::GedData`], which enforce the
//! non-negativity contract.

use crate::types::LabelId;

/// Per-operation edit costs over node and edge labels.
///
/// Implementations must return non-negative values; a negative cost is a
/// programming error in the implementation and makes the computed bounds
/// meaningless. Substituting a label for itself should be free, otherwise
/// the self-distance of a graph is not zero.
pub trait EditCosts: Send + Sync {
    /// Cost of relabeling a node from `from` to `to`.
    fn node_subst_cost(&self, from: LabelId, to: LabelId) -> f64;

    /// Cost of deleting a node carrying `label`.
    fn node_del_cost(&self, label: LabelId) -> f64;

    /// Cost of inserting a node carrying `label`.
    fn node_ins_cost(&self, label: LabelId) -> f64;

    /// Cost of relabeling an edge from `from` to `to`.
    fn edge_subst_cost(&self, from: LabelId, to: LabelId) -> f64;

    /// Cost of deleting an edge carrying `label`.
    fn edge_del_cost(&self, label: LabelId) -> f64;

    /// Cost of inserting an edge carrying `label`.
    fn edge_ins_cost(&self, label: LabelId) -> f64;
}

/// Uniform edit costs: every operation on a node costs `node_cost`, every
/// operation on an edge costs `edge_cost`, and substitutions between equal
/// labels are free.
#[derive(Clone, Copy, Debug)]
pub struct UniformCosts {
    /// Unit charge for node operations.
    node_cost: f64,
    /// Unit charge for edge operations.
    edge_cost: f64,
}

impl UniformCosts {
    /// Creates uniform costs with the given unit charges.
    #[must_use]
    pub const fn new(node_cost: f64, edge_cost: f64) -> Self {
        Self {
            node_cost,
            edge_cost,
        }
    }
}

impl Default for UniformCosts {
    /// Unit charges of 1.0 for both node and edge operations.
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl EditCosts for UniformCosts {
    fn node_subst_cost(&self, from: LabelId, to: LabelId) -> f64 {
        if from == to { 0.0 } else { self.node_cost }
    }

    fn node_del_cost(&self, _label: LabelId) -> f64 {
        self.node_cost
    }

    fn node_ins_cost(&self, _label: LabelId) -> f64 {
        self.node_cost
    }

    fn edge_subst_cost(&self, from: LabelId, to: LabelId) -> f64 {
        if from == to { 0.0 } else { self.edge_cost }
    }

    fn edge_del_cost(&self, _label: LabelId) -> f64 {
        self.edge_cost
    }

    fn edge_ins_cost(&self, _label: LabelId) -> f64 {
        self.edge_cost
    }
}
