//! Node maps: the edit path induced by an assignment.
//!
//! A [`NodeMap`] is a partial bijection between the nodes of a source graph
//! and the nodes of a target graph. Source nodes without an image are
//! deletions, target nodes without a pre-image are insertions. It is the
//! value a bound computation hands back together with the bounds; the true
//! edit cost it induces is evaluated by
//! [`GedData::induced_edit_cost`](crate::GedData::induced_edit_cost).

use contracts::*;

use crate::error::GedError;
use crate::types::NodeId;

/// A partial bijection between the nodes of two graphs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeMap {
    /// Image of each source node, `None` for deletions.
    forward: Vec<Option<NodeId>>,
    /// Pre-image of each target node, `None` for insertions.
    backward: Vec<Option<NodeId>>,
}

impl NodeMap {
    /// Creates an empty map between a source graph with `num_source` nodes
    /// and a target graph with `num_target` nodes. All source nodes start
    /// out deleted and all target nodes inserted.
    #[must_use]
    pub fn new(num_source: usize, num_target: usize) -> Self {
        Self {
            forward: vec![None; num_source],
            backward: vec![None; num_target],
        }
    }

    /// Checks that the forward and backward maps describe the same
    /// bijection.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let forward_ok = self.forward.iter().enumerate().all(|(i, image)| {
            image.is_none_or(|k| {
                self.backward.get(k.as_usize()).copied().flatten() == Some(NodeId::from(i))
            })
        });
        let backward_ok = self.backward.iter().enumerate().all(|(k, pre)| {
            pre.is_none_or(|i| {
                self.forward.get(i.as_usize()).copied().flatten() == Some(NodeId::from(k))
            })
        });
        forward_ok && backward_ok
    }

    /// Records the substitution of source node `source` by target node
    /// `target`, displacing any previous assignment of either.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownNode`] if either id is out of range.
    #[ensures(ret.is_err() || self.is_consistent())]
    pub fn set_substitution(&mut self, source: NodeId, target: NodeId) -> Result<(), GedError> {
        if source.as_usize() >= self.forward.len() {
            return Err(GedError::UnknownNode(source));
        }
        if target.as_usize() >= self.backward.len() {
            return Err(GedError::UnknownNode(target));
        }
        if let Some(old_target) = self.forward[source.as_usize()] {
            self.backward[old_target.as_usize()] = None;
        }
        if let Some(old_source) = self.backward[target.as_usize()] {
            self.forward[old_source.as_usize()] = None;
        }
        self.forward[source.as_usize()] = Some(target);
        self.backward[target.as_usize()] = Some(source);
        Ok(())
    }

    /// Returns the image of a source node, `None` when it is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownNode`] if the id is out of range.
    pub fn image(&self, source: NodeId) -> Result<Option<NodeId>, GedError> {
        self.forward
            .get(source.as_usize())
            .copied()
            .ok_or(GedError::UnknownNode(source))
    }

    /// Returns the pre-image of a target node, `None` when it is inserted.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownNode`] if the id is out of range.
    pub fn pre_image(&self, target: NodeId) -> Result<Option<NodeId>, GedError> {
        self.backward
            .get(target.as_usize())
            .copied()
            .ok_or(GedError::UnknownNode(target))
    }

    /// Iterates over all substitution pairs `(source, target)`.
    pub fn substitutions(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .filter_map(|(i, image)| image.map(|k| (NodeId::from(i), k)))
    }

    /// Iterates over all deleted source nodes.
    pub fn deletions(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.forward
            .iter()
            .enumerate()
            .filter_map(|(i, image)| image.is_none().then_some(NodeId::from(i)))
    }

    /// Iterates over all inserted target nodes.
    pub fn insertions(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.backward
            .iter()
            .enumerate()
            .filter_map(|(k, pre)| pre.is_none().then_some(NodeId::from(k)))
    }

    /// Number of source nodes covered by this map.
    #[must_use]
    pub fn num_source_nodes(&self) -> usize {
        self.forward.len()
    }

    /// Number of target nodes covered by this map.
    #[must_use]
    pub fn num_target_nodes(&self) -> usize {
        self.backward.len()
    }
}
