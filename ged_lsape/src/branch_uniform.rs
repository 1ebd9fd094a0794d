//! The branch cost model under uniform edit costs.
//!
//! A node is represented by the sorted multiset of labels on its incident
//! edges (its "branch"). Substitution, deletion and insertion costs between
//! branches reduce to a multiset distance computed by a single linear merge
//! over the pre-sorted label sequences, which is why sortedness is cached
//! per graph instead of recomputed per pair.
//!
//! Follows the method suggested by Zheng, Zou, Lian, Wang and Zhao,
//! "Efficient graph similarity search over large graph databases".

use std::collections::HashMap;

use itertools::{EitherOrBoth, Itertools};

use ged_core::{DUMMY_LABEL, GedData, GedError, Graph, GraphId, LabelId, NodeId};

use crate::matrix::CostMatrix;
use crate::method::LsapeCostModel;
use crate::util::counting_sort;

/// Each edge appears in the branches of both of its endpoints, so branch
/// distances charge edges at half weight to keep the assignment optimum a
/// valid lower bound.
const BRANCH_EDGE_FACTOR: f64 = 0.5;

/// The sorting algorithm used to build the per-node label sequences.
///
/// Counting sort is `O(d + L)` per node and wins when the number of distinct
/// edge labels is small and fixed; the comparison sort is the general
/// `O(d log d)` fallback. Both produce identical sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMethod {
    /// General comparison sort.
    Std,
    /// Linear-time counting sort over the label alphabet.
    #[default]
    Counting,
}

/// Per-node sorted incident edge labels of one graph.
///
/// Built exactly once per graph id on the first `init_graph` call and
/// read-only afterwards. Cloning is a deep value copy, so a duplicated
/// method instance never shares cache storage with the original.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortedIncidentLabels {
    /// Sorted incident label sequence per node, indexed by [`NodeId`].
    per_node: Vec<Vec<LabelId>>,
}

impl SortedIncidentLabels {
    /// Builds the cache for one graph with the configured sort algorithm.
    fn build(graph: &Graph, sort_method: SortMethod) -> Result<Self, GedError> {
        let mut per_node = Vec::with_capacity(graph.num_nodes());
        for node in graph.nodes() {
            let mut labels = graph
                .incident_edges(node)?
                .iter()
                .map(|&edge| graph.edge_label(edge))
                .collect::<Result<Vec<_>, _>>()?;
            match sort_method {
                SortMethod::Std => labels.sort_unstable(),
                SortMethod::Counting => counting_sort(&mut labels),
            }
            per_node.push(labels);
        }
        Ok(Self { per_node })
    }

    /// The sorted incident label sequence of one node.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownNode`] when the id was not present in the
    /// graph this cache was built from.
    pub fn incident_labels(&self, node: NodeId) -> Result<&[LabelId], GedError> {
        self.per_node
            .get(node.as_usize())
            .map(Vec::as_slice)
            .ok_or(GedError::UnknownNode(node))
    }
}

/// The BranchUniform cost model.
///
/// Recognized options on top of the framework's:
///
/// | option | values | default |
/// | ------ | ------ | ------- |
/// | `--sort-method` | `STD`, `COUNTING` | `COUNTING` |
/// | `--wildcards` | `YES`, `NO` | `NO` |
#[derive(Clone, Debug)]
pub struct BranchUniform {
    /// The configured sorting algorithm.
    sort_method: SortMethod,
    /// Whether wildcard relaxation is enabled.
    wildcards: bool,
    /// The designated label that matches anything when wildcards are on.
    wildcard_label: LabelId,
    /// Per-graph branch caches, keyed by graph id.
    sorted_labels: HashMap<GraphId, SortedIncidentLabels>,
}

impl BranchUniform {
    /// Creates the model with default options and the unlabeled sentinel as
    /// the wildcard label.
    #[must_use]
    pub fn new() -> Self {
        Self::with_wildcard_label(DUMMY_LABEL)
    }

    /// Creates the model with a designated wildcard label. The wildcard
    /// only takes effect once the `wildcards` option is enabled.
    #[must_use]
    pub fn with_wildcard_label(wildcard_label: LabelId) -> Self {
        Self {
            sort_method: SortMethod::default(),
            wildcards: false,
            wildcard_label,
            sorted_labels: HashMap::new(),
        }
    }

    /// The configured sorting algorithm.
    #[must_use]
    pub const fn sort_method(&self) -> SortMethod {
        self.sort_method
    }

    /// Whether wildcard relaxation is enabled.
    #[must_use]
    pub const fn wildcards_enabled(&self) -> bool {
        self.wildcards
    }

    /// The cached branch representation of one initialized graph.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UninitializedGraph`] when `init_graph` has not
    /// run for this id.
    pub fn sorted_labels(&self, graph_id: GraphId) -> Result<&SortedIncidentLabels, GedError> {
        self.sorted_labels
            .get(&graph_id)
            .ok_or(GedError::UninitializedGraph(graph_id))
    }

    /// Approximate substitution cost of mapping node `i` of `g` to node `k`
    /// of `h`: the node relabeling charge plus the half-weighted branch
    /// multiset distance.
    fn substitution_cost(
        &self,
        data: &GedData,
        g: &Graph,
        h: &Graph,
        i: NodeId,
        k: NodeId,
        sorted_g: &SortedIncidentLabels,
        sorted_h: &SortedIncidentLabels,
    ) -> Result<f64, GedError> {
        let node_cost = data.node_subst_cost(g.node_label(i)?, h.node_label(k)?)?;
        let branch_cost = multiset_substitution_cost(
            data,
            sorted_g.incident_labels(i)?,
            sorted_h.incident_labels(k)?,
        )?;
        Ok(node_cost + BRANCH_EDGE_FACTOR * branch_cost)
    }

    /// Wildcard-relaxed substitution cost. Never exceeds the plain cost for
    /// the same pair and never goes negative.
    fn wildcard_substitution_cost(
        &self,
        data: &GedData,
        g: &Graph,
        h: &Graph,
        i: NodeId,
        k: NodeId,
        sorted_g: &SortedIncidentLabels,
        sorted_h: &SortedIncidentLabels,
    ) -> Result<f64, GedError> {
        let g_label = g.node_label(i)?;
        let h_label = h.node_label(k)?;
        let node_cost = if g_label == self.wildcard_label || h_label == self.wildcard_label {
            0.0
        } else {
            data.node_subst_cost(g_label, h_label)?
        };
        let branch_cost = self.wildcard_multiset_substitution_cost(
            data,
            sorted_g.incident_labels(i)?,
            sorted_h.incident_labels(k)?,
        )?;
        Ok(node_cost + BRANCH_EDGE_FACTOR * branch_cost)
    }

    /// Branch multiset distance with the wildcard relaxation: every
    /// occurrence of the wildcard label absorbs one opposing label at zero
    /// marginal cost before the leftovers are charged as usual.
    fn wildcard_multiset_substitution_cost(
        &self,
        data: &GedData,
        a: &[LabelId],
        b: &[LabelId],
    ) -> Result<f64, GedError> {
        let (a_real, num_wild_a) = strip_wildcards(a, self.wildcard_label);
        let (b_real, num_wild_b) = strip_wildcards(b, self.wildcard_label);
        let (mut unmatched_a, mut unmatched_b) = merge_unmatched(&a_real, &b_real);

        // Wildcards first absorb opposing unmatched labels, then each
        // other; only then do leftovers fall back to ordinary charges.
        let absorbed_b = num_wild_a.min(unmatched_b.len());
        unmatched_b.truncate(unmatched_b.len() - absorbed_b);
        let absorbed_a = num_wild_b.min(unmatched_a.len());
        unmatched_a.truncate(unmatched_a.len() - absorbed_a);

        let wild_a_left = num_wild_a - absorbed_b;
        let wild_b_left = num_wild_b - absorbed_a;
        let wild_pairs = wild_a_left.min(wild_b_left);
        unmatched_a.extend(std::iter::repeat_n(
            self.wildcard_label,
            wild_a_left - wild_pairs,
        ));
        unmatched_b.extend(std::iter::repeat_n(
            self.wildcard_label,
            wild_b_left - wild_pairs,
        ));

        charge_unmatched(data, &unmatched_a, &unmatched_b)
    }

    /// Deletion cost of node `i`: the node charge plus half-weighted edge
    /// deletion charges over its incident labels. With wildcards enabled,
    /// wildcard edges contribute nothing.
    fn deletion_cost(
        &self,
        data: &GedData,
        g: &Graph,
        i: NodeId,
        sorted_g: &SortedIncidentLabels,
    ) -> Result<f64, GedError> {
        let mut cost = data.node_del_cost(g.node_label(i)?)?;
        for &label in sorted_g.incident_labels(i)? {
            if self.wildcards && label == self.wildcard_label {
                continue;
            }
            cost += BRANCH_EDGE_FACTOR * data.edge_del_cost(label)?;
        }
        Ok(cost)
    }

    /// Insertion cost of node `k`, mirroring [`Self::deletion_cost`].
    fn insertion_cost(
        &self,
        data: &GedData,
        h: &Graph,
        k: NodeId,
        sorted_h: &SortedIncidentLabels,
    ) -> Result<f64, GedError> {
        let mut cost = data.node_ins_cost(h.node_label(k)?)?;
        for &label in sorted_h.incident_labels(k)? {
            if self.wildcards && label == self.wildcard_label {
                continue;
            }
            cost += BRANCH_EDGE_FACTOR * data.edge_ins_cost(label)?;
        }
        Ok(cost)
    }
}

impl Default for BranchUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl LsapeCostModel for BranchUniform {
    fn set_default_options(&mut self) {
        self.sort_method = SortMethod::default();
        self.wildcards = false;
    }

    fn parse_option(&mut self, key: &str, value: &str) -> Result<bool, GedError> {
        match key {
            "sort-method" => {
                self.sort_method = match value {
                    "STD" => SortMethod::Std,
                    "COUNTING" => SortMethod::Counting,
                    _ => return Err(GedError::invalid_option(key)),
                };
                Ok(true)
            }
            "wildcards" => {
                self.wildcards = match value {
                    "YES" => true,
                    "NO" => false,
                    _ => return Err(GedError::invalid_option(key)),
                };
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn valid_options(&self) -> &'static str {
        "[--sort-method STD|COUNTING] [--wildcards YES|NO]"
    }

    fn init_graph(&mut self, data: &GedData, graph_id: GraphId) -> Result<(), GedError> {
        if self.sorted_labels.contains_key(&graph_id) {
            return Ok(());
        }
        let cache = SortedIncidentLabels::build(data.graph(graph_id)?, self.sort_method)?;
        self.sorted_labels.insert(graph_id, cache);
        Ok(())
    }

    fn populate_instance(
        &self,
        data: &GedData,
        g_id: GraphId,
        h_id: GraphId,
        matrix: &mut CostMatrix,
    ) -> Result<(), GedError> {
        let g = data.graph(g_id)?;
        let h = data.graph(h_id)?;
        let sorted_g = self.sorted_labels(g_id)?;
        let sorted_h = self.sorted_labels(h_id)?;
        let dustbin_row = matrix.dustbin_row();
        let dustbin_col = matrix.dustbin_col();

        for i in g.nodes() {
            for k in h.nodes() {
                let cost = if self.wildcards {
                    self.wildcard_substitution_cost(data, g, h, i, k, sorted_g, sorted_h)?
                } else {
                    self.substitution_cost(data, g, h, i, k, sorted_g, sorted_h)?
                };
                matrix.set(i.as_usize(), k.as_usize(), cost);
            }
            matrix.set(
                i.as_usize(),
                dustbin_col,
                self.deletion_cost(data, g, i, sorted_g)?,
            );
        }
        for k in h.nodes() {
            matrix.set(
                dustbin_row,
                k.as_usize(),
                self.insertion_cost(data, h, k, sorted_h)?,
            );
        }
        Ok(())
    }
}

/// Splits a sorted label sequence into its non-wildcard part and the number
/// of wildcard occurrences.
fn strip_wildcards(labels: &[LabelId], wildcard: LabelId) -> (Vec<LabelId>, usize) {
    let real: Vec<LabelId> = labels
        .iter()
        .copied()
        .filter(|&label| label != wildcard)
        .collect();
    let num_wild = labels.len() - real.len();
    (real, num_wild)
}

/// One linear merge pass over two sorted sequences: equal heads consume each
/// other for free, everything else ends up in the per-side unmatched lists
/// (still sorted).
fn merge_unmatched(a: &[LabelId], b: &[LabelId]) -> (Vec<LabelId>, Vec<LabelId>) {
    let mut unmatched_a = Vec::new();
    let mut unmatched_b = Vec::new();
    for head in a.iter().merge_join_by(b.iter(), Ord::cmp) {
        match head {
            EitherOrBoth::Both(_, _) => {}
            EitherOrBoth::Left(&label) => unmatched_a.push(label),
            EitherOrBoth::Right(&label) => unmatched_b.push(label),
        }
    }
    (unmatched_a, unmatched_b)
}

/// Charges the unmatched leftovers of a merge: positional substitutions as
/// long as both sides last, deletions/insertions for the rest.
fn charge_unmatched(
    data: &GedData,
    unmatched_a: &[LabelId],
    unmatched_b: &[LabelId],
) -> Result<f64, GedError> {
    let paired = unmatched_a.len().min(unmatched_b.len());
    let mut cost = 0.0;
    for (&from, &to) in unmatched_a.iter().zip(unmatched_b.iter()) {
        cost += data.edge_subst_cost(from, to)?;
    }
    for &label in &unmatched_a[paired..] {
        cost += data.edge_del_cost(label)?;
    }
    for &label in &unmatched_b[paired..] {
        cost += data.edge_ins_cost(label)?;
    }
    Ok(cost)
}

/// The branch multiset distance: minimum weighted label edit operations
/// transforming sorted multiset `a` into sorted multiset `b` under the
/// uniform-cost assumption. `O(|a| + |b|)`.
pub(crate) fn multiset_substitution_cost(
    data: &GedData,
    a: &[LabelId],
    b: &[LabelId],
) -> Result<f64, GedError> {
    let (unmatched_a, unmatched_b) = merge_unmatched(a, b);
    charge_unmatched(data, &unmatched_a, &unmatched_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ged_core::UniformCosts;

    fn unit_data() -> GedData {
        GedData::new(Box::new(UniformCosts::default()))
    }

    fn labels(values: &[u32]) -> Vec<LabelId> {
        values.iter().copied().map(LabelId::new).collect()
    }

    #[test]
    fn multiset_cost_counts_one_deletion_and_one_substitution() {
        let data = unit_data();
        // {1,1,2,3} vs {1,2,2}: one surplus "1" is deleted, "3" becomes "2".
        let cost =
            multiset_substitution_cost(&data, &labels(&[1, 1, 2, 3]), &labels(&[1, 2, 2])).unwrap();
        assert_eq!(cost, 2.0);
    }

    #[test]
    fn multiset_cost_scales_with_the_unit_charge() {
        let data = GedData::new(Box::new(UniformCosts::new(1.0, 3.0)));
        let cost =
            multiset_substitution_cost(&data, &labels(&[1, 1, 2, 3]), &labels(&[1, 2, 2])).unwrap();
        assert_eq!(cost, 6.0);
    }

    #[test]
    fn identical_multisets_cost_nothing() {
        let data = unit_data();
        let seq = labels(&[0, 1, 1, 4]);
        assert_eq!(multiset_substitution_cost(&data, &seq, &seq).unwrap(), 0.0);
    }

    #[test]
    fn wildcards_absorb_unmatched_labels() {
        let data = unit_data();
        let model = BranchUniform::with_wildcard_label(LabelId::new(0));
        // {0, 5} vs {7, 9}: the wildcard absorbs one side of the mismatch,
        // leaving a single substitution.
        let cost = model
            .wildcard_multiset_substitution_cost(&data, &labels(&[0, 5]), &labels(&[7, 9]))
            .unwrap();
        assert_eq!(cost, 1.0);
        let plain =
            multiset_substitution_cost(&data, &labels(&[0, 5]), &labels(&[7, 9])).unwrap();
        assert_eq!(plain, 2.0);
    }

    #[test]
    fn wildcard_only_sequences_are_free_against_each_other() {
        let data = unit_data();
        let model = BranchUniform::with_wildcard_label(LabelId::new(0));
        let cost = model
            .wildcard_multiset_substitution_cost(&data, &labels(&[0, 0]), &labels(&[0, 0]))
            .unwrap();
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn leftover_wildcards_still_pay_removal() {
        let data = unit_data();
        let model = BranchUniform::with_wildcard_label(LabelId::new(0));
        // Three wildcards against a single label: one absorbs it, the other
        // two are surplus edges that must be deleted.
        let cost = model
            .wildcard_multiset_substitution_cost(&data, &labels(&[0, 0, 0]), &labels(&[4]))
            .unwrap();
        assert_eq!(cost, 2.0);
    }

    #[test]
    fn unknown_option_key_is_not_recognized() {
        let mut model = BranchUniform::new();
        assert!(!model.parse_option("bogus-key", "1").unwrap());
    }

    #[test]
    fn out_of_domain_values_are_invalid() {
        let mut model = BranchUniform::new();
        let err = model.parse_option("sort-method", "BOGUS").unwrap_err();
        assert!(matches!(err, GedError::InvalidOption { key } if key == "sort-method"));
        let err = model.parse_option("wildcards", "MAYBE").unwrap_err();
        assert!(matches!(err, GedError::InvalidOption { key } if key == "wildcards"));
    }

    #[test]
    fn init_graph_is_idempotent() {
        let mut data = unit_data();
        let mut g = Graph::new();
        let a = g.add_node(LabelId::new(0));
        let b = g.add_node(LabelId::new(1));
        g.add_edge(a, b, LabelId::new(7)).unwrap();
        let id = data.add_graph(g);

        let mut model = BranchUniform::new();
        model.init_graph(&data, id).unwrap();
        let first = model.sorted_labels(id).unwrap().clone();
        model.init_graph(&data, id).unwrap();
        assert_eq!(*model.sorted_labels(id).unwrap(), first);
    }

    #[test]
    fn both_sort_methods_build_the_same_cache() {
        let mut data = unit_data();
        let mut g = Graph::new();
        let nodes: Vec<NodeId> = (0..4).map(|i| g.add_node(LabelId::new(i))).collect();
        g.add_edge(nodes[0], nodes[1], LabelId::new(9)).unwrap();
        g.add_edge(nodes[0], nodes[2], LabelId::new(2)).unwrap();
        g.add_edge(nodes[0], nodes[3], LabelId::new(9)).unwrap();
        g.add_edge(nodes[2], nodes[3], LabelId::new(1)).unwrap();
        let id = data.add_graph(g);

        let mut counting = BranchUniform::new();
        counting.parse_option("sort-method", "COUNTING").unwrap();
        counting.init_graph(&data, id).unwrap();

        let mut std_sort = BranchUniform::new();
        std_sort.parse_option("sort-method", "STD").unwrap();
        std_sort.init_graph(&data, id).unwrap();

        assert_eq!(
            counting.sorted_labels(id).unwrap(),
            std_sort.sorted_labels(id).unwrap()
        );
        assert_eq!(
            counting
                .sorted_labels(id)
                .unwrap()
                .incident_labels(nodes[0])
                .unwrap(),
            &labels(&[2, 9, 9])[..]
        );
    }

    #[test]
    fn cache_rejects_foreign_node_ids() {
        let mut data = unit_data();
        let mut g = Graph::new();
        g.add_node(LabelId::new(0));
        let id = data.add_graph(g);

        let mut model = BranchUniform::new();
        model.init_graph(&data, id).unwrap();
        let cache = model.sorted_labels(id).unwrap();
        assert!(matches!(
            cache.incident_labels(NodeId::new(5)),
            Err(GedError::UnknownNode(_))
        ));
    }
}
