//! The assignment-based bound computation framework.
//!
//! [`LsapeBasedMethod`] orchestrates, for a pair of graphs: build the master
//! problem matrix (delegated to the configured [`LsapeCostModel`]), solve it
//! with [`LsapeSolver`], convert the optimal assignment into a node map, and
//! report the solver optimum as a lower bound and the true induced edit cost
//! of that node map as an upper bound.
//!
//! The assignment optimum relaxes the true distance because it scores node
//! pairs in isolation, ignoring interactions between mappings that share an
//! edge; the node map it induces is nevertheless a feasible edit path, so
//! recosting it with the collection's real cost function always yields a
//! valid upper bound.

use std::collections::HashSet;

use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use ged_core::{GedData, GedError, GraphId, NodeId, NodeMap, parse_option_string};

use crate::matrix::CostMatrix;
use crate::solver::LsapeSolver;

/// Capability a concrete cost model plugs into the framework.
///
/// One implementation exists per method (for example
/// [`BranchUniform`](crate::BranchUniform)); the framework owns the instance
/// and drives it through these hooks.
pub trait LsapeCostModel: Clone + Send + Sync {
    /// Resets the model to its default configuration.
    fn set_default_options(&mut self);

    /// Applies one option. Returns `Ok(false)` when the key is not
    /// recognized by this model, so the framework can try its own options.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::InvalidOption`] when the key is recognized but
    /// the value is out of domain.
    fn parse_option(&mut self, key: &str, value: &str) -> Result<bool, GedError>;

    /// Human-readable description of the options this model recognizes.
    fn valid_options(&self) -> &'static str;

    /// Builds the per-graph cache for one registered graph. Called once per
    /// graph id; must tolerate repeat calls.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownGraph`] for unregistered ids.
    fn init_graph(&mut self, data: &GedData, graph_id: GraphId) -> Result<(), GedError>;

    /// Fills the master problem matrix for one pair. The matrix arrives
    /// zero-filled with the correct dimensions, including the dustbin
    /// row/column.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UninitializedGraph`] when a per-graph cache is
    /// missing, or [`GedError::ContractViolation`] on a broken cost
    /// function.
    fn populate_instance(
        &self,
        data: &GedData,
        g_id: GraphId,
        h_id: GraphId,
        matrix: &mut CostMatrix,
    ) -> Result<(), GedError>;
}

/// The bounds computed for one graph pair, plus the edit path behind the
/// upper bound.
#[derive(Clone, Debug)]
pub struct PairBounds {
    /// The solver optimum: a lower bound on the true distance.
    pub lower_bound: f64,
    /// True cost of the induced edit path: an upper bound.
    pub upper_bound: f64,
    /// The node map the upper bound was evaluated on.
    pub node_map: NodeMap,
}

/// Generic orchestration of "populate, solve, convert" for one cost model.
pub struct LsapeBasedMethod<'a, M: LsapeCostModel> {
    /// The shared graph collection.
    data: &'a GedData,
    /// The plugged-in cost model.
    model: M,
    /// Worker count for the pair driver; 0 lets the runtime decide.
    num_threads: usize,
    /// Graph ids whose per-graph caches have been built.
    initialized: HashSet<GraphId>,
}

impl<'a, M: LsapeCostModel> LsapeBasedMethod<'a, M> {
    /// Creates a method over a collection, with the model reset to its
    /// default configuration.
    pub fn new(data: &'a GedData, mut model: M) -> Self {
        model.set_default_options();
        Self {
            data,
            model,
            num_threads: 1,
            initialized: HashSet::new(),
        }
    }

    /// Applies an option string of `--key value` pairs.
    ///
    /// Each key is first offered to the cost model, then matched against the
    /// framework's own options (`threads`). Configuration is transactional:
    /// when any pair fails, the previous configuration stays in effect.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::InvalidOption`] naming the first offending key.
    pub fn configure(&mut self, options: &str) -> Result<(), GedError> {
        let pairs = parse_option_string(options)?;

        let mut model = self.model.clone();
        model.set_default_options();
        let mut num_threads = 1;

        for (key, value) in &pairs {
            if model.parse_option(key, value)? {
                continue;
            }
            match key.as_str() {
                "threads" => {
                    num_threads = value
                        .parse::<usize>()
                        .map_err(|_| GedError::invalid_option(key))?;
                }
                _ => return Err(GedError::invalid_option(key)),
            }
        }

        self.model = model;
        self.num_threads = num_threads;
        Ok(())
    }

    /// Describes all recognized option keys, for help surfaces.
    #[must_use]
    pub fn valid_options(&self) -> String {
        format!("{} [--threads <num>]", self.model.valid_options())
    }

    /// Builds the per-graph cache for one graph. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UnknownGraph`] for unregistered ids.
    pub fn init_graph(&mut self, graph_id: GraphId) -> Result<(), GedError> {
        if self.initialized.contains(&graph_id) {
            return Ok(());
        }
        self.data.graph(graph_id)?;
        self.model.init_graph(self.data, graph_id)?;
        self.initialized.insert(graph_id);
        Ok(())
    }

    /// Computes lower and upper bounds for one pair of initialized graphs.
    ///
    /// # Errors
    ///
    /// Returns [`GedError::UninitializedGraph`] when [`Self::init_graph`]
    /// was not called for either graph, or any error the model or cost
    /// function surfaces.
    pub fn run(&self, g_id: GraphId, h_id: GraphId) -> Result<PairBounds, GedError> {
        for id in [g_id, h_id] {
            if !self.initialized.contains(&id) {
                return Err(GedError::UninitializedGraph(id));
            }
        }
        let g = self.data.graph(g_id)?;
        let h = self.data.graph(h_id)?;

        let mut matrix = CostMatrix::for_pair(g.num_nodes(), h.num_nodes());
        self.model
            .populate_instance(self.data, g_id, h_id, &mut matrix)?;

        let solution = LsapeSolver::solve(&matrix);

        let mut node_map = NodeMap::new(g.num_nodes(), h.num_nodes());
        for (row, assignment) in solution.row_to_col.iter().enumerate() {
            if let Some(col) = assignment {
                node_map.set_substitution(NodeId::from(row), NodeId::from(*col))?;
            }
        }

        let lower_bound = solution.cost;
        let upper_bound = self.data.induced_edit_cost(g_id, h_id, &node_map)?;

        debug!(
            "pair ({}, {}): lower {}, upper {}",
            g_id, h_id, lower_bound, upper_bound
        );

        Ok(PairBounds {
            lower_bound,
            upper_bound,
            node_map,
        })
    }

    /// Evaluates many pairs against this method.
    ///
    /// Every referenced graph is initialized up front, then frozen; after
    /// that the per-pair computations only read shared state, so they are
    /// evaluated in parallel when the `rayon` feature is enabled (honoring
    /// the `threads` option, 0 meaning the runtime default). Results are
    /// positional: entry `i` belongs to `pairs[i]` regardless of completion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the first error any initialization or pair run surfaces.
    pub fn run_pairs(&mut self, pairs: &[(GraphId, GraphId)]) -> Result<Vec<PairBounds>, GedError> {
        for &(g_id, h_id) in pairs {
            self.init_graph(g_id)?;
            self.init_graph(h_id)?;
        }
        info!("running {} graph pairs", pairs.len());

        #[cfg(feature = "rayon")]
        {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.num_threads)
                .build()
                .map_err(|e| GedError::contract_violation(e.to_string()))?;
            let method = &*self;
            return pool.install(|| {
                pairs
                    .par_iter()
                    .map(|&(g_id, h_id)| method.run(g_id, h_id))
                    .collect()
            });
        }

        #[cfg(not(feature = "rayon"))]
        {
            pairs
                .iter()
                .map(|&(g_id, h_id)| self.run(g_id, h_id))
                .collect()
        }
    }

    /// Read access to the plugged-in model, for tests and introspection.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// The configured worker count.
    #[must_use]
    pub const fn num_threads(&self) -> usize {
        self.num_threads
    }
}
