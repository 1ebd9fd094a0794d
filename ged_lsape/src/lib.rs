//! Assignment-based bounds on the graph edit distance.
//!
//! The distance between two labeled graphs is bracketed by reducing it to a
//! linear sum assignment problem with error-correction (LSAPE) over a local
//! representation of each node. [`LsapeBasedMethod`] is the generic
//! populate/solve/convert framework; [`BranchUniform`] is the concrete cost
//! model scoring nodes by the sorted multisets of their incident edge
//! labels.
//!
//! ```
//! use ged_core::{GedData, Graph, LabelId, UniformCosts};
//! use ged_lsape::{BranchUniform, LsapeBasedMethod};
//!
//! let mut data = GedData::new(Box::new(UniformCosts::default()));
//! let mut g = Graph::new();
//! let a = g.add_node(LabelId::new(0));
//! let b = g.add_node(LabelId::new(1));
//! g.add_edge(a, b, LabelId::new(0)).unwrap();
//! let g_id = data.add_graph(g.clone());
//! let h_id = data.add_graph(g);
//!
//! let mut method = LsapeBasedMethod::new(&data, BranchUniform::new());
//! method.init_graph(g_id).unwrap();
//! method.init_graph(h_id).unwrap();
//! let bounds = method.run(g_id, h_id).unwrap();
//! assert!(bounds.lower_bound <= bounds.upper_bound);
//! ```

mod branch_uniform;
mod matrix;
mod method;
mod solver;
mod util;

pub use crate::branch_uniform::{BranchUniform, SortMethod, SortedIncidentLabels};
pub use crate::matrix::CostMatrix;
pub use crate::method::{LsapeBasedMethod, LsapeCostModel, PairBounds};
pub use crate::solver::{LsapeSolution, LsapeSolver};
pub use crate::util::counting_sort;
