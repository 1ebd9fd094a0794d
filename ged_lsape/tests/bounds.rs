//! End-to-end bound computations over small labeled graphs.

use std::sync::OnceLock;

use rstest::rstest;

use ged_core::{GedData, GedError, Graph, GraphId, LabelId, UniformCosts};
use ged_lsape::{BranchUniform, LsapeBasedMethod, SortMethod};

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Path graph with the given node labels; edges all carry label 0.
fn path(labels: &[u32]) -> Graph {
    let mut g = Graph::new();
    let nodes: Vec<_> = labels.iter().map(|&l| g.add_node(LabelId::new(l))).collect();
    for pair in nodes.windows(2) {
        g.add_edge(pair[0], pair[1], LabelId::new(0)).unwrap();
    }
    g
}

/// Star graph: a hub labeled `hub` connected to leaves with the given edge
/// labels; all leaves carry node label 9.
fn star(hub: u32, edge_labels: &[u32]) -> Graph {
    let mut g = Graph::new();
    let center = g.add_node(LabelId::new(hub));
    for &l in edge_labels {
        let leaf = g.add_node(LabelId::new(9));
        g.add_edge(center, leaf, LabelId::new(l)).unwrap();
    }
    g
}

fn triangle(labels: [u32; 3]) -> Graph {
    let mut g = Graph::new();
    let nodes: Vec<_> = labels.iter().map(|&l| g.add_node(LabelId::new(l))).collect();
    g.add_edge(nodes[0], nodes[1], LabelId::new(1)).unwrap();
    g.add_edge(nodes[1], nodes[2], LabelId::new(2)).unwrap();
    g.add_edge(nodes[2], nodes[0], LabelId::new(3)).unwrap();
    g
}

fn collection(graphs: Vec<Graph>) -> (GedData, Vec<GraphId>) {
    let mut data = GedData::new(Box::new(UniformCosts::default()));
    let ids = graphs.into_iter().map(|g| data.add_graph(g)).collect();
    (data, ids)
}

fn method_for(data: &GedData) -> LsapeBasedMethod<'_, BranchUniform> {
    LsapeBasedMethod::new(data, BranchUniform::new())
}

#[rstest]
#[case::identical_paths(path(&[1, 2, 3]), path(&[1, 2, 3]))]
#[case::relabeled_path(path(&[1, 2, 3]), path(&[1, 2, 4]))]
#[case::different_sizes(path(&[1, 2]), path(&[1, 2, 3, 4]))]
#[case::path_vs_triangle(path(&[1, 2, 3]), triangle([1, 2, 3]))]
#[case::star_vs_star(star(0, &[1, 1, 2]), star(0, &[1, 2, 2]))]
#[case::empty_vs_path(Graph::new(), path(&[1, 2]))]
fn lower_bound_never_exceeds_upper_bound(#[case] g: Graph, #[case] h: Graph) {
    init_test_logger();
    let (data, ids) = collection(vec![g, h]);
    let mut method = method_for(&data);
    let bounds = method.run_pairs(&[(ids[0], ids[1])]).unwrap();
    assert!(
        bounds[0].lower_bound <= bounds[0].upper_bound + 1e-9,
        "lower {} above upper {}",
        bounds[0].lower_bound,
        bounds[0].upper_bound
    );
}

#[rstest]
#[case::path(path(&[1, 2, 3]))]
#[case::triangle(triangle([4, 5, 6]))]
#[case::star(star(0, &[1, 2, 2, 3]))]
#[case::empty(Graph::new())]
fn self_distance_is_zero(#[case] g: Graph) {
    init_test_logger();
    let (data, ids) = collection(vec![g.clone(), g]);
    let mut method = method_for(&data);
    let bounds = method.run_pairs(&[(ids[0], ids[1])]).unwrap();
    assert_eq!(bounds[0].lower_bound, 0.0);
    assert_eq!(bounds[0].upper_bound, 0.0);
}

#[rstest]
#[case(path(&[1, 2]), path(&[1, 2, 3]))]
#[case(star(0, &[1, 1]), star(0, &[1, 2, 3]))]
#[case(triangle([1, 2, 3]), path(&[3, 2, 1]))]
fn lower_bound_is_symmetric_under_uniform_costs(#[case] g: Graph, #[case] h: Graph) {
    init_test_logger();
    let (data, ids) = collection(vec![g, h]);
    let mut method = method_for(&data);
    let bounds = method.run_pairs(&[(ids[0], ids[1]), (ids[1], ids[0])]).unwrap();
    assert!(
        (bounds[0].lower_bound - bounds[1].lower_bound).abs() < 1e-9,
        "asymmetric lower bounds: {} vs {}",
        bounds[0].lower_bound,
        bounds[1].lower_bound
    );
}

#[test]
fn one_node_extension_is_bracketed_tightly() {
    init_test_logger();
    // Appending one node and one edge to a path costs exactly 2 unit
    // operations; the branch bounds close on that value.
    let (data, ids) = collection(vec![path(&[1, 2]), path(&[1, 2, 3])]);
    let mut method = method_for(&data);
    let bounds = method.run_pairs(&[(ids[0], ids[1])]).unwrap();
    assert!((bounds[0].lower_bound - 2.0).abs() < 1e-9);
    assert!((bounds[0].upper_bound - 2.0).abs() < 1e-9);
}

#[rstest]
#[case::counting("COUNTING")]
#[case::std_sort("STD")]
fn both_sort_methods_yield_the_same_bounds(#[case] sort: &str) {
    init_test_logger();
    let (data, ids) = collection(vec![star(0, &[3, 1, 2, 1]), star(1, &[2, 2, 1])]);
    let mut reference = method_for(&data);
    let expected = reference.run_pairs(&[(ids[0], ids[1])]).unwrap();

    let mut method = method_for(&data);
    method.configure(&format!("--sort-method {sort}")).unwrap();
    let bounds = method.run_pairs(&[(ids[0], ids[1])]).unwrap();

    assert_eq!(bounds[0].lower_bound, expected[0].lower_bound);
    assert_eq!(bounds[0].upper_bound, expected[0].upper_bound);
}

#[test]
fn wildcards_relax_the_lower_bound() {
    init_test_logger();
    // Edge label 7 acts as the wildcard: the wildcard star scores against
    // any other star at most as dearly as under strict matching.
    let (data, ids) = collection(vec![star(0, &[7, 7, 1]), star(0, &[2, 3, 4])]);

    let mut strict = method_for(&data);
    let strict_bounds = strict.run_pairs(&[(ids[0], ids[1])]).unwrap();

    let mut relaxed =
        LsapeBasedMethod::new(&data, BranchUniform::with_wildcard_label(LabelId::new(7)));
    relaxed.configure("--wildcards YES").unwrap();
    let relaxed_bounds = relaxed.run_pairs(&[(ids[0], ids[1])]).unwrap();

    assert!(relaxed_bounds[0].lower_bound <= strict_bounds[0].lower_bound + 1e-9);
    assert!(relaxed_bounds[0].lower_bound >= 0.0);
}

#[test]
fn run_requires_initialized_graphs() {
    init_test_logger();
    let (data, ids) = collection(vec![path(&[1]), path(&[2])]);
    let mut method = method_for(&data);
    method.init_graph(ids[0]).unwrap();
    let err = method.run(ids[0], ids[1]).unwrap_err();
    assert!(matches!(err, GedError::UninitializedGraph(id) if id == ids[1]));
}

#[test]
fn failed_configure_keeps_previous_configuration() {
    init_test_logger();
    let (data, _) = collection(vec![path(&[1])]);
    let mut method = method_for(&data);
    method.configure("--sort-method STD --threads 4").unwrap();

    let err = method.configure("--sort-method STD --wildcards MAYBE").unwrap_err();
    assert!(matches!(err, GedError::InvalidOption { key } if key == "wildcards"));

    assert_eq!(method.model().sort_method(), SortMethod::Std);
    assert!(!method.model().wildcards_enabled());
    assert_eq!(method.num_threads(), 4);
}

#[test]
fn unknown_keys_are_rejected_by_name() {
    init_test_logger();
    let (data, _) = collection(vec![]);
    let mut method = method_for(&data);
    let err = method.configure("--no-such-option 1").unwrap_err();
    assert!(matches!(err, GedError::InvalidOption { key } if key == "no-such-option"));
    assert!(method.valid_options().contains("--sort-method"));
    assert!(method.valid_options().contains("--threads"));
}

#[test]
fn pair_results_are_positional() {
    init_test_logger();
    let (data, ids) = collection(vec![path(&[1, 2]), path(&[1, 2, 3]), Graph::new()]);
    let mut method = method_for(&data);
    method.configure("--threads 2").unwrap();

    let pairs = [(ids[0], ids[1]), (ids[2], ids[0]), (ids[1], ids[1])];
    let batched = method.run_pairs(&pairs).unwrap();

    for (bounds, &(g_id, h_id)) in batched.iter().zip(pairs.iter()) {
        let single = method.run(g_id, h_id).unwrap();
        assert_eq!(bounds.lower_bound, single.lower_bound);
        assert_eq!(bounds.upper_bound, single.upper_bound);
    }
}
