// Integration tests for tripgraph
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::Arc;
use tripgraph::prelude::*;
use tripgraph::{InsightSource, LoadStatus, StaticInsights};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/graph_data.json")
}

fn scenario_graph(directed: bool) -> Graph {
    Graph::build(
        vec![Node::new("A"), Node::new("B"), Node::new("C")],
        vec![Edge::new("A", "B", 2.0), Edge::new("B", "C", 3.0), Edge::new("A", "C", 10.0)],
        directed,
    )
    .unwrap()
}

#[test]
fn test_scenario_weighted_detour() {
    for directed in [false, true] {
        let route = shortest_path(&scenario_graph(directed), "A", "C").unwrap();
        assert_eq!(route.path, vec!["A", "B", "C"]);
        assert_eq!(route.total_weight, 5.0);
    }
}

#[test]
fn test_scenario_no_edges() {
    let graph = Graph::build(vec![Node::new("A"), Node::new("B")], vec![], false).unwrap();
    assert!(matches!(shortest_path(&graph, "A", "B"), Err(Error::NoPath { .. })));
}

#[test]
fn test_scenario_undeclared_node_never_partial() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    std::fs::write(
        &path,
        r#"{"nodes": ["A", "B"], "edges": [
            {"source": "A", "target": "B", "weight": 1},
            {"source": "B", "target": "Ghost", "weight": 1}
        ]}"#,
    )
    .unwrap();

    assert!(GraphStore::open_strict(&path, LoadOptions::default()).is_err());

    let store = GraphStore::open(&path, LoadOptions::default());
    assert!(store.status().is_degraded());
    assert!(store.graph().is_empty());
}

#[test]
fn test_sample_graph_loads() {
    let store = GraphStore::open_strict(sample_path(), LoadOptions::default()).unwrap();
    assert_eq!(
        store.status(),
        &LoadStatus::Loaded { nodes: 19, edges: 26 }
    );

    let graph = store.graph();
    let route = graph
        .shortest_path("Bengaluru, Karnataka, India", "Hyderabad, Telangana, India")
        .unwrap();
    assert_eq!(
        route.path,
        vec![
            "Bengaluru, Karnataka, India",
            "Chitradurga, Karnataka, India",
            "Ballari, Karnataka, India",
            "Kurnool, Andhra Pradesh, India",
            "Hyderabad, Telangana, India",
        ]
    );
    assert_eq!(route.total_weight, 14.0);
    assert_eq!(
        graph.node("Bengaluru, Karnataka, India").unwrap().attributes["state"],
        "Karnataka"
    );
}

#[test]
fn test_sample_cities_have_insights() {
    let store = GraphStore::open_strict(sample_path(), LoadOptions::default()).unwrap();
    let insights = StaticInsights::builtin().unwrap();
    for label in store.graph().labels() {
        assert!(insights.lookup(label).is_some(), "no insight for {}", label);
    }
}

/// All-pairs reference distances by Floyd-Warshall.
fn reference_distances(graph: &Graph) -> Vec<Vec<f64>> {
    let n = graph.node_count();
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0.0;
        for neighbor in graph.neighbors(i) {
            row[neighbor.node] = row[neighbor.node].min(neighbor.weight);
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let via = dist[i][k] + dist[k][j];
                if via < dist[i][j] {
                    dist[i][j] = via;
                }
            }
        }
    }
    dist
}

fn random_graph(rng: &mut StdRng, directed: bool) -> Graph {
    let n = rng.random_range(2..12);
    let labels: Vec<String> = (0..n).map(|i| format!("city-{:02}", i)).collect();
    let edge_count = rng.random_range(0..n * 2);
    let edges = (0..edge_count)
        .map(|_| {
            let a = rng.random_range(0..n);
            let b = rng.random_range(0..n);
            let w = rng.random_range(0..20) as f64;
            Edge::new(labels[a].clone(), labels[b].clone(), w)
        })
        .collect();
    Graph::build(labels.into_iter().map(Node::new).collect(), edges, directed).unwrap()
}

#[test]
fn test_random_graphs_match_reference() {
    let mut rng = StdRng::seed_from_u64(7);

    for round in 0..200 {
        let graph = random_graph(&mut rng, round % 2 == 0);
        let reference = reference_distances(&graph);
        let labels: Vec<String> = graph.labels().map(str::to_string).collect();

        for (i, from) in labels.iter().enumerate() {
            for (j, to) in labels.iter().enumerate() {
                match shortest_path(&graph, from, to) {
                    Ok(route) => {
                        assert_eq!(route.total_weight, reference[i][j]);
                        assert_eq!(route.path.first(), Some(from));
                        assert_eq!(route.path.last(), Some(to));

                        let summed: f64 = route
                            .path
                            .windows(2)
                            .map(|pair| graph.edge_weight(&pair[0], &pair[1]).unwrap())
                            .sum();
                        assert_eq!(summed, route.total_weight);

                        assert_eq!(shortest_path(&graph, from, to).unwrap(), route);
                    }
                    Err(Error::NoPath { .. }) => assert!(reference[i][j].is_infinite()),
                    Err(e) => panic!("unexpected error: {}", e),
                }
            }
        }
    }
}

#[test]
fn test_unknown_endpoint_names_label() {
    let graph = scenario_graph(false);
    let err = shortest_path(&graph, "A", "Nowhere").unwrap_err();
    assert!(err.to_string().contains("unknown destination 'Nowhere'"));
}

#[test]
fn test_concurrent_queries_share_graph() {
    let store = GraphStore::open_strict(sample_path(), LoadOptions::default()).unwrap();
    let graph = store.graph();
    let expected = graph
        .shortest_path("Mysuru, Karnataka, India", "Mumbai, Maharashtra, India")
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let graph = Arc::clone(&graph);
            std::thread::spawn(move || {
                (0..50)
                    .map(|_| {
                        graph
                            .shortest_path("Mysuru, Karnataka, India", "Mumbai, Maharashtra, India")
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for route in handle.join().unwrap() {
            assert_eq!(route, expected);
        }
    }
}

#[test]
fn test_query_service_over_store() {
    let store = GraphStore::open(sample_path(), LoadOptions::default());
    let service = QueryService::new(store.graph());
    let cities = service.cities();
    let mut sorted = cities.clone();
    sorted.sort();
    assert_eq!(cities, sorted);
    assert_eq!(cities.len(), 19);
}
