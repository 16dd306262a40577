use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tripgraph::prelude::*;

/// Random connected graph: a spanning chain plus random extra edges.
fn city_network(nodes: usize, extra_edges: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(42);
    let labels: Vec<String> = (0..nodes).map(|i| format!("city-{:04}", i)).collect();

    let mut edges: Vec<Edge> = (1..nodes)
        .map(|i| Edge::new(labels[i - 1].clone(), labels[i].clone(), rng.random_range(1.0..12.0)))
        .collect();
    for _ in 0..extra_edges {
        let a = rng.random_range(0..nodes);
        let b = rng.random_range(0..nodes);
        edges.push(Edge::new(labels[a].clone(), labels[b].clone(), rng.random_range(0.5..24.0)));
    }

    Graph::build(labels.into_iter().map(Node::new).collect(), edges, false)
        .expect("generated graph is valid")
}

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");

    for (nodes, edges) in [(50, 200), (200, 2000), (1000, 10000)] {
        let graph = city_network(nodes, edges);
        let from = graph.label(0).to_string();
        let to = graph.label(nodes - 1).to_string();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}n_{}e", nodes, edges)),
            &graph,
            |b, graph| b.iter(|| shortest_path(graph, black_box(&from), black_box(&to))),
        );
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let graph = city_network(200, 2000);
    let description = serde_json::json!({
        "nodes": graph.labels().collect::<Vec<_>>(),
        "edges": graph.edges(),
    })
    .to_string();

    c.bench_function("load_200n_2000e", |b| {
        b.iter(|| Graph::from_json_str(black_box(&description), LoadOptions::default()))
    });
}

criterion_group!(benches, bench_shortest_path, bench_load);
criterion_main!(benches);
