use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use roadnet_core::metrics::{efficiency, estimate_load, remoteness};
use roadnet_core::path::{shortest_path_dag, shortest_paths};
use roadnet_core::synthetic::random_regular_network;
use roadnet_core::{GraphProvider, RoadNetwork};

const SIZES: [usize; 3] = [1_000, 10_000, 40_000];

fn network(nodes: usize) -> RoadNetwork {
    let mut rng = StdRng::seed_from_u64(0x5EED_u64 + nodes as u64);
    random_regular_network(nodes, 4, &mut rng).expect("synthetic network")
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.sample_size(20);

    for nodes in SIZES {
        let net = network(nodes);
        group.throughput(Throughput::Elements(net.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("shortest_paths", nodes), &net, |b, net| {
            b.iter(|| black_box(shortest_paths(net, black_box(0))))
        });
        group.bench_with_input(BenchmarkId::new("shortest_path_dag", nodes), &net, |b, net| {
            b.iter(|| black_box(shortest_path_dag(net, black_box(0))))
        });
    }

    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    group.sample_size(10);

    for nodes in SIZES {
        let net = network(nodes);

        group.bench_with_input(BenchmarkId::new("load_k10", nodes), &net, |b, net| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| black_box(estimate_load(net, "road-0", 10, &mut rng)))
        });
        group.bench_with_input(BenchmarkId::new("efficiency_k20", nodes), &net, |b, net| {
            let mut rng = StdRng::seed_from_u64(2);
            b.iter(|| black_box(efficiency(net, Some(20), &mut rng)))
        });
        group.bench_with_input(BenchmarkId::new("remoteness", nodes), &net, |b, net| {
            b.iter(|| black_box(remoteness(net, black_box(nodes / 2))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engine, bench_metrics);
criterion_main!(benches);
