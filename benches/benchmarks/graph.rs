use criterion::{black_box, criterion_group, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use cistrings::graph::AddressingGraph;
use cistrings::{BitStruct, RandomStringGeneration};

const NORB: usize = 64;
const NIRREP: usize = 8;

pub fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rank and unrank");
    let mut rng = SmallRng::seed_from_u64(42);
    let sym: Vec<usize> = (0..NORB).map(|i| i % NIRREP).collect();

    for nelec in [2, 8, 16, 32] {
        let graph = AddressingGraph::new(NORB, nelec, &sym, NIRREP).unwrap();
        let strings: Vec<BitStruct> = (0..1000)
            .map(|_| BitStruct::generate_from_nelec(&mut rng, nelec, NORB))
            .collect();
        let addresses: Vec<(usize, usize)> = strings.iter().map(|&s| graph.rank_bits(s)).collect();
        group.bench_with_input(BenchmarkId::new("rank_bits", nelec), &strings, |b, strings| {
            b.iter(|| {
                for &s in strings.iter() {
                    black_box(graph.rank_bits(s));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("unrank_bits", nelec), &addresses, |b, addresses| {
            b.iter(|| {
                for &(h, address) in addresses.iter() {
                    black_box(graph.unrank_bits(h, address).unwrap());
                }
            })
        });
    }
    group.finish();
}

pub fn bench_graph_construction(c: &mut Criterion) {
    let sym: Vec<usize> = (0..NORB).map(|i| i % NIRREP).collect();
    c.bench_function("Graph construction 64 orbitals 16 electrons", |b| {
        b.iter(|| AddressingGraph::new(NORB, black_box(16), &sym, NIRREP).unwrap())
    });
}

criterion_group!(benches, bench_rank, bench_graph_construction,);
