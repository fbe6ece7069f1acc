use criterion::{criterion_group, BenchmarkId, Criterion};
use cistrings::{RequiredLists, StringLists, StringListsConfig};

const MAX_ORBITALS: usize = 12;

pub fn bench_list_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Substitution lists construction");
    group.sample_size(10);

    for n in (4..=MAX_ORBITALS).step_by(2) {
        // Two irreps, half the orbitals each.
        let cmopi = [n / 2, n - n / 2];
        let cmo_to_mo: Vec<usize> = (0..n).collect();
        for required_lists in [RequiredLists::OneSubstitution, RequiredLists::AllSubstitutions] {
            let name = format!("{:?}", required_lists);
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, &n| {
                b.iter(|| {
                    StringLists::new(
                        StringListsConfig::new(required_lists),
                        &cmopi,
                        &[],
                        &cmo_to_mo,
                        n / 2,
                        n / 2,
                    )
                    .unwrap()
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_list_construction,);
