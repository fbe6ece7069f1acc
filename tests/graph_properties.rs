use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cistrings::graph::AddressingGraph;
use cistrings::{indices_from_bits, BitStruct, RandomStringGeneration, StringListError};

const SEED: u64 = 42;

fn binomial(n: usize, k: usize) -> usize {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

#[test]
fn test_block_sizes_sum_to_binomial() {
    let mut rng = SmallRng::seed_from_u64(SEED);
    for _ in 0..50 {
        let nirrep = 1 << rng.gen_range(0..4);
        let n = rng.gen_range(0..20);
        let k = rng.gen_range(0..=n);
        let sym: Vec<usize> = (0..n).map(|_| rng.gen_range(0..nirrep)).collect();
        let graph = AddressingGraph::new(n, k, &sym, nirrep).unwrap();
        assert_eq!(graph.nstr(), binomial(n, k));
        assert_eq!(graph.strpi().len(), nirrep);
    }
}

#[test]
fn test_rank_unrank_random_strings() {
    let mut rng = SmallRng::seed_from_u64(SEED);
    let n = 40;
    let sym: Vec<usize> = (0..n).map(|i| (i * 7 + 3) % 8).collect();
    for k in [1, 5, 11] {
        let graph = AddressingGraph::new(n, k, &sym, 8).unwrap();
        for _ in 0..500 {
            let bits = BitStruct::generate_from_nelec(&mut rng, k, n);
            let indices = indices_from_bits(bits);
            let (h, address) = graph.rank(&indices).unwrap();
            assert_eq!(graph.rank_bits(bits), (h, address));
            assert_eq!(graph.sym(&indices).unwrap(), h);
            assert!(address < graph.block_size(h));
            assert_eq!(graph.unrank(h, address).unwrap(), indices);
        }
    }
}

#[test]
fn test_every_address_is_dense_and_ordered() {
    let sym = [0, 1, 1, 0, 2, 3, 2, 3, 1];
    let graph = AddressingGraph::new(9, 4, &sym, 4).unwrap();
    for h in 0..4 {
        let strings: Vec<Vec<usize>> = graph.strings(h).collect();
        assert_eq!(strings.len(), graph.block_size(h));
        for (address, string) in strings.iter().enumerate() {
            assert_eq!(graph.rank(string).unwrap(), (h, address));
        }
        assert!(strings.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_largest_orbital_count() {
    let sym = vec![0; 128];
    let graph = AddressingGraph::new(128, 3, &sym, 1).unwrap();
    assert_eq!(graph.nstr(), binomial(128, 3));
    let last = graph.unrank(0, graph.nstr() - 1).unwrap();
    assert_eq!(last, vec![125, 126, 127]);
    assert!(matches!(
        AddressingGraph::new(129, 3, &vec![0; 129], 1),
        Err(StringListError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_invalid_strings() {
    let graph = AddressingGraph::new(6, 3, &[0; 6], 1).unwrap();
    for bad in [vec![0, 1], vec![0, 1, 2, 3], vec![2, 1, 0], vec![1, 1, 2], vec![0, 1, 6]] {
        assert!(matches!(graph.rank(&bad), Err(StringListError::InvalidString { .. })));
    }
    assert!(matches!(graph.rank_bits_checked(0b111), Err(StringListError::InvalidString { .. })));
}

#[test]
fn test_total_string_count_overflow() {
    // Every block fits in a usize, their sum C(68, 34) does not.
    let sym: Vec<usize> = (0..68).map(|i| i % 8).collect();
    assert!(matches!(
        AddressingGraph::new(68, 34, &sym, 8),
        Err(StringListError::InvalidConfiguration { .. })
    ));
    let graph = AddressingGraph::new(64, 32, &sym[..64], 8).unwrap();
    assert_eq!(graph.nstr(), 1832624140942590534);
}
