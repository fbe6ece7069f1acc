use log::{debug, warn};

use crate::error::{Result, StringListError};
use crate::params::CoreOrdering;

/// Pair of correlated orbitals $(p, q)$ with $p>q$.
pub type Pair = (usize, usize);
/// Pairs of one pair symmetry.
pub type PairList = Vec<Pair>;
/// Pairs grouped by pair symmetry $h_p\oplus h_q$.
pub type NNList = Vec<PairList>;

/// Partition of the orbitals in core and correlated orbitals.
/// # Definition
/// The correlated orbitals are numbered in Pitzer order, irrep by irrep, and
/// the strings are built over them only. Core orbitals are occupied in every
/// determinant. They never enter the addresses, only the signs when
/// [CoreOrdering::Global] is used.
#[derive(Debug, Clone)]
pub struct OrbitalFrame {
    nirrep: usize,
    cmopi: Vec<usize>,
    cmopi_offset: Vec<usize>,
    orbital_sym: Vec<usize>,
    cmo_to_mo: Vec<usize>,
    fomo_to_mo: Vec<usize>,
    core_parity: Vec<bool>,
    nn_list: NNList,
    pair_offset: Vec<usize>,
}

impl OrbitalFrame {
    /// Builds the frame.
    /// # Arguments
    /// * __`cmopi`__ - The number of correlated orbitals per irrep. Its length
    /// is the number of irreps, a power of two.
    /// * __`core_mo`__ - Global index of the core orbitals.
    /// * __`cmo_to_mo`__ - Global index of each correlated orbital, strictly
    /// increasing.
    /// * __`core_ordering`__ - Position of the core orbitals in the operator
    /// ordering.
    pub fn new(cmopi: &[usize], core_mo: &[usize], cmo_to_mo: &[usize], core_ordering: CoreOrdering) -> Result<Self> {
        let nirrep = cmopi.len();
        if nirrep == 0 || !nirrep.is_power_of_two() {
            return Err(StringListError::invalid_configuration(format!(
                "The number of irreps must be a power of two, got {}.", nirrep
            )));
        }
        let ncmo: usize = cmopi.iter().sum();
        if cmo_to_mo.len() != ncmo {
            return Err(StringListError::invalid_configuration(format!(
                "Expected {} correlated orbitals in the orbital map, got {}.", ncmo, cmo_to_mo.len()
            )));
        }
        if cmo_to_mo.windows(2).any(|w| w[0] >= w[1]) {
            return Err(StringListError::invalid_configuration(
                "The correlated orbital map must be strictly increasing.",
            ));
        }
        let mut fomo_to_mo = core_mo.to_vec();
        fomo_to_mo.sort_unstable();
        if fomo_to_mo.windows(2).any(|w| w[0] == w[1]) {
            return Err(StringListError::invalid_configuration("Core orbitals are repeated."));
        }
        if let Some(mo) = fomo_to_mo.iter().find(|&&mo| cmo_to_mo.binary_search(&mo).is_ok()) {
            return Err(StringListError::invalid_configuration(format!(
                "Orbital {} is both core and correlated.", mo
            )));
        }
        if ncmo == 0 {
            warn!("The correlated space is empty.");
        }

        let mut cmopi_offset = Vec::with_capacity(nirrep);
        let mut orbital_sym = Vec::with_capacity(ncmo);
        let mut offset = 0;
        for (h, &n) in cmopi.iter().enumerate() {
            cmopi_offset.push(offset);
            orbital_sym.extend(std::iter::repeat(h).take(n));
            offset += n;
        }

        let core_parity = match core_ordering {
            CoreOrdering::Leading => vec![false; ncmo],
            CoreOrdering::Global => cmo_to_mo
                .iter()
                .map(|mo| fomo_to_mo.partition_point(|core| core < mo) % 2 == 1)
                .collect(),
        };

        let nn_list = make_pair_list(&orbital_sym, nirrep);
        let mut pair_offset = Vec::with_capacity(nirrep);
        let mut offset = 0;
        for pairs in nn_list.iter() {
            pair_offset.push(offset);
            offset += pairs.len();
        }
        debug!(
            "Orbital frame: cmopi = {:?}, core = {:?}, pairs per irrep = {:?}",
            cmopi,
            fomo_to_mo,
            nn_list.iter().map(|l| l.len()).collect::<Vec<usize>>()
        );

        Ok(OrbitalFrame {
            nirrep,
            cmopi: cmopi.to_vec(),
            cmopi_offset,
            orbital_sym,
            cmo_to_mo: cmo_to_mo.to_vec(),
            fomo_to_mo,
            core_parity,
            nn_list,
            pair_offset,
        })
    }

    pub fn nirrep(&self) -> usize {
        self.nirrep
    }

    /// Number of correlated orbitals.
    pub fn ncmo(&self) -> usize {
        self.orbital_sym.len()
    }

    pub fn cmopi(&self) -> &[usize] {
        &self.cmopi
    }

    pub fn cmopi_offset(&self) -> &[usize] {
        &self.cmopi_offset
    }

    /// Irrep of each correlated orbital.
    pub fn orbital_sym(&self) -> &[usize] {
        &self.orbital_sym
    }

    pub fn cmo_to_mo(&self) -> &[usize] {
        &self.cmo_to_mo
    }

    /// Sorted global index of the core orbitals.
    pub fn fomo_to_mo(&self) -> &[usize] {
        &self.fomo_to_mo
    }

    /// Whether an odd number of core orbitals precedes each correlated orbital
    /// in the operator ordering.
    pub fn core_parity(&self) -> &[bool] {
        &self.core_parity
    }

    pub fn nn_list(&self) -> &NNList {
        &self.nn_list
    }

    /// Number of pairs of pair symmetry `h`.
    pub fn pairpi(&self, h: usize) -> usize {
        self.nn_list.get(h).map(Vec::len).unwrap_or(0)
    }

    pub fn pair_offset(&self) -> &[usize] {
        &self.pair_offset
    }

    /// The `n`-th pair of pair symmetry `h`.
    pub fn pair(&self, h: usize, n: usize) -> Result<Pair> {
        self.nn_list
            .get(h)
            .and_then(|pairs| pairs.get(n))
            .copied()
            .ok_or_else(|| StringListError::out_of_range(format!("No pair {} in pair symmetry {}.", n, h)))
    }
}

/// Groups the pairs $p>q$ by pair symmetry, ordered by $p$ then $q$.
fn make_pair_list(orbital_sym: &[usize], nirrep: usize) -> NNList {
    let mut nn_list: NNList = vec![Vec::new(); nirrep];
    for p in 0..orbital_sym.len() {
        for q in 0..p {
            nn_list[orbital_sym[p] ^ orbital_sym[q]].push((p, q));
        }
    }
    nn_list
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_offsets_and_symmetry() {
        let frame = OrbitalFrame::new(&[2, 0, 1, 3], &[], &[0, 1, 2, 3, 4, 5], CoreOrdering::Leading).unwrap();
        assert_eq!(frame.ncmo(), 6);
        assert_eq!(frame.cmopi_offset(), &[0, 2, 2, 3]);
        assert_eq!(frame.orbital_sym(), &[0, 0, 2, 3, 3, 3]);
    }

    #[test]
    fn test_pair_list_covers_all_pairs() {
        let frame = OrbitalFrame::new(&[2, 1, 1, 1], &[], &[1, 2, 3, 4, 5], CoreOrdering::Leading).unwrap();
        let total: usize = (0..4).map(|h| frame.pairpi(h)).sum();
        assert_eq!(total, 10);
        for h in 0..4 {
            for n in 0..frame.pairpi(h) {
                let (p, q) = frame.pair(h, n).unwrap();
                assert!(p > q);
                assert_eq!(frame.orbital_sym()[p] ^ frame.orbital_sym()[q], h);
            }
        }
        assert_eq!(frame.pair(0, 0).unwrap(), (1, 0));
        assert!(matches!(frame.pair(0, 100), Err(StringListError::OutOfRange { .. })));
    }

    #[test]
    fn test_core_parity_global() {
        // Core orbitals 0 and 3, correlated 1, 2, 4, 5.
        let frame = OrbitalFrame::new(&[4], &[3, 0], &[1, 2, 4, 5], CoreOrdering::Global).unwrap();
        assert_eq!(frame.fomo_to_mo(), &[0, 3]);
        assert_eq!(frame.core_parity(), &[true, true, false, false]);
        let frame = OrbitalFrame::new(&[4], &[3, 0], &[1, 2, 4, 5], CoreOrdering::Leading).unwrap();
        assert_eq!(frame.core_parity(), &[false, false, false, false]);
    }

    #[test]
    fn test_invalid_frames() {
        let overlap = OrbitalFrame::new(&[2], &[1], &[1, 2], CoreOrdering::Leading);
        assert!(matches!(overlap, Err(StringListError::InvalidConfiguration { .. })));
        let unsorted = OrbitalFrame::new(&[2], &[], &[2, 1], CoreOrdering::Leading);
        assert!(matches!(unsorted, Err(StringListError::InvalidConfiguration { .. })));
        let length = OrbitalFrame::new(&[2, 1], &[], &[0, 1], CoreOrdering::Leading);
        assert!(matches!(length, Err(StringListError::InvalidConfiguration { .. })));
        let nirrep = OrbitalFrame::new(&[1, 1, 1], &[], &[0, 1, 2], CoreOrdering::Leading);
        assert!(matches!(nirrep, Err(StringListError::InvalidConfiguration { .. })));
        let repeated = OrbitalFrame::new(&[1], &[0, 0], &[1], CoreOrdering::Leading);
        assert!(matches!(repeated, Err(StringListError::InvalidConfiguration { .. })));
    }
}
