use log::{debug, trace};

use crate::error::{Result, StringListError};
use crate::{bits_from_indices, indices_from_bits, BitOps, BitStruct, NBITS};

/// Dense, symmetry-aware addressing of occupation strings.
/// # Definition
/// The graph is built for $n$ orbitals and $k$ electrons. The lattice weight
/// $W_{ijh}$ counts the ways of choosing $j$ occupied orbitals among the
/// orbitals $i,\dots,n-1$ such that the product of their irreps is $h$:
///
/// $$
/// W_{ijh}=W_{i+1,j,h}+W_{i+1,j-1,h\oplus s_i},\qquad
/// W_{n,0,h}=\delta_{h0}
/// $$
///
/// The address of a string in its symmetry block is its position in the
/// lexicographic order of the sorted orbital lists of that block.
/// # Usage
/// ```rust
/// use cistrings::graph::AddressingGraph;
/// let graph = AddressingGraph::new(4, 2, &[0, 0, 0, 0], 1).unwrap();
/// assert_eq!(graph.block_size(0), 6);
/// assert_eq!(graph.rank(&[0, 1]).unwrap(), (0, 0));
/// assert_eq!(graph.unrank(0, 5).unwrap(), vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct AddressingGraph {
    nbits: usize,
    nones: usize,
    nirrep: usize,
    orbital_sym: Vec<usize>,
    weights: Vec<usize>,
    strpi: Vec<usize>,
}

impl AddressingGraph {
    /// Builds the graph.
    /// # Arguments
    /// * __`nbits`__ - The number of orbitals $n$.
    /// * __`nones`__ - The number of electrons $k$.
    /// * __`orbital_sym`__ - The irrep of each orbital.
    /// * __`nirrep`__ - The number of irreps, a power of two.
    /// # Errors
    /// [StringListError::InvalidConfiguration] if $k>n$, $n$ is larger than
    /// [NBITS], an irrep is out of range or the number of strings overflows.
    pub fn new(nbits: usize, nones: usize, orbital_sym: &[usize], nirrep: usize) -> Result<Self> {
        if nirrep == 0 || !nirrep.is_power_of_two() {
            return Err(StringListError::invalid_configuration(format!(
                "The number of irreps must be a power of two, got {}.", nirrep
            )));
        }
        if nbits > NBITS {
            return Err(StringListError::invalid_configuration(format!(
                "At most {} orbitals are supported, got {}.", NBITS, nbits
            )));
        }
        if nones > nbits {
            return Err(StringListError::invalid_configuration(format!(
                "Cannot place {} electrons in {} orbitals.", nones, nbits
            )));
        }
        if orbital_sym.len() != nbits {
            return Err(StringListError::invalid_configuration(format!(
                "Expected {} orbital irreps, got {}.", nbits, orbital_sym.len()
            )));
        }
        if let Some(h) = orbital_sym.iter().find(|&&h| h >= nirrep) {
            return Err(StringListError::invalid_configuration(format!(
                "Orbital irrep {} is not below the number of irreps {}.", h, nirrep
            )));
        }

        let mut graph = AddressingGraph {
            nbits,
            nones,
            nirrep,
            orbital_sym: orbital_sym.to_vec(),
            weights: vec![0; (nbits + 1) * (nones + 1) * nirrep],
            strpi: vec![0; nirrep],
        };
        graph.build_weights()?;
        for h in 0..nirrep {
            graph.strpi[h] = graph.weight(0, nones, h);
        }
        if graph.strpi.iter().try_fold(0usize, |acc, &n| acc.checked_add(n)).is_none() {
            return Err(StringListError::invalid_configuration(format!(
                "The total number of strings for n = {}, k = {} overflows.", nbits, nones
            )));
        }
        debug!("Addressing graph n = {}, k = {}, strings per irrep = {:?}", nbits, nones, graph.strpi);
        Ok(graph)
    }

    fn build_weights(&mut self) -> Result<()> {
        let n = self.nbits;
        let k = self.nones;
        let last = self.index(n, 0, 0);
        self.weights[last] = 1;
        for i in (0..n).rev() {
            let si = self.orbital_sym[i];
            for j in 0..=k {
                for h in 0..self.nirrep {
                    let mut count = self.weight(i + 1, j, h);
                    if j > 0 {
                        count = count.checked_add(self.weight(i + 1, j - 1, h ^ si)).ok_or_else(|| {
                            StringListError::invalid_configuration(format!(
                                "The number of strings for n = {}, k = {} overflows.", n, k
                            ))
                        })?;
                    }
                    let idx = self.index(i, j, h);
                    self.weights[idx] = count;
                }
            }
        }
        Ok(())
    }

    #[inline(always)]
    fn index(&self, i: usize, j: usize, h: usize) -> usize {
        (i * (self.nones + 1) + j) * self.nirrep + h
    }

    #[inline(always)]
    fn weight(&self, i: usize, j: usize, h: usize) -> usize {
        self.weights[self.index(i, j, h)]
    }

    /// Number of orbitals.
    pub fn nbits(&self) -> usize {
        self.nbits
    }

    /// Number of electrons.
    pub fn nones(&self) -> usize {
        self.nones
    }

    pub fn nirrep(&self) -> usize {
        self.nirrep
    }

    pub fn orbital_sym(&self) -> &[usize] {
        &self.orbital_sym
    }

    /// Number of strings of irrep `h`. Irreps out of range hold no string.
    pub fn block_size(&self, h: usize) -> usize {
        self.strpi.get(h).copied().unwrap_or(0)
    }

    /// Number of strings per irrep.
    pub fn strpi(&self) -> &[usize] {
        &self.strpi
    }

    /// Total number of strings, $\binom{n}{k}$.
    pub fn nstr(&self) -> usize {
        self.strpi.iter().sum()
    }

    /// Irrep of a bit pattern.
    pub fn sym_bits(&self, bits: BitStruct) -> usize {
        let mut h = 0;
        let mut remaining = bits;
        let mut i = remaining.leading_zeros() as usize;
        while i < self.nbits {
            h ^= self.orbital_sym[i];
            remaining.set(i);
            i = remaining.leading_zeros() as usize;
        }
        h
    }

    /// Irrep of a list of orbitals.
    pub fn sym(&self, indices: &[usize]) -> Result<usize> {
        self.validate(indices)?;
        Ok(self.sym_bits(bits_from_indices(indices)))
    }

    /// Address of a sorted list of occupied orbitals.
    /// # Returns
    /// * __`(h, address)`__ - The irrep of the string and its rank in that
    /// irrep.
    /// # Errors
    /// [StringListError::InvalidString] if the list is not strictly increasing,
    /// does not hold $k$ orbitals, or holds an orbital past $n$.
    pub fn rank(&self, indices: &[usize]) -> Result<(usize, usize)> {
        self.validate(indices)?;
        Ok(self.rank_bits(bits_from_indices(indices)))
    }

    /// Address of a bit pattern. The pattern must hold $k$ electrons within
    /// the first $n$ orbitals, this is not checked.
    #[inline]
    pub fn rank_bits(&self, bits: BitStruct) -> (usize, usize) {
        let h = self.sym_bits(bits);
        let mut h_rem = h;
        let mut placed = 0;
        let mut address = 0;
        for x in 0..self.nbits {
            if placed == self.nones {
                break;
            }
            let sx = self.orbital_sym[x];
            if bits.check(x) {
                h_rem ^= sx;
                placed += 1;
            } else {
                address += self.weight(x + 1, self.nones - placed - 1, h_rem ^ sx);
            }
        }
        (h, address)
    }

    /// Checked version of [AddressingGraph::rank_bits].
    pub fn rank_bits_checked(&self, bits: BitStruct) -> Result<(usize, usize)> {
        let mut outside = bits;
        outside.mask_bits(self.nbits);
        if outside != bits {
            return Err(StringListError::invalid_string(format!(
                "Bit pattern {:#x} has electrons past orbital {}.", bits, self.nbits
            )));
        }
        if bits.count_ones() as usize != self.nones {
            return Err(StringListError::invalid_string(format!(
                "Bit pattern {:#x} does not hold {} electrons.", bits, self.nones
            )));
        }
        Ok(self.rank_bits(bits))
    }

    /// Sorted list of occupied orbitals of the string at `address` in irrep `h`.
    /// # Errors
    /// [StringListError::OutOfRange] if `h` is not an irrep or `address` is not
    /// below [AddressingGraph::block_size].
    pub fn unrank(&self, h: usize, address: usize) -> Result<Vec<usize>> {
        Ok(indices_from_bits(self.unrank_bits(h, address)?))
    }

    /// Bit pattern of the string at `address` in irrep `h`.
    pub fn unrank_bits(&self, h: usize, address: usize) -> Result<BitStruct> {
        if h >= self.nirrep {
            return Err(StringListError::out_of_range(format!(
                "Irrep {} is not below {}.", h, self.nirrep
            )));
        }
        if address >= self.strpi[h] {
            return Err(StringListError::out_of_range(format!(
                "Address {} is not below the block size {} of irrep {}.", address, self.strpi[h], h
            )));
        }
        Ok(self.decode(h, address))
    }

    fn decode(&self, h: usize, address: usize) -> BitStruct {
        let mut bits: BitStruct = 0;
        let mut h_rem = h;
        let mut placed = 0;
        let mut remaining = address;
        for x in 0..self.nbits {
            if placed == self.nones {
                break;
            }
            let sx = self.orbital_sym[x];
            let occupied_first = self.weight(x + 1, self.nones - placed - 1, h_rem ^ sx);
            if remaining < occupied_first {
                bits.set(x);
                h_rem ^= sx;
                placed += 1;
            } else {
                remaining -= occupied_first;
            }
        }
        trace!("Decoded address {} of irrep {} to {:#x}", address, h, bits);
        bits
    }

    /// Strings of irrep `h` in address order, as sorted orbital lists.
    pub fn strings(&self, h: usize) -> impl Iterator<Item = Vec<usize>> + '_ {
        self.strings_bits(h).map(indices_from_bits)
    }

    /// Strings of irrep `h` in address order, as bit patterns.
    pub fn strings_bits(&self, h: usize) -> impl Iterator<Item = BitStruct> + '_ {
        (0..self.block_size(h)).map(move |address| self.decode(h, address))
    }

    fn validate(&self, indices: &[usize]) -> Result<()> {
        if indices.len() != self.nones {
            return Err(StringListError::invalid_string(format!(
                "Expected {} orbitals, got {:?}.", self.nones, indices
            )));
        }
        if indices.windows(2).any(|w| w[0] >= w[1]) {
            return Err(StringListError::invalid_string(format!(
                "Orbitals {:?} are not strictly increasing.", indices
            )));
        }
        if indices.iter().any(|&i| i >= self.nbits) {
            return Err(StringListError::invalid_string(format!(
                "Orbitals {:?} are not all below {}.", indices, self.nbits
            )));
        }
        Ok(())
    }
}
