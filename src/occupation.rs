extern crate num;

use num::PrimInt;
use rand::Rng;

/// Number of bits in an occupation bitstring. This is the maximum number of
/// correlated orbitals a [BitStruct] can hold.
pub const NBITS: usize = 128;
/// Occupation bit pattern of a string. Orbital $i$ is bit $i$ from the left.
pub type BitStruct = u128;

/// Uparrow character unicode
pub const UPARROW: char = match std::char::from_u32(0x00002191) {
    Some(v) => v,
    None => panic!("Invalid unicode character uparrow"),
};
/// Downarrow character unicode
pub const DOWNARROW: char = match std::char::from_u32(0x00002193) {
    Some(v) => v,
    None => panic!("Invalid unicode character downarrow"),
};

/// Spin species of a string. The alpha strings are [Spin::Up], the beta
/// strings are [Spin::Down].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Up,
    Down,
}

impl std::fmt::Display for Spin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Spin::Up => write!(f, "{}", UPARROW),
            Spin::Down => write!(f, "{}", DOWNARROW),
        }
    }
}

/// Abstraction layer for common bitwise operations.
/// # Purpose
/// The Bitops trait brings in scope an abstraction layer over the bitwise
/// operations needed on an occupation string. Indexing is from the left, so
/// that the orbital order matches the reading order of the bitstring.
pub trait BitOps:
    std::ops::BitAnd<Output = Self> +
    Sized +
    std::ops::BitXorAssign +
    std::ops::BitXor<Output = Self> +
    Copy +
    std::ops::Not<Output = Self> +
    std::cmp::PartialEq
{
    /// Provides the number of leading zeros in the bitstring. This gives the
    /// position of the first set bit in the string. This method is consistent
    /// with [BitOps::check] and [BitOps::set].
    fn leading_zeros(self) -> u32;
    /// Provides the number of set bits in the bitstirng. This gives the number
    /// of electrons in the bitstring.
    fn count_ones(self) -> u32;
    /// Keep only the first `by` bits, counted from the left. Everything past
    /// them is set to $0$.
    fn mask_bits(&mut self, by: usize);
    /// Flip the $i$-th bit of the string, indexed from the left. This methods
    /// is consistent with [BitOps::check] and [BitOps::leading_zeros].
    fn set(&mut self, n: usize);
    /// Returns the truth value at index $i$, from the left. This methods is
    /// consistent with [BitOps::set] and [BitOps::leading_zeros].
    fn check(&self, i: usize) -> bool;
    /// Number of set bits strictly before index $i$. This is the number of
    /// anticommutations needed to move an operator on orbital $i$ to the
    /// front of the string.
    #[inline(always)]
    fn count_before(self, i: usize) -> u32 {
        let mut masked = self;
        masked.mask_bits(i);
        masked.count_ones()
    }
}

/// BitWise operations for all primitive ints. All methods are inlined and use
/// built-in  methods. [BitOps::set] and [BitOps::check] are implemented by
/// shifting a bitmask.
impl<I> BitOps for I
    where I: PrimInt + std::ops::BitXorAssign + std::ops::BitAndAssign + From<u8>
{
    #[inline(always)]
    fn leading_zeros(self) -> u32 {
        PrimInt::leading_zeros(self)
    }
    #[inline(always)]
    fn count_ones(self) -> u32 {
        PrimInt::count_ones(self)
    }
    #[inline(always)]
    fn mask_bits(&mut self, by: usize) {
        let n_bits: usize = std::mem::size_of::<I>() * u8::BITS as usize;
        if by == 0 {
            *self = I::zero();
            return;
        }
        if by >= n_bits {return;}
        *self &= I::max_value() << (n_bits - by);
    }
    #[inline(always)]
    fn set(&mut self, n: usize) {
        let n_bits: usize = std::mem::size_of::<I>() * u8::BITS as usize;
        if n >= n_bits {return;}
        let one: I = 1.into();
        *self ^= one << (n_bits - 1 - n);
    }
    #[inline(always)]
    fn check(&self, i: usize) -> bool {
        let n_bits: usize = std::mem::size_of::<I>() * u8::BITS as usize;
        if i >= n_bits {return false;}
        let one: I = 1.into();
        !(*self & (one << (n_bits - 1 - i)) == I::zero())
    }
}

/// Builds the bit pattern of a list of occupied orbitals. Indices past
/// [NBITS] are ignored.
pub fn bits_from_indices(indices: &[usize]) -> BitStruct {
    let mut bits: BitStruct = 0;
    for &i in indices.iter() {
        bits.set(i);
    }
    bits
}

/// Sorted list of the occupied orbitals of a bit pattern.
/// # Example
/// ```rust
/// use cistrings::{bits_from_indices, indices_from_bits};
/// let bits = bits_from_indices(&[4, 0, 2]);
/// assert_eq!(indices_from_bits(bits), vec![0, 2, 4]);
/// ```
pub fn indices_from_bits(bits: BitStruct) -> Vec<usize> {
    let mut out = Vec::with_capacity(bits.count_ones() as usize);
    let mut remaining = bits;
    let mut i = remaining.leading_zeros() as usize;
    while i < NBITS {
        out.push(i);
        remaining.set(i);
        i = remaining.leading_zeros() as usize;
    }
    out
}

/// Random generation of occupation strings with a fixed number of electrons.
pub trait RandomStringGeneration {
    /// Generate a uniformly random string of `nelec` electrons among the
    /// first `norb` orbitals.
    fn generate_from_nelec<R: Rng + ?Sized>(rng: &mut R, nelec: usize, norb: usize) -> Self;
}

impl RandomStringGeneration for BitStruct {
    fn generate_from_nelec<R: Rng + ?Sized>(rng: &mut R, nelec: usize, norb: usize) -> Self {
        let nelec = usize::min(nelec, norb);
        let mut orbitals: Vec<usize> = (0..norb).collect();
        // Partial Fisher-Yates, the first nelec entries are the occupied ones.
        for i in 0..nelec {
            let j = rng.gen_range(i..norb);
            orbitals.swap(i, j);
        }
        bits_from_indices(&orbitals[..nelec])
    }
}
