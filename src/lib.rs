//! Addressing and substitution lists of spin strings for configuration
//! interaction.
//!
//! A determinant is a product of an alpha and a beta string. A string is a
//! set of $k$ occupied orbitals among the $n$ correlated orbitals, stored as a
//! [BitStruct]. The [graph::AddressingGraph] gives every string of a fixed
//! $(n, k)$ a dense address inside its symmetry block, and the
//! [lists::StringLists] engine enumerates the strings connected by one and two
//! body excitation operators, with their fermionic sign.

/// Orbital space input file parsing util.
/// # Subfiles
/// * __`orbital_space.csv`__ - Classification of the molecular orbitals. In
/// csv format, 3 columns `mo,irrep,kind`, where `kind` is one of `core`,
/// `active` or `frozen_virtual`.
pub mod parse;

// Have the bitstring layer at the root.
include!("occupation.rs");

pub mod error;

/// Construction parameters of the engine.
pub mod params;

/// Core and correlated orbitals, and the orbital pair lists.
/// # Definition
/// The orbital pairs are grouped by pair symmetry,
///
/// $$
/// h_{pq}=h_p\oplus h_q,\quad p>q,
/// $$
///
/// where $\oplus$ is the bitwise xor of the irrep labels. This is the direct
/// product of irreps in abelian point groups.
pub mod orbitals;

/// Dense addressing of the strings.
/// # Definition
/// The graph stores the number of ways $W_{i,j}^h$ to place $j$ electrons in
/// the orbitals $i,\dots,n-1$ such that the xor of their irreps is $h$. With
/// $W_{n,0}^0=1$,
///
/// $$
/// W_{i,j}^h=W_{i+1,j}^h+W_{i+1,j-1}^{h\oplus h_i}.
/// $$
///
/// The address of a string in its symmetry block is the sum of the weights of
/// the branches that come before it, so that strings are ranked in
/// lexicographic order of their sorted orbital lists.
pub mod graph;

/// Second quantized operators on strings.
/// # Definition
/// Applying an elementary operator on orbital $x$ to a string gives the
/// Jordan-Wigner sign
///
/// $$
/// a^\dagger_x\lvert I\rangle=(-1)^{\sum_{y<x}n_y}\lvert I\cup\{x\}\rangle
/// $$
///
/// and similarly for $a_x$.
pub mod operators;

/// Substitution lists engine.
/// # Usage
/// Build a [lists::StringLists] from the orbital space and the number of
/// electrons, then look up the lists of the required family. The lookups
/// return slices of [lists::StringSubstitution] borrowed from the engine.
pub mod lists;

pub use error::{ListFamily, Result, StringListError};
pub use graph::AddressingGraph;
pub use lists::{DetAddress, ListTimings, StringLists, StringSubstitution};
pub use operators::{ExcitationOperator, SecondQuantized};
pub use orbitals::OrbitalFrame;
pub use params::{BuildMode, CoreOrdering, RequiredLists, StringListsConfig};
