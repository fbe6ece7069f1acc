use crate::{BitOps, BitStruct};

/// Elementary fermionic operator on a correlated orbital.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondQuantized {
    /// $a^\dagger_p$
    Create(usize),
    /// $a_p$
    Annihilate(usize),
}

impl SecondQuantized {
    #[inline(always)]
    pub fn orbital(&self) -> usize {
        match *self {
            SecondQuantized::Create(p) => p,
            SecondQuantized::Annihilate(p) => p,
        }
    }
}

/// Product of creation and annihilation operators.
/// # Definition
/// The operators are written left to right and act right to left, so
/// [ExcitationOperator::single] is $a^\dagger_pa_q$ and $a_q$ acts first.
/// Every elementary operator on orbital $x$ of a string $I$ gives the sign
///
/// $$
/// (-1)^{\sum_{y<x}n_y(I)}
/// $$
///
/// and the sign of the product is the product of these signs, taken on the
/// intermediate strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcitationOperator {
    ops: Vec<SecondQuantized>,
}

impl ExcitationOperator {
    pub fn new(ops: Vec<SecondQuantized>) -> Self {
        ExcitationOperator { ops }
    }

    /// $a^\dagger_pa_q$
    pub fn single(p: usize, q: usize) -> Self {
        ExcitationOperator::new(vec![SecondQuantized::Create(p), SecondQuantized::Annihilate(q)])
    }

    /// $n_pn_q=a^\dagger_pa_pa^\dagger_qa_q$
    pub fn number_pair(p: usize, q: usize) -> Self {
        ExcitationOperator::new(vec![
            SecondQuantized::Create(p),
            SecondQuantized::Annihilate(p),
            SecondQuantized::Create(q),
            SecondQuantized::Annihilate(q),
        ])
    }

    /// $a^\dagger_pa_qa^\dagger_ra_s$
    pub fn vovo(p: usize, q: usize, r: usize, s: usize) -> Self {
        ExcitationOperator::new(vec![
            SecondQuantized::Create(p),
            SecondQuantized::Annihilate(q),
            SecondQuantized::Create(r),
            SecondQuantized::Annihilate(s),
        ])
    }

    /// $a^\dagger_pa^\dagger_qa_sa_r$
    pub fn vvoo(p: usize, q: usize, r: usize, s: usize) -> Self {
        ExcitationOperator::new(vec![
            SecondQuantized::Create(p),
            SecondQuantized::Create(q),
            SecondQuantized::Annihilate(s),
            SecondQuantized::Annihilate(r),
        ])
    }

    /// Sorted distinct orbitals the operator acts on.
    pub fn orbitals(&self) -> Vec<usize> {
        let mut orbitals: Vec<usize> = self.ops.iter().map(SecondQuantized::orbital).collect();
        orbitals.sort_unstable();
        orbitals.dedup();
        orbitals
    }

    /// Occupation of the string after the operator, without the sign. `None`
    /// if an annihilator meets an empty orbital or a creator meets an
    /// occupied one. This only depends on the orbitals of
    /// [ExcitationOperator::orbitals].
    #[inline]
    pub fn survives(&self, bits: BitStruct) -> Option<BitStruct> {
        let mut out = bits;
        for op in self.ops.iter().rev() {
            match *op {
                SecondQuantized::Annihilate(x) => {
                    if !out.check(x) {
                        return None;
                    }
                }
                SecondQuantized::Create(x) => {
                    if out.check(x) {
                        return None;
                    }
                }
            }
            out.set(op.orbital());
        }
        Some(out)
    }

    /// Applies the operator to a string.
    /// # Arguments
    /// * __`bits`__ - The string the operator acts on.
    /// * __`core_parity`__ - For each orbital, whether an odd number of core
    /// orbitals precedes it. Indexed by orbital, may be empty when no core
    /// orbital changes the sign.
    /// # Returns
    /// * __`(target, sign)`__ - The resulting string and its sign, `None` if
    /// the operator destroys the string.
    #[inline]
    pub fn apply(&self, bits: BitStruct, core_parity: &[bool]) -> Option<(BitStruct, i8)> {
        let mut out = bits;
        let mut odd = false;
        for op in self.ops.iter().rev() {
            let x = op.orbital();
            let occupied = out.check(x);
            match op {
                SecondQuantized::Annihilate(_) if !occupied => return None,
                SecondQuantized::Create(_) if occupied => return None,
                _ => {}
            }
            odd ^= out.count_before(x) % 2 == 1;
            odd ^= core_parity.get(x).copied().unwrap_or(false);
            out.set(x);
        }
        Some((out, if odd { -1 } else { 1 }))
    }
}
