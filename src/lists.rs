use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use itertools::{iproduct, Itertools};
use log::{debug, info};
use rayon::prelude::*;

use crate::error::{ListFamily, Result, StringListError};
use crate::graph::AddressingGraph;
use crate::operators::ExcitationOperator;
use crate::orbitals::{OrbitalFrame, Pair};
use crate::params::{BuildMode, RequiredLists, StringListsConfig};
use crate::{BitOps, BitStruct, Spin};

/// Address of a determinant from its alpha and beta strings. The irrep of
/// the beta string follows from the irrep of the determinant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetAddress {
    pub alfa_sym: usize,
    pub alfa_string: usize,
    pub beta_string: usize,
}

impl DetAddress {
    pub fn new(alfa_sym: usize, alfa_string: usize, beta_string: usize) -> Self {
        DetAddress { alfa_sym, alfa_string, beta_string }
    }
}

/// One string to string transition $\hat{O}\lvert I\rangle=\pm\lvert J\rangle$.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringSubstitution {
    /// Fermionic sign, $\pm1$.
    pub sign: i8,
    /// Address $I$ of the source string.
    pub source: usize,
    /// Address $J$ of the resulting string.
    pub target: usize,
}

impl StringSubstitution {
    pub fn new(sign: i8, source: usize, target: usize) -> Self {
        StringSubstitution { sign, source, target }
    }
}

/// Substitution lists keyed by orbital key and irrep of the resulting string.
pub type SubstitutionMap<K> = HashMap<(K, usize), Vec<StringSubstitution>>;
/// Keyed by $(p, q)$.
pub type VOList = SubstitutionMap<(usize, usize)>;
/// Keyed by (pair symmetry, pair index).
pub type OOList = SubstitutionMap<(usize, usize)>;
/// Keyed by $(p, q, r, s)$.
pub type VOVOList = SubstitutionMap<(usize, usize, usize, usize)>;
/// Keyed by $(p, q, r, s)$.
pub type VVOOList = SubstitutionMap<(usize, usize, usize, usize)>;

/// Wall time spent building each family, both spins together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListTimings {
    pub nn: Duration,
    pub vo: Duration,
    pub oo: Duration,
    pub vovo: Duration,
    pub vvoo: Duration,
}

#[derive(Debug)]
struct Built<K> {
    lists: SubstitutionMap<K>,
    elapsed: Duration,
}

#[derive(Debug, Default)]
struct SpinLists {
    vo: OnceLock<Built<(usize, usize)>>,
    oo: OnceLock<Built<(usize, usize)>>,
    vovo: OnceLock<Built<(usize, usize, usize, usize)>>,
    vvoo: OnceLock<Built<(usize, usize, usize, usize)>>,
}

/// Mappings between alpha and beta strings.
/// # Definition
/// The engine owns one [AddressingGraph] per spin and the substitution lists
/// built on them:
///
/// | Family | Operator | Key |
/// |--------|----------|-----|
/// | VO   | $a^\dagger_pa_q$ | $(p, q, h_J)$ |
/// | OO   | $n_pn_q$, $p>q$ | $(h_{pq}, pq, h_J)$ |
/// | VOVO | $a^\dagger_pa_qa^\dagger_ra_s$ | $(p, q, r, s, h_J)$ |
/// | VVOO | $a^\dagger_pa^\dagger_qa_sa_r$ | $(p, q, r, s, h_J)$ |
///
/// $h_J$ is the irrep of the resulting string. Entries of a list are sorted
/// by source address, and all the sources of a list share the irrep
/// $h_J\oplus h_{\hat{O}}$.
/// # Usage
/// ```rust
/// use cistrings::{Spin, StringLists, StringListsConfig};
/// let lists = StringLists::new(StringListsConfig::default(), &[4], &[], &[0, 1, 2, 3], 2, 2).unwrap();
/// let graph = lists.alfa_graph();
/// let (h, source) = graph.rank(&[0, 1]).unwrap();
/// let (_, target) = graph.rank(&[1, 2]).unwrap();
/// let vo = lists.vo_list(Spin::Up, 2, 0, h).unwrap();
/// // Orbital 1 sits between the two orbitals of the excitation.
/// assert!(vo.iter().any(|s| s.source == source && s.target == target && s.sign == -1));
/// ```
#[derive(Debug)]
pub struct StringLists {
    config: StringListsConfig,
    frame: OrbitalFrame,
    na: usize,
    nb: usize,
    alfa_graph: AddressingGraph,
    beta_graph: AddressingGraph,
    alfa_lists: SpinLists,
    beta_lists: SpinLists,
    pool: Option<rayon::ThreadPool>,
    nn_list_timer: Duration,
}

impl StringLists {
    /// Builds the graphs and, with [BuildMode::Eager], every list permitted by
    /// [RequiredLists].
    /// # Arguments
    /// * __`config`__ - Construction parameters.
    /// * __`cmopi`__ - The number of correlated orbitals per irrep.
    /// * __`core_mo`__ - Global index of the core orbitals.
    /// * __`cmo_to_mo`__ - Global index of each correlated orbital.
    /// * __`na`__ - The number of alpha electrons in the correlated orbitals.
    /// * __`nb`__ - The number of beta electrons in the correlated orbitals.
    pub fn new(
        config: StringListsConfig,
        cmopi: &[usize],
        core_mo: &[usize],
        cmo_to_mo: &[usize],
        na: usize,
        nb: usize,
    ) -> Result<Self> {
        let start = Instant::now();
        let frame = OrbitalFrame::new(cmopi, core_mo, cmo_to_mo, config.core_ordering)?;
        let nn_list_timer = start.elapsed();
        let ncmo = frame.ncmo();
        let alfa_graph = AddressingGraph::new(ncmo, na, frame.orbital_sym(), frame.nirrep())?;
        let beta_graph = AddressingGraph::new(ncmo, nb, frame.orbital_sym(), frame.nirrep())?;
        let pool = match config.nthreads {
            Some(nthreads) => Some(rayon::ThreadPoolBuilder::new().num_threads(nthreads).build()?),
            None => None,
        };

        info!("Number of correlated orbitals = {}", ncmo);
        info!("Number of alpha electrons = {}, beta electrons = {}", na, nb);
        info!("Number of alpha strings = {}, beta strings = {}", alfa_graph.nstr(), beta_graph.nstr());
        debug!("Alpha strings per irrep = {:?}", alfa_graph.strpi());
        debug!("Beta strings per irrep = {:?}", beta_graph.strpi());
        debug!("Required lists = {:?}, build mode = {:?}", config.required_lists, config.build_mode);

        let lists = StringLists {
            config,
            frame,
            na,
            nb,
            alfa_graph,
            beta_graph,
            alfa_lists: SpinLists::default(),
            beta_lists: SpinLists::default(),
            pool,
            nn_list_timer,
        };
        if lists.config.build_mode == BuildMode::Eager {
            lists.startup()?;
        }
        Ok(lists)
    }

    fn startup(&self) -> Result<()> {
        for spin in [Spin::Up, Spin::Down] {
            self.vo_family(spin);
            self.oo_family(spin);
            if self.config.required_lists.has_vovo() {
                self.vovo_family(spin)?;
            }
            if self.config.required_lists.has_vvoo() {
                self.vvoo_family(spin)?;
            }
        }
        let timings = self.timings();
        info!(
            "Timing for NN = {:.3} s, VO = {:.3} s, OO = {:.3} s, VOVO = {:.3} s, VVOO = {:.3} s",
            timings.nn.as_secs_f64(),
            timings.vo.as_secs_f64(),
            timings.oo.as_secs_f64(),
            timings.vovo.as_secs_f64(),
            timings.vvoo.as_secs_f64()
        );
        Ok(())
    }

    // ==> Accessors <==

    pub fn required_lists(&self) -> RequiredLists {
        self.config.required_lists
    }

    /// Number of alpha electrons.
    pub fn na(&self) -> usize {
        self.na
    }

    /// Number of beta electrons.
    pub fn nb(&self) -> usize {
        self.nb
    }

    pub fn ncmo(&self) -> usize {
        self.frame.ncmo()
    }

    pub fn nirrep(&self) -> usize {
        self.frame.nirrep()
    }

    pub fn cmopi(&self) -> &[usize] {
        self.frame.cmopi()
    }

    pub fn cmopi_offset(&self) -> &[usize] {
        self.frame.cmopi_offset()
    }

    pub fn cmo_to_mo(&self) -> &[usize] {
        self.frame.cmo_to_mo()
    }

    pub fn fomo_to_mo(&self) -> &[usize] {
        self.frame.fomo_to_mo()
    }

    pub fn frame(&self) -> &OrbitalFrame {
        &self.frame
    }

    pub fn alfa_graph(&self) -> &AddressingGraph {
        &self.alfa_graph
    }

    pub fn beta_graph(&self) -> &AddressingGraph {
        &self.beta_graph
    }

    pub fn graph(&self, spin: Spin) -> &AddressingGraph {
        match spin {
            Spin::Up => &self.alfa_graph,
            Spin::Down => &self.beta_graph,
        }
    }

    /// Number of alpha strings.
    pub fn nas(&self) -> usize {
        self.alfa_graph.nstr()
    }

    /// Number of beta strings.
    pub fn nbs(&self) -> usize {
        self.beta_graph.nstr()
    }

    /// Number of orbital pairs of pair symmetry `h`.
    pub fn pairpi(&self, h: usize) -> usize {
        self.frame.pairpi(h)
    }

    pub fn pair_offset(&self) -> &[usize] {
        self.frame.pair_offset()
    }

    /// The `n`-th orbital pair $(p, q)$, $p>q$, of pair symmetry `h`.
    pub fn get_nn_list_pair(&self, h: usize, n: usize) -> Result<Pair> {
        self.frame.pair(h, n)
    }

    /// Number of determinants of irrep `symmetry` in the full CI space, $0$
    /// for an irrep out of range.
    /// # Errors
    /// [StringListError::OutOfRange] if the count does not fit in a `usize`.
    pub fn nfcidets(&self, symmetry: usize) -> Result<usize> {
        if symmetry >= self.nirrep() {
            return Ok(0);
        }
        (0..self.nirrep())
            .try_fold(0usize, |acc, h| {
                self.alfa_graph
                    .block_size(h)
                    .checked_mul(self.beta_graph.block_size(h ^ symmetry))
                    .and_then(|n| acc.checked_add(n))
            })
            .ok_or_else(|| {
                StringListError::out_of_range(format!(
                    "The number of determinants of irrep {} overflows.", symmetry
                ))
            })
    }

    /// Address of the determinant built from two sorted orbital lists.
    pub fn det_address(&self, alfa: &[usize], beta: &[usize]) -> Result<DetAddress> {
        let (alfa_sym, alfa_string) = self.alfa_graph.rank(alfa)?;
        let (_, beta_string) = self.beta_graph.rank(beta)?;
        Ok(DetAddress::new(alfa_sym, alfa_string, beta_string))
    }

    /// Alpha and beta orbital lists of a determinant of irrep `symmetry`.
    pub fn det_strings(&self, address: DetAddress, symmetry: usize) -> Result<(Vec<usize>, Vec<usize>)> {
        let alfa = self.alfa_graph.unrank(address.alfa_sym, address.alfa_string)?;
        let beta = self.beta_graph.unrank(address.alfa_sym ^ symmetry, address.beta_string)?;
        Ok((alfa, beta))
    }

    /// Whether a list family of a spin has been built already.
    pub fn is_built(&self, family: ListFamily, spin: Spin) -> bool {
        let lists = self.spin_lists(spin);
        match family {
            ListFamily::VO => lists.vo.get().is_some(),
            ListFamily::OO => lists.oo.get().is_some(),
            ListFamily::VOVO => lists.vovo.get().is_some(),
            ListFamily::VVOO => lists.vvoo.get().is_some(),
        }
    }

    /// Time spent in the list builders so far.
    pub fn timings(&self) -> ListTimings {
        let mut timings = ListTimings { nn: self.nn_list_timer, ..Default::default() };
        for lists in [&self.alfa_lists, &self.beta_lists] {
            timings.vo += lists.vo.get().map(|b| b.elapsed).unwrap_or_default();
            timings.oo += lists.oo.get().map(|b| b.elapsed).unwrap_or_default();
            timings.vovo += lists.vovo.get().map(|b| b.elapsed).unwrap_or_default();
            timings.vvoo += lists.vvoo.get().map(|b| b.elapsed).unwrap_or_default();
        }
        timings
    }

    // ==> Lookups <==

    /// Single substitutions $a^\dagger_pa_q\lvert I\rangle=\pm\lvert J\rangle$
    /// with $J$ of irrep `h`. Includes the diagonal $p=q$.
    pub fn vo_list(&self, spin: Spin, p: usize, q: usize, h: usize) -> Result<&[StringSubstitution]> {
        self.check_orbitals(&[p, q])?;
        self.check_irrep(h)?;
        Ok(lookup(self.vo_family(spin), (p, q), h))
    }

    /// Strings of irrep `h` with both orbitals of the pair `pq` of pair
    /// symmetry `pq_sym` occupied. The entries are diagonal with sign $+1$.
    pub fn oo_list(&self, spin: Spin, pq_sym: usize, pq: usize, h: usize) -> Result<&[StringSubstitution]> {
        self.frame.pair(pq_sym, pq)?;
        self.check_irrep(h)?;
        Ok(lookup(self.oo_family(spin), (pq_sym, pq), h))
    }

    /// Double substitutions $a^\dagger_pa_qa^\dagger_ra_s$.
    pub fn vovo_list(&self, spin: Spin, p: usize, q: usize, r: usize, s: usize, h: usize) -> Result<&[StringSubstitution]> {
        if !self.config.required_lists.has_vovo() {
            return Err(StringListError::NotBuilt { family: ListFamily::VOVO, spin });
        }
        self.check_orbitals(&[p, q, r, s])?;
        self.check_irrep(h)?;
        Ok(lookup(self.vovo_family(spin)?, (p, q, r, s), h))
    }

    /// Double substitutions $a^\dagger_pa^\dagger_qa_sa_r$.
    pub fn vvoo_list(&self, spin: Spin, p: usize, q: usize, r: usize, s: usize, h: usize) -> Result<&[StringSubstitution]> {
        if !self.config.required_lists.has_vvoo() {
            return Err(StringListError::NotBuilt { family: ListFamily::VVOO, spin });
        }
        self.check_orbitals(&[p, q, r, s])?;
        self.check_irrep(h)?;
        Ok(lookup(self.vvoo_family(spin)?, (p, q, r, s), h))
    }

    pub fn get_alfa_vo_list(&self, p: usize, q: usize, h: usize) -> Result<&[StringSubstitution]> {
        self.vo_list(Spin::Up, p, q, h)
    }

    pub fn get_beta_vo_list(&self, p: usize, q: usize, h: usize) -> Result<&[StringSubstitution]> {
        self.vo_list(Spin::Down, p, q, h)
    }

    pub fn get_alfa_oo_list(&self, pq_sym: usize, pq: usize, h: usize) -> Result<&[StringSubstitution]> {
        self.oo_list(Spin::Up, pq_sym, pq, h)
    }

    pub fn get_beta_oo_list(&self, pq_sym: usize, pq: usize, h: usize) -> Result<&[StringSubstitution]> {
        self.oo_list(Spin::Down, pq_sym, pq, h)
    }

    pub fn get_alfa_vovo_list(&self, p: usize, q: usize, r: usize, s: usize, h: usize) -> Result<&[StringSubstitution]> {
        self.vovo_list(Spin::Up, p, q, r, s, h)
    }

    pub fn get_beta_vovo_list(&self, p: usize, q: usize, r: usize, s: usize, h: usize) -> Result<&[StringSubstitution]> {
        self.vovo_list(Spin::Down, p, q, r, s, h)
    }

    pub fn get_alfa_vvoo_list(&self, p: usize, q: usize, r: usize, s: usize, h: usize) -> Result<&[StringSubstitution]> {
        self.vvoo_list(Spin::Up, p, q, r, s, h)
    }

    pub fn get_beta_vvoo_list(&self, p: usize, q: usize, r: usize, s: usize, h: usize) -> Result<&[StringSubstitution]> {
        self.vvoo_list(Spin::Down, p, q, r, s, h)
    }

    fn check_orbitals(&self, orbitals: &[usize]) -> Result<()> {
        let ncmo = self.ncmo();
        match orbitals.iter().find(|&&p| p >= ncmo) {
            Some(p) => Err(StringListError::out_of_range(format!(
                "Orbital {} is not below the number of correlated orbitals {}.", p, ncmo
            ))),
            None => Ok(()),
        }
    }

    fn check_irrep(&self, h: usize) -> Result<()> {
        if h >= self.nirrep() {
            return Err(StringListError::out_of_range(format!(
                "Irrep {} is not below the number of irreps {}.", h, self.nirrep()
            )));
        }
        Ok(())
    }

    // ==> List builders <==

    fn spin_lists(&self, spin: Spin) -> &SpinLists {
        match spin {
            Spin::Up => &self.alfa_lists,
            Spin::Down => &self.beta_lists,
        }
    }

    fn vo_family(&self, spin: Spin) -> &VOList {
        let built = self.spin_lists(spin).vo.get_or_init(|| {
            let n = self.ncmo();
            let operators = iproduct!(0..n, 0..n)
                .map(|(p, q)| ((p, q), ExcitationOperator::single(p, q)))
                .collect();
            self.build(spin, ListFamily::VO, operators)
        });
        &built.lists
    }

    fn oo_family(&self, spin: Spin) -> &OOList {
        let built = self.spin_lists(spin).oo.get_or_init(|| {
            let operators = self
                .frame
                .nn_list()
                .iter()
                .enumerate()
                .flat_map(|(pq_sym, pairs)| {
                    pairs
                        .iter()
                        .enumerate()
                        .map(move |(pq, &(p, q))| ((pq_sym, pq), ExcitationOperator::number_pair(p, q)))
                })
                .collect();
            self.build(spin, ListFamily::OO, operators)
        });
        &built.lists
    }

    fn vovo_family(&self, spin: Spin) -> Result<&VOVOList> {
        if !self.config.required_lists.has_vovo() {
            return Err(StringListError::NotBuilt { family: ListFamily::VOVO, spin });
        }
        let built = self.spin_lists(spin).vovo.get_or_init(|| {
            let n = self.ncmo();
            let operators = iproduct!(0..n, 0..n, 0..n, 0..n)
                .map(|(p, q, r, s)| ((p, q, r, s), ExcitationOperator::vovo(p, q, r, s)))
                .collect();
            self.build(spin, ListFamily::VOVO, operators)
        });
        Ok(&built.lists)
    }

    fn vvoo_family(&self, spin: Spin) -> Result<&VVOOList> {
        if !self.config.required_lists.has_vvoo() {
            return Err(StringListError::NotBuilt { family: ListFamily::VVOO, spin });
        }
        let built = self.spin_lists(spin).vvoo.get_or_init(|| {
            let n = self.ncmo();
            let operators = iproduct!(0..n, 0..n, 0..n, 0..n)
                .filter(|&(p, q, r, s)| p != q && r != s)
                .map(|(p, q, r, s)| ((p, q, r, s), ExcitationOperator::vvoo(p, q, r, s)))
                .collect();
            self.build(spin, ListFamily::VVOO, operators)
        });
        Ok(&built.lists)
    }

    /// Runs the operators of one family over the strings of one spin. The
    /// keys are independent and processed in parallel.
    fn build<K>(&self, spin: Spin, family: ListFamily, operators: Vec<(K, ExcitationOperator)>) -> Built<K>
    where
        K: Copy + Eq + Hash + Debug + Send + Sync,
    {
        let start = Instant::now();
        let graph = self.graph(spin);
        let core_parity = self.frame.core_parity();
        info!("Building the {} {} lists over {} operators.", family, spin, operators.len());
        let progress = self.progress_bar(family, spin, operators.len());

        let work = || {
            operators
                .into_par_iter()
                .progress_with(progress.clone())
                .map(|(key, op)| (key, substitutions(graph, &op, core_parity)))
                .collect::<Vec<(K, Vec<(usize, Vec<StringSubstitution>)>)>>()
        };
        let per_key = match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        };
        progress.finish_and_clear();

        let mut lists: SubstitutionMap<K> = HashMap::new();
        let mut nsubstitutions = 0;
        for (key, by_sym) in per_key.into_iter() {
            for (h, entries) in by_sym.into_iter() {
                #[cfg(feature = "verbose")]
                log::trace!("{} {} list {:?}, irrep {}: {} substitutions", family, spin, key, h, entries.len());
                nsubstitutions += entries.len();
                lists.insert((key, h), entries);
            }
        }
        let elapsed = start.elapsed();
        info!(
            "Built the {} {} lists: {} lists, {} substitutions in {:.3} s",
            family,
            spin,
            lists.len(),
            nsubstitutions,
            elapsed.as_secs_f64()
        );
        Built { lists, elapsed }
    }

    fn progress_bar(&self, family: ListFamily, spin: Spin, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let progress = ProgressBar::new(len as u64);
        progress.set_prefix(format!("{} {} lists: ", family, spin));
        if let Ok(style) = ProgressStyle::with_template(
            "[{elapsed_precise}] {prefix} {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
        ) {
            progress.set_style(style.progress_chars("##-"));
        }
        progress
    }
}

fn lookup<K: Eq + Hash>(lists: &SubstitutionMap<K>, key: K, h: usize) -> &[StringSubstitution] {
    lists.get(&(key, h)).map(Vec::as_slice).unwrap_or(&[])
}

/// All the transitions of one operator, grouped by irrep of the resulting
/// string and sorted by source address.
/// # Definition
/// Whether the operator survives only depends on the occupation of the
/// orbitals it acts on. Each surviving occupation of these orbitals is
/// completed with every choice of the remaining electrons among the other
/// orbitals.
fn substitutions(
    graph: &AddressingGraph,
    op: &ExcitationOperator,
    core_parity: &[bool],
) -> Vec<(usize, Vec<StringSubstitution>)> {
    let nones = graph.nones();
    let involved = op.orbitals();
    let free: Vec<usize> = (0..graph.nbits())
        .filter(|x| involved.binary_search(x).is_err())
        .collect();
    let mut by_sym: Vec<Vec<StringSubstitution>> = vec![Vec::new(); graph.nirrep()];

    for mask in 0..(1usize << involved.len()) {
        let nfixed = mask.count_ones() as usize;
        if nfixed > nones || nones - nfixed > free.len() {
            continue;
        }
        let mut pattern: BitStruct = 0;
        for (b, &x) in involved.iter().enumerate() {
            if mask & (1 << b) != 0 {
                pattern.set(x);
            }
        }
        if op.survives(pattern).is_none() {
            continue;
        }
        for combo in free.iter().copied().combinations(nones - nfixed) {
            let mut source = pattern;
            for x in combo.into_iter() {
                source.set(x);
            }
            if let Some((target, sign)) = op.apply(source, core_parity) {
                let (_, i) = graph.rank_bits(source);
                let (h, j) = graph.rank_bits(target);
                by_sym[h].push(StringSubstitution::new(sign, i, j));
            }
        }
    }

    by_sym
        .into_iter()
        .enumerate()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(h, mut entries)| {
            entries.sort_unstable_by_key(|s| s.source);
            (h, entries)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::params::CoreOrdering;

    fn no_symmetry(n: usize, na: usize, nb: usize, required_lists: RequiredLists) -> StringLists {
        let cmo_to_mo: Vec<usize> = (0..n).collect();
        StringLists::new(StringListsConfig::new(required_lists), &[n], &[], &cmo_to_mo, na, nb).unwrap()
    }

    #[test]
    fn test_single_excitation_n4_k2() {
        let lists = no_symmetry(4, 2, 2, RequiredLists::OneSubstitution);
        let graph = lists.alfa_graph();
        assert_eq!(graph.block_size(0), 6);
        assert_eq!(graph.rank(&[0, 1]).unwrap(), (0, 0));
        let (_, j) = graph.rank(&[1, 2]).unwrap();
        let vo = lists.vo_list(Spin::Up, 2, 0, 0).unwrap();
        let entry = vo.iter().find(|s| s.source == 0).unwrap();
        assert_eq!(entry.target, j);
        assert_eq!(entry.sign, -1);
        // [0, 1] and [0, 3].
        assert_eq!(vo.len(), 2);
        let (_, j) = graph.rank(&[0, 2]).unwrap();
        let vo = lists.vo_list(Spin::Up, 2, 1, 0).unwrap();
        assert_eq!(vo[0], StringSubstitution::new(1, 0, j));
    }

    #[test]
    fn test_entries_sorted_by_source() {
        let lists = no_symmetry(6, 3, 2, RequiredLists::AllSubstitutions);
        for p in 0..6 {
            for q in 0..6 {
                let vo = lists.vo_list(Spin::Up, p, q, 0).unwrap();
                assert!(vo.windows(2).all(|w| w[0].source < w[1].source));
            }
        }
        let vovo = lists.vovo_list(Spin::Down, 4, 0, 5, 1, 0).unwrap();
        assert!(!vovo.is_empty());
        assert!(vovo.windows(2).all(|w| w[0].source < w[1].source));
    }

    #[test]
    fn test_not_built_and_out_of_range() {
        let lists = no_symmetry(4, 2, 1, RequiredLists::OneSubstitution);
        assert_eq!(
            lists.vovo_list(Spin::Up, 0, 1, 2, 3, 0),
            Err(StringListError::NotBuilt { family: ListFamily::VOVO, spin: Spin::Up })
        );
        assert_eq!(
            lists.vvoo_list(Spin::Down, 0, 1, 2, 3, 0),
            Err(StringListError::NotBuilt { family: ListFamily::VVOO, spin: Spin::Down })
        );
        assert!(matches!(lists.vo_list(Spin::Up, 4, 0, 0), Err(StringListError::OutOfRange { .. })));
        assert!(matches!(lists.vo_list(Spin::Up, 0, 1, 1), Err(StringListError::OutOfRange { .. })));
        assert!(matches!(lists.oo_list(Spin::Up, 0, 6, 0), Err(StringListError::OutOfRange { .. })));
        assert!(lists.vo_list(Spin::Up, 0, 1, 0).is_ok());
    }

    #[test]
    fn test_lazy_build_on_first_lookup() {
        let config = StringListsConfig {
            required_lists: RequiredLists::TwoSubstitutionVVOO,
            build_mode: BuildMode::Lazy,
            core_ordering: CoreOrdering::Leading,
            nthreads: Some(2),
            show_progress: false,
        };
        let lists = StringLists::new(config, &[5], &[], &[0, 1, 2, 3, 4], 2, 3).unwrap();
        assert!(!lists.is_built(ListFamily::VO, Spin::Up));
        assert!(!lists.is_built(ListFamily::VVOO, Spin::Down));
        lists.vvoo_list(Spin::Down, 3, 4, 0, 1, 0).unwrap();
        assert!(lists.is_built(ListFamily::VVOO, Spin::Down));
        assert!(!lists.is_built(ListFamily::VVOO, Spin::Up));
        assert!(!lists.is_built(ListFamily::VO, Spin::Up));
    }

    #[test]
    fn test_eager_build_respects_required_lists() {
        let lists = no_symmetry(4, 2, 2, RequiredLists::TwoSubstitutionVOVO);
        for spin in [Spin::Up, Spin::Down] {
            assert!(lists.is_built(ListFamily::VO, spin));
            assert!(lists.is_built(ListFamily::OO, spin));
            assert!(lists.is_built(ListFamily::VOVO, spin));
            assert!(!lists.is_built(ListFamily::VVOO, spin));
        }
    }

    #[test]
    fn test_nfcidets_and_det_address() {
        // Two irreps, orbitals [0, 0, 1, 1].
        let lists = StringLists::new(StringListsConfig::default(), &[2, 2], &[], &[0, 1, 2, 3], 1, 1).unwrap();
        assert_eq!(lists.nfcidets(0), Ok(8));
        assert_eq!(lists.nfcidets(1), Ok(8));
        assert_eq!(lists.nfcidets(2), Ok(0));
        let address = lists.det_address(&[2], &[1]).unwrap();
        assert_eq!(address, DetAddress::new(1, 0, 1));
        assert_eq!(lists.det_strings(address, 1).unwrap(), (vec![2], vec![1]));
    }
}
