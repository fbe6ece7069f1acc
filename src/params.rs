/// Substitution lists to build.
/// # Definition
/// The VO and OO lists are always built. The double substitution lists are
/// the dominant cost and are only built on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredLists {
    OneSubstitution,
    TwoSubstitutionVOVO,
    TwoSubstitutionVVOO,
    AllSubstitutions,
}

impl RequiredLists {
    pub fn has_vovo(&self) -> bool {
        matches!(self, RequiredLists::TwoSubstitutionVOVO | RequiredLists::AllSubstitutions)
    }

    pub fn has_vvoo(&self) -> bool {
        matches!(self, RequiredLists::TwoSubstitutionVVOO | RequiredLists::AllSubstitutions)
    }
}

/// When the permitted lists are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Everything is built by the constructor.
    Eager,
    /// A list family of a spin is built on its first lookup.
    Lazy,
}

/// Position of the core orbitals in the operator ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreOrdering {
    /// Core orbitals come before every correlated orbital. They never change
    /// a sign.
    Leading,
    /// Core orbitals sit at their global orbital index. An operator on a
    /// correlated orbital anticommutes with every core orbital before it.
    Global,
}

/// Construction parameters of [crate::lists::StringLists].
#[derive(Debug, Clone)]
pub struct StringListsConfig {
    pub required_lists: RequiredLists,
    pub build_mode: BuildMode,
    pub core_ordering: CoreOrdering,
    /// Number of threads of the construction pool. `None` uses the global
    /// rayon pool.
    pub nthreads: Option<usize>,
    /// Show a progress bar while building the lists.
    pub show_progress: bool,
}

impl StringListsConfig {
    pub fn new(required_lists: RequiredLists) -> Self {
        StringListsConfig {
            required_lists,
            ..Default::default()
        }
    }
}

impl Default for StringListsConfig {
    fn default() -> Self {
        StringListsConfig {
            required_lists: RequiredLists::OneSubstitution,
            build_mode: BuildMode::Eager,
            core_ordering: CoreOrdering::Leading,
            nthreads: None,
            show_progress: false,
        }
    }
}
