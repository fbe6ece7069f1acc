use derive_more::Error;
use std::fmt;

use crate::Spin;
use crate::parse::orbital_space::OrbitalSpaceParseError;

/// Substitution list families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListFamily {
    /// Single substitutions $a^\dagger_pa_q$.
    VO,
    /// Occupied pairs $n_pn_q$.
    OO,
    /// Double substitutions $a^\dagger_pa_qa^\dagger_ra_s$.
    VOVO,
    /// Double substitutions $a^\dagger_pa^\dagger_qa_sa_r$.
    VVOO,
}

impl fmt::Display for ListFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ListFamily::VO => write!(f, "VO"),
            ListFamily::OO => write!(f, "OO"),
            ListFamily::VOVO => write!(f, "VOVO"),
            ListFamily::VVOO => write!(f, "VVOO"),
        }
    }
}

/// Errors of the addressing graph and the substitution list engine. All of
/// them are contract violations of the caller, retrying will not help.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StringListError {
    /// Inconsistent orbital space or electron count at construction.
    InvalidConfiguration { details: String },
    /// Malformed list of occupied orbitals.
    InvalidString { details: String },
    /// Address, orbital or irrep index outside of its range.
    OutOfRange { details: String },
    /// The list family was not requested at construction.
    NotBuilt { family: ListFamily, spin: Spin },
}

impl StringListError {
    pub fn invalid_configuration<S: Into<String>>(details: S) -> Self {
        StringListError::InvalidConfiguration { details: details.into() }
    }

    pub fn invalid_string<S: Into<String>>(details: S) -> Self {
        StringListError::InvalidString { details: details.into() }
    }

    pub fn out_of_range<S: Into<String>>(details: S) -> Self {
        StringListError::OutOfRange { details: details.into() }
    }
}

impl fmt::Display for StringListError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StringListError::InvalidConfiguration { details } => {
                write!(f, "Invalid configuration: {}", details)
            }
            StringListError::InvalidString { details } => {
                write!(f, "Invalid string: {}", details)
            }
            StringListError::OutOfRange { details } => {
                write!(f, "Out of range: {}", details)
            }
            StringListError::NotBuilt { family, spin } => {
                write!(f, "The {} {} list was not requested at construction.", family, spin)
            }
        }
    }
}

impl From<OrbitalSpaceParseError> for StringListError {
    fn from(err: OrbitalSpaceParseError) -> Self {
        StringListError::invalid_configuration(err.details)
    }
}

impl From<rayon::ThreadPoolBuildError> for StringListError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        StringListError::invalid_configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StringListError>;
