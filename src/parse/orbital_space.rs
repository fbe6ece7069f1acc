use csv::{Reader, StringRecord};
use derive_more::{Constructor, Error};
use log::{debug, error};
use std::fmt;
use std::fs::File;
use std::path::PathBuf;

/// Orbital space read from a definition file. This is the input of
/// [crate::lists::StringLists::new].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitalSpace {
    /// Number of irreps, a power of two.
    pub nirrep: usize,
    /// Number of correlated orbitals per irrep.
    pub cmopi: Vec<usize>,
    /// Global index of the core orbitals, sorted.
    pub core_mo: Vec<usize>,
    /// Global index of each correlated orbital.
    pub cmo_to_mo: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrbitalKind {
    Core,
    Active,
    FrozenVirtual,
}

/// Parse the orbital space definition
/// # Arguments
/// * __`fp`__ - File path to the definition file, in csv format. The header
/// must be `mo,irrep,kind`. `kind` is one of `core`, `active` or
/// `frozen_virtual`.
/// # Returns
/// * __`space`__ - The correlated orbitals per irrep, the core orbitals and the
/// map from correlated to global orbitals. The number of irreps is rounded up
/// to the next power of two.
/// # Errors
/// Active orbitals must be in Pitzer order: sorted by global index, their
/// irreps must never decrease.
pub fn parse_orbital_space(fp: &PathBuf) -> Result<OrbitalSpace> {
    let file = File::open(fp)?;
    let mut reader = Reader::from_reader(file);
    let mut core_mo: Vec<usize> = Vec::new();
    let mut active: Vec<(usize, usize)> = Vec::new();
    let mut seen: Vec<usize> = Vec::new();
    let mut max_irrep: usize = 0;

    for (k, result) in reader.records().enumerate() {
        let rec = result?;
        // Should have 3 column.
        if rec.len() != 3 {
            error!("Error at line {} in the orbital space definition, invalid number of elements.", k);
            return Err(OrbitalSpaceParseError::new(
                "Invalid number of argument on a line.".to_owned(),
            ));
        }
        let mo = parse_single_elem(&rec, 0, k)?;
        let irrep = parse_single_elem(&rec, 1, k)?;
        let kind = parse_kind(&rec, k)?;
        if seen.contains(&mo) {
            error!("Orbital {} is defined twice, line {}.", mo, k);
            return Err(OrbitalSpaceParseError::new(format!("Duplicate orbital {}.", mo)));
        }
        seen.push(mo);
        max_irrep = usize::max(max_irrep, irrep);
        match kind {
            OrbitalKind::Core => core_mo.push(mo),
            OrbitalKind::Active => active.push((mo, irrep)),
            OrbitalKind::FrozenVirtual => {}
        }
    }

    let nirrep = (max_irrep + 1).next_power_of_two();
    active.sort_unstable();
    if active.windows(2).any(|w| w[0].1 > w[1].1) {
        error!("Active orbitals are not in Pitzer order.");
        return Err(OrbitalSpaceParseError::new(
            "Active orbitals must be grouped by irrep in increasing global order.".to_owned(),
        ));
    }
    let mut cmopi = vec![0; nirrep];
    for (_, irrep) in active.iter() {
        cmopi[*irrep] += 1;
    }
    core_mo.sort_unstable();
    let cmo_to_mo: Vec<usize> = active.iter().map(|(mo, _)| *mo).collect();
    debug!("Parsed orbital space: nirrep = {}, cmopi = {:?}, core = {:?}", nirrep, cmopi, core_mo);
    Ok(OrbitalSpace { nirrep, cmopi, core_mo, cmo_to_mo })
}

fn parse_single_elem(line: &StringRecord, col: usize, l: usize) -> Result<usize> {
    let field = line.get(col).unwrap_or("").trim();
    match field.parse::<usize>() {
        Ok(v) => Ok(v),
        Err(err) => {
            error!(
                "Expected an unsigned integer in the orbital space definition at line {}, col {}",
                l, col
            );
            Err(OrbitalSpaceParseError::from(err))
        }
    }
}

fn parse_kind(line: &StringRecord, l: usize) -> Result<OrbitalKind> {
    match line.get(2).unwrap_or("").trim() {
        "core" => Ok(OrbitalKind::Core),
        "active" => Ok(OrbitalKind::Active),
        "frozen_virtual" => Ok(OrbitalKind::FrozenVirtual),
        other => {
            error!("Unknown orbital kind {} at line {}.", other, l);
            Err(OrbitalSpaceParseError::new(format!("Unknown orbital kind {}.", other)))
        }
    }
}

type Result<T> = std::result::Result<T, OrbitalSpaceParseError>;

/// Error in the orbital space definition.
#[derive(Debug, Clone, Error, Constructor)]
pub struct OrbitalSpaceParseError {
    pub details: String,
}

impl fmt::Display for OrbitalSpaceParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Parsing error encountered in the orbital space definition: {}", self.details)
    }
}

impl From<std::num::ParseIntError> for OrbitalSpaceParseError {
    fn from(err: std::num::ParseIntError) -> Self {
        OrbitalSpaceParseError::new(format!("Expected to parse an integer. {}", err))
    }
}

impl From<csv::Error> for OrbitalSpaceParseError {
    fn from(err: csv::Error) -> Self {
        OrbitalSpaceParseError::new(err.to_string())
    }
}

impl From<std::io::Error> for OrbitalSpaceParseError {
    fn from(err: std::io::Error) -> Self {
        OrbitalSpaceParseError::new(err.to_string())
    }
}
