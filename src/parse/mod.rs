/// Orbital space definition, in csv format.
pub mod orbital_space;
