pub mod graph;
pub mod lists;
