//! Analysis of tile pools for quota steering and difficulty targeting

/// Category counting and quota constraint derivation
pub mod quota;
/// Mean difficulty and distance to target
pub mod statistics;
