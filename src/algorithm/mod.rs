/// Transitive category derivation through nested snippet placeholders
pub mod derivation;
/// Tile pool refinement toward a target difficulty and board assembly
pub mod executor;
/// Placeholder expansion against snippet pools, value providers and ranges
pub mod expansion;
/// Constraint- and difficulty-aware tile synthesis
pub mod generation;
/// Random-restart board layout search and scoring
pub mod layout;
/// Roulette-wheel selection over weighted items
pub mod sampler;
