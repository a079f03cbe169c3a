// Domain layer: records, outcomes and ports. No dependencies beyond std/serde/chrono.

pub mod model;
pub mod outcome;
pub mod ports;
