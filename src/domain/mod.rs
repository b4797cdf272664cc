// Domain layer: deployment models and the ports the orchestrator drives.

pub mod model;
pub mod ports;
