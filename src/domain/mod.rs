// Domain layer: binder model, upstream snapshots and the ports the engine consumes.

pub mod model;
pub mod ports;
pub mod snapshot;
