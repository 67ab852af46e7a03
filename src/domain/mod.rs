// Domain layer: document shapes and the ports the submitter talks through.

pub mod model;
pub mod ports;
