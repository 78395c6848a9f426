// Domain layer: guest records, run outcome and the ports the pipeline is built on.

pub mod model;
pub mod ports;
