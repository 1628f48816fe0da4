// Domain layer: point/catalog types and the source-loading port. No I/O here.

pub mod model;
pub mod ports;
