// Domain layer: value types and ports. Depends only on std/serde and the crate error type.

pub mod model;
pub mod ports;
