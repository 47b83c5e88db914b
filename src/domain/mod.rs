// Domain layer: map models and the ports remote sources implement.

pub mod model;
pub mod ports;
