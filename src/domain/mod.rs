// Domain layer: core models, ports (interfaces) and services. No I/O here;
// persistence comes in through the repository ports.

pub mod model;
pub mod ports;

pub mod services;
