// Domain layer: core models, ports (interfaces) and pure transform services.

pub mod model;
pub mod ports;
pub mod services;
