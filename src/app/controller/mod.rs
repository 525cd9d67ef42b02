mod clientes;
mod health;

pub use clientes::{ClientesController, ClientesControllerApi};
pub use health::{HealthController, HealthControllerApi};
