pub mod cliente;

pub use cliente::Model as Cliente;
