pub mod memory;
pub mod power;
