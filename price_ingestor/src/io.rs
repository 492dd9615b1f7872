pub mod memory;
pub mod sink;
