pub mod assembler;
pub mod gateway;
