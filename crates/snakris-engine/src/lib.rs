pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid walk seed: expected 32 hexadecimal characters")]
pub struct ParseSeedError;
