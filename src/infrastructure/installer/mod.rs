//! Package installer adapters

mod pip;

pub use pip::PipInstaller;
