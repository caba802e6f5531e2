//! Config file adapters

mod json_file;

pub use json_file::JsonConfigFile;
