//! File source implementations.

pub mod fs;

pub use fs::FsFileSource;
