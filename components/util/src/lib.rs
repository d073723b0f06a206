pub mod fs;

pub use crate::fs::mkdirs_if_missing;
