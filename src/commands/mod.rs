pub mod backup;

pub use backup::*;
