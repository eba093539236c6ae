/// ARDot Prep - reference image preparation
///
/// Resizes the tracker's reference images to a fixed width, publishes them
/// next to the web front-end and writes the JSON manifest the front-end
/// loads them from.

pub mod config;
pub mod error;
pub mod prepare;
pub mod report;
pub mod verify;

#[cfg(test)]
mod test_support;

pub use config::PrepConfig;
pub use error::{PrepError, Result};
pub use prepare::{prepare, PrepSummary};
pub use report::print_summary;
pub use verify::{verify, FsDecoder};
