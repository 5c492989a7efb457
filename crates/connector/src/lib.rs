//! Client for the cloud document store the sync pipeline reads from.

pub mod source;

pub use source::{DocumentSource, DriveSource, SourceError};
