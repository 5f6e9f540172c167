//! Storage module for chat uploads
//!
//! Files are kept on the local filesystem so that `summary_file` can read
//! them back by name.

mod local_store;

pub use local_store::{LocalUploadStore, StorageError};
