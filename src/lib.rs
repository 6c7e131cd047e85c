//! Core library behind the `combine` and `divide` binaries, also used by tests.
//!
//! `combine` gathers the files of every sibling subdirectory into one flat
//! directory. `divide` spreads the files of a single directory over numbered
//! bucket directories. Both symlink by default and can copy or move instead.

pub mod cli;
pub mod combine;
pub mod divide;
pub mod error;
pub mod fsops;
pub mod partition;
pub mod transfer;

pub use combine::CombineOptions;
pub use divide::DivideOptions;
pub use error::{AccessError, PlanError, TransferError, UsageError};
pub use partition::{Bucket, Mode};
pub use transfer::{BatchReport, LinkSpec, Method, TransferOptions};
