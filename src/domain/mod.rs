pub mod kind;
pub mod outcome;
pub mod task;

pub use kind::AssetKind;
pub use outcome::{BatchReport, FetchOutcome};
pub use task::FetchTask;
