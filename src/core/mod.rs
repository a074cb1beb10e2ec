pub mod classify;
pub mod cursor;
pub mod discovery;
pub mod flatten;
pub mod kinds;
pub mod pipeline;
pub mod records;
pub mod scanner;
pub mod scope;
pub mod state;

pub use discovery::HeaderScanner;
pub use flatten::{flatten, FlatNode};
pub use pipeline::{Pipeline, PipelineConfig, RunSummary};
pub use records::{Document, Record};
pub use scanner::scan;
pub use state::ScanOutput;
