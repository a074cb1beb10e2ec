pub mod cpp;

pub use cpp::HeaderParser;
