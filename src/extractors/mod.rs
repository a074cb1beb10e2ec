//! Record extractors. Each one starts at the cursor, consumes the positions
//! of the construct it recognises and leaves the cursor just past them.

pub mod classes;
pub mod function;
pub mod misc;
pub mod params;
pub mod preproc;
pub mod typedefs;
