pub mod assemblyai;
pub mod report;
pub mod segment;

pub use assemblyai::*;
pub use report::*;
pub use segment::*;
