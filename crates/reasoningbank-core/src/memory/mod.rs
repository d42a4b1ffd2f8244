pub mod base;
pub mod confidence;
pub mod result;

pub use base::{Memory, MemoryOrigin, Outcome};
pub use confidence::Confidence;
pub use result::MemoryResult;
