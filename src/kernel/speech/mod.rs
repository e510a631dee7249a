pub mod segment;
pub mod response;

pub use segment::*;
pub use response::*;
