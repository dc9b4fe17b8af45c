pub mod approval;
pub mod get;

pub use approval::*;
pub use get::*;
