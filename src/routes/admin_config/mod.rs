pub mod get;
pub mod post;

pub use get::*;
pub use post::*;
