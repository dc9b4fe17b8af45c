pub mod get;
pub mod post;
pub mod update;

pub use get::*;
pub use post::*;
pub use update::*;
