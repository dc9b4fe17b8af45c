pub mod delete;
pub mod get;
pub mod post;
pub mod update;

pub use delete::*;
pub use get::*;
pub use post::*;
pub use update::*;
