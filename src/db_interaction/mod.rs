mod admin;
mod cart;
mod food_item;
mod orders;
mod restaurant;
mod user;

pub use admin::*;
pub use cart::*;
pub use food_item::*;
pub use orders::*;
pub use restaurant::*;
pub use user::*;
