mod health_check;

pub mod admin_config;
pub mod authentication;
pub mod cart;
pub mod order;
pub mod product;
pub mod restaurant;
pub mod users;

pub use health_check::*;
