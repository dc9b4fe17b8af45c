mod category;
mod order_status;
mod password;
mod phone_number;
mod pincode;
mod user_email;
mod user_type;

pub use category::CategoryLabel;
pub use order_status::OrderStatus;
pub use password::ValidPassword;
pub use phone_number::PhoneNumberDomain;
pub use pincode::Pincode;
pub use user_email::UserEmail;
pub use user_type::{Approval, UserType};
