pub mod display_name;
pub mod email;
pub mod notification;
pub mod password;
pub mod reset_token;
pub mod user;
