pub mod models;
pub mod search;
mod user;

pub use user::User;
