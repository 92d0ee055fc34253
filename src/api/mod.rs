pub mod articles;
pub mod comments;
pub mod docs;
pub mod health;
pub mod topics;
pub mod users;
