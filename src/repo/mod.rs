pub mod articles;
pub mod comments;
pub mod migrations;
pub mod topics;
pub mod users;
