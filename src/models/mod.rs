pub mod broadcast;
pub mod field;
pub mod media;
pub mod user;
