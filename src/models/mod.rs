pub mod chat;
pub mod exchange;
