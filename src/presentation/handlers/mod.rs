mod chat;
pub mod chat_types;
mod health;

pub use chat::{ChatRequestError, chat_handler};
pub use health::health_handler;
