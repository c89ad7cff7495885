pub mod chat;

pub use chat::{ChatbotRequest, ChatbotResponse};
