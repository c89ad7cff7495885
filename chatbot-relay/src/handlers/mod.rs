pub mod app;
pub mod chatbot;
pub mod metrics;
