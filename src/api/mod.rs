pub mod auth;
pub mod docstore;
pub mod genai;
pub mod sheets;
