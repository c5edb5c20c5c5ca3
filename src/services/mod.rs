// src/services/mod.rs
pub mod conversation;
pub mod gateway;
pub mod gemini;
pub mod metrics_manager;
pub mod persona;
pub mod session_manager;
