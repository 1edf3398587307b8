//! AI Optical Caliper
//!
//! 定規と一緒に撮った写真をGeminiに送り、寸法の比較表と技術図面を得る

pub mod app;
pub mod cli;
pub mod config;
pub mod credential;
pub mod error;
pub mod export;
pub mod gateway;
pub mod intake;
pub mod progress;
pub mod report;

pub use app::Caliper;
pub use error::{CaliperError, Result};
