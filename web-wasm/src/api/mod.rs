//! ブラウザからのGemini API呼び出し

pub mod gemini;
