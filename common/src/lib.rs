//! AI Optical Caliper Common Library
//!
//! CLIとWeb(WASM)で共有される型・プロンプト・セッション状態

pub mod types;
pub mod image;
pub mod error;
pub mod schema;
pub mod prompts;
pub mod gemini;
pub mod parser;
pub mod session;
pub mod presentation;
pub mod export;

pub use types::{AnalysisResult, BlueprintImage, CadFeature, CadSource, ComparisonDimension, RulerReading};
pub use image::UploadedImage;
pub use error::{is_auth_expired, Error, Result, AUTH_EXPIRED_MARKER};
pub use prompts::{build_analysis_prompt, build_blueprint_prompt, format_dimension_constraints};
pub use gemini::{
    api_error_message, build_analysis_request, build_blueprint_request, endpoint_for_model,
    extract_inline_image, interpret_analysis_response, GenerateContentRequest,
    GenerateContentResponse, ModelSettings,
};
pub use parser::{extract_json, parse_analysis_response};
pub use session::{ErrorDisposition, InFlight, Operation, Rejected, Session, Ticket};
pub use presentation::{has_discrepancy, format_value, DimensionRow, ViewState, DISCREPANCY_TOLERANCE};
