//! UIコンポーネント

pub mod action_buttons;
pub mod blueprint_panel;
pub mod error_banner;
pub mod header;
pub mod image_grid;
pub mod key_gate;
pub mod progress_bar;
pub mod results_display;
pub mod upload_area;
