// Re-export the screen struct and its outcome signal
pub use types::{BrowseScreen, BrowseSignal};

mod data;
mod details_panel;
mod export;
mod input;
mod navigation;
mod render;
pub mod types;
