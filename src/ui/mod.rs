// Terminal presentation: formatting, view state and text renderers
pub mod big_number;
pub mod render;
pub mod view_state;

// Re-export main entry points
pub use big_number::format;
pub use view_state::{ApiStatus, ViewState};
