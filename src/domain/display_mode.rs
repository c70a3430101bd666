use serde::{Deserialize, Serialize};

/// How a digit string is rendered for a person to read.
/// Presentation state only; never stored alongside history.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Debug,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DisplayMode {
    /// Adapts to magnitude
    #[default]
    Compact,
    Scientific,
    /// Exact value, suitable for copying
    Full,
}

impl DisplayMode {
    /// Tab caption
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Compact => "Compact",
            DisplayMode::Scientific => "Scientific",
            DisplayMode::Full => "Full",
        }
    }
}
