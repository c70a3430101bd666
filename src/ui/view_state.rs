use crate::domain::{DisplayMode, SequenceResult};

/// Reachability of the service as last probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    #[default]
    Checking,
    Connected,
    Disconnected,
}

impl ApiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApiStatus::Checking => "Checking...",
            ApiStatus::Connected => "Connected ✓",
            ApiStatus::Disconnected => "Disconnected ✗",
        }
    }
}

/// Everything the renderers need besides the history itself.
///
/// Values are never edited in place: each transition consumes the old state
/// and returns the next one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub display_mode: DisplayMode,
    pub show_chart: bool,
    pub api_status: ApiStatus,
    pub loading: bool,
    pub result: Option<SequenceResult>,
    pub error: Option<String>,
}

impl ViewState {
    pub fn with_display_mode(self, display_mode: DisplayMode) -> Self {
        Self {
            display_mode,
            ..self
        }
    }

    pub fn with_chart_toggled(self) -> Self {
        Self {
            show_chart: !self.show_chart,
            ..self
        }
    }

    pub fn with_api_status(self, api_status: ApiStatus) -> Self {
        Self { api_status, ..self }
    }

    /// A request is in flight; any earlier error is cleared.
    pub fn loading(self) -> Self {
        Self {
            loading: true,
            error: None,
            ..self
        }
    }

    pub fn with_result(self, result: SequenceResult) -> Self {
        Self {
            loading: false,
            result: Some(result),
            error: None,
            ..self
        }
    }

    /// A failed lookup also drops the previous result.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        Self {
            loading: false,
            result: None,
            error: Some(message.into()),
            ..self
        }
    }

    /// Back to the input form; mode, chart toggle and status survive.
    pub fn reset(self) -> Self {
        Self {
            loading: false,
            result: None,
            error: None,
            ..self
        }
    }
}
