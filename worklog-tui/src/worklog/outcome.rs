use serde::Deserialize;

/// Uniform response shape of every issue-page endpoint. Endpoint specific
/// fields are flattened into `payload`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteResult<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

/// How a single remote call ended, from the caller's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome<T> {
    Succeeded(T),
    /// The server answered with `success: false`.
    Rejected(Option<String>),
    /// The request did not complete or the response was unreadable.
    Unreachable(String),
}

impl<T> RemoteOutcome<T> {
    pub fn from_response(response: anyhow::Result<RemoteResult<T>>) -> Self {
        match response {
            Ok(result) if result.success => RemoteOutcome::Succeeded(result.payload),
            Ok(result) => RemoteOutcome::Rejected(result.message.filter(|m| !m.is_empty())),
            Err(e) => RemoteOutcome::Unreachable(format!("{e:#}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Error,
}

/// Content of a blocking dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub title: String,
    pub lines: Vec<String>,
}

impl Notice {
    pub fn new(tone: Tone, title: &str, text: impl Into<String>) -> Self {
        Self {
            tone,
            title: title.to_string(),
            lines: vec![text.into()],
        }
    }

    pub fn error(title: &str, text: impl Into<String>) -> Self {
        Self::new(Tone::Error, title, text)
    }
}

/// Transient status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub tone: Tone,
    pub message: String,
}

impl Toast {
    pub fn new(tone: Tone, message: impl Into<String>) -> Self {
        Self {
            tone,
            message: message.into(),
        }
    }
}
