use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Which dataset a fetch was for. Used to phrase advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Titles,
    Kpis,
    History,
    Forecast,
}

impl Resource {
    fn noun(self) -> &'static str {
        match self {
            Resource::Titles => "titles",
            Resource::Kpis => "KPIs",
            Resource::History => "history",
            Resource::Forecast => "forecast",
        }
    }
}

/// Failures reported by a data source.
///
/// Shape anomalies inside an otherwise valid payload are not errors; they are
/// carried as `Metric::NotANumber` and degraded at display time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Network unreachable, timeout, or a body that is not the expected JSON.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Non-2xx answer. `message` is the server's `error` field when present.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Application { status: u16, message: Option<String> },
}

impl FetchError {
    /// The single user-visible line shown for this failure.
    pub fn advisory(&self, resource: Resource) -> String {
        match self {
            FetchError::Transport(_) => format!("Network error while loading {}", resource.noun()),
            FetchError::Application {
                message: Some(message),
                ..
            } => message.clone(),
            FetchError::Application { message: None, .. } => {
                format!("Failed to load {}", resource.noun())
            }
        }
    }

    pub fn into_app_error(self, resource: Resource) -> AppError {
        let advisory = self.advisory(resource);
        match &self {
            FetchError::Transport(detail) => AppError::new(4, format!("{advisory}: {detail}")),
            FetchError::Application { .. } => AppError::new(4, advisory),
        }
    }
}
