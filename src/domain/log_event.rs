use chrono::{DateTime, Local};

/// What part of the panel produced an activity entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEventKind {
    /// Preview server started, stopped, or restarted
    Server,
    /// Clone, pull, commit, or push
    Git,
    /// A preference was changed
    Config,
    /// Something failed
    Error,
    /// Anything else (startup, shutdown)
    System,
}

impl std::fmt::Display for LogEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEventKind::Server => write!(f, "server"),
            LogEventKind::Git => write!(f, "git"),
            LogEventKind::Config => write!(f, "config"),
            LogEventKind::Error => write!(f, "error"),
            LogEventKind::System => write!(f, "system"),
        }
    }
}

/// An entry in the panel's activity log
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Local>,
    pub kind: LogEventKind,
    pub summary: String,
    /// Longer detail, e.g. git's stderr
    pub content: Option<String>,
}

impl LogEvent {
    pub fn new(kind: LogEventKind, summary: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            kind,
            summary: summary.into(),
            content: None,
        }
    }

    pub fn server(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Server, summary)
    }

    pub fn git(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Git, summary)
    }

    pub fn config(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Config, summary)
    }

    pub fn error(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Error, summary)
    }

    pub fn system(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::System, summary)
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == LogEventKind::Error
    }

    /// `HH:MM:SS [kind] summary`
    pub fn display_line(&self) -> String {
        format!(
            "{} [{}] {}",
            self.timestamp.format("%H:%M:%S"),
            self.kind,
            self.summary
        )
    }
}

/// Keep only the newest `max` entries.
pub fn truncate_log(log: &mut Vec<LogEvent>, max: usize) {
    if log.len() > max {
        let excess = log.len() - max;
        log.drain(..excess);
    }
}
