use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const NETWORK_ERROR_MESSAGE: &str = "Network Error: API is not responding";
pub const LIKED_MESSAGE: &str = "Liked Successfully";
pub const UNLIKED_MESSAGE: &str = "Like removed";

/// Most toasts kept on screen at once; older ones are dropped first.
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Sink for user-visible notifications.
pub trait Notifier {
    fn notify(&mut self, level: ToastLevel, message: &str);

    fn success(&mut self, message: &str) {
        self.notify(ToastLevel::Success, message);
    }

    fn warning(&mut self, message: &str) {
        self.notify(ToastLevel::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(ToastLevel::Error, message);
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub shown_at: DateTime<Local>,
    expires_at: Instant,
}

/// On-screen toast stack. Every toast is also written to the log.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
}

impl ToastQueue {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
        }
    }

    /// Drop toasts whose lifetime has run out.
    pub fn expire(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, level: ToastLevel, message: &str) {
        match level {
            ToastLevel::Success => tracing::info!(kind = level.label(), "{}", message),
            ToastLevel::Warning => tracing::warn!(kind = level.label(), "{}", message),
            ToastLevel::Error => tracing::error!(kind = level.label(), "{}", message),
        }

        if self.toasts.len() == MAX_VISIBLE {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            level,
            message: message.to_string(),
            shown_at: Local::now(),
            expires_at: Instant::now() + self.lifetime,
        });
    }
}
