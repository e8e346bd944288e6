use taskdeck_core::AppError;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
}

/// Short user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity.
    pub level: ToastLevel,
    /// Rendered text.
    pub message: String,
}

impl Toast {
    /// Builds a success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    /// Builds an error toast from an application error.
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        Self {
            level: ToastLevel::Error,
            message: error.user_message(),
        }
    }
}

/// Port through which the UI layer receives notifications.
pub trait Notifier: Send + Sync {
    /// Shows a toast.
    fn notify(&self, toast: Toast);
}
