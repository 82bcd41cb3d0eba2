//! Generic error handling utilities
//!
//! Provides unified error handling that can work across different error types
//! while maintaining domain-specific error logging patterns.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// This trait enables generic error handling functions to determine whether an error
/// should show specific user messages or generic context with debug details.
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)` with a helpful, actionable message; when it returns `false`,
/// `user_message()` must return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error contains a specific, user-actionable message
    /// that should be displayed directly to the operator
    ///
    /// Examples of user-actionable errors:
    /// - An out-of-range slot number
    /// - A scanner delay outside the supported range
    /// - A malformed configuration value
    ///
    /// Examples of system errors:
    /// - IO failures reading the config file
    /// - Logger initialization failures
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors show their specific message; system errors show the
/// generic operation context. Full detail is always available at debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    if error.is_user_actionable() {
        if let Some(user_msg) = error.user_message() {
            log::error!("FATAL: {}", user_msg);
        } else {
            log::error!("FATAL: {}", operation_context);
        }
    } else {
        log::error!("FATAL: {}", operation_context);
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
