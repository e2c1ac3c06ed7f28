// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for stash operations.

/// A stash backend could not carry out an operation.
///
/// Only for hard failures such as an unreachable store. An operation that ran
/// but found nothing reports `None` or `false` instead. The backend's own error,
/// when there is one, is available through [`std::error::Error::source()`].
///
/// # Example
///
/// ```
/// use stashling::Error;
///
/// let error = Error::from_message("connection reset");
/// ```
#[ohno::error]
pub struct Error {}

impl Error {
    /// Wraps a backend error or a plain message.
    ///
    /// # Examples
    ///
    /// ```
    /// use stashling::Error;
    ///
    /// let error = Error::from_message("storage unavailable");
    /// assert!(error.to_string().contains("storage unavailable"));
    /// ```
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for stash operations.
pub type Result<T> = std::result::Result<T, Error>;
