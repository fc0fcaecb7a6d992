//! Error handling traits

use std::borrow::Cow;

use super::types::{Error, Result};

/// Extension trait for Result types
pub trait ResultExt<T, E>: Sized {
    /// Wrap an error with additional context
    fn wrap_err<F, E2>(self, f: F) -> core::result::Result<T, E2>
    where
        F: FnOnce() -> E2;
}

impl<T, E> ResultExt<T, E> for core::result::Result<T, E> {
    fn wrap_err<F, E2>(self, f: F) -> core::result::Result<T, E2>
    where
        F: FnOnce() -> E2,
    {
        self.map_err(|_| f())
    }
}

/// Attach the failing resource to a raw I/O result
pub trait IoResultExt<T> {
    /// Convert into [`Error::Io`] naming `resource`
    fn on_resource(self, resource: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn on_resource(self, resource: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| Error::io(resource, source))
    }
}
