use std::fmt::{self, Debug};

use thiserror::Error;

/// Errors that can occur when operating on a [`PoolRegistry`][crate::PoolRegistry].
///
/// Prototypes are carried in their `Debug` rendering so that the error type does not depend on
/// the host's prototype type.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The prototype cannot supply the pooled-object capability and automatic attachment of the
    /// capability is disabled.
    #[error("prototype {prototype} does not support pooling and auto-attach is disabled")]
    InvalidPrototype {
        /// The rejected prototype.
        prototype: String,
    },

    /// The operation referenced a prototype for which no pool has been created.
    #[error("no pool has been created for prototype {prototype}")]
    UnknownPool {
        /// The prototype that has no pool.
        prototype: String,
    },

    /// The pool is empty and dynamic extension is disabled.
    #[error("pool for prototype {prototype} is exhausted and dynamic extension is disabled")]
    PoolExhausted {
        /// The prototype whose pool is empty.
        prototype: String,
    },

    /// A pool cannot be created or extended by zero instances.
    #[error("pool size must be greater than zero")]
    InvalidSize,
}

impl Error {
    pub(crate) fn invalid_prototype(prototype: &impl Debug) -> Self {
        Self::InvalidPrototype {
            prototype: format!("{prototype:?}"),
        }
    }

    pub(crate) fn unknown_pool(prototype: &impl Debug) -> Self {
        Self::UnknownPool {
            prototype: format!("{prototype:?}"),
        }
    }

    pub(crate) fn pool_exhausted(prototype: &impl Debug) -> Self {
        Self::PoolExhausted {
            prototype: format!("{prototype:?}"),
        }
    }
}

/// A specialized `Result` type for registry operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

/// A handle that could not be released, returned to the caller together with the reason.
///
/// The registry never destroys a handle it cannot accept. Use [`into_handle()`][1] to take it
/// back and decide what to do with the instance.
///
/// [1]: Self::into_handle
#[derive(Error)]
#[error("{error}")]
pub struct ReleaseError<T> {
    handle: T,
    error: Error,
}

impl<T> ReleaseError<T> {
    pub(crate) fn new(handle: T, error: Error) -> Self {
        Self { handle, error }
    }

    /// The reason the handle was rejected.
    #[must_use]
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Takes back the rejected handle, unchanged.
    #[must_use]
    pub fn into_handle(self) -> T {
        self.handle
    }

    /// Splits into the rejected handle and the reason it was rejected.
    #[must_use]
    pub fn into_parts(self) -> (T, Error) {
        (self.handle, self.error)
    }
}

// The handle may not be `Debug`, so we only show the error.
impl<T> Debug for ReleaseError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
