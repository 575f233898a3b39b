//! Errors carried on the `error` channel of a stream.
//!
//! User closures report failures by returning `Err(e)` where `e` converts into
//! a [`BoxError`]; the operator wraps it in the matching [`RxError`] variant.
//! `map`/`tap` take infallible closures, `try_map`/`try_tap` take closures that
//! return a `Result`.

use std::{error::Error, sync::Arc};

/// The boxed form user errors are converted into.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A cause shared between every observer that receives the same error.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Which stage of a pipeline raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  /// A `try_map` projector returned `Err`.
  ProjectionFailure,
  /// A `try_tap` side effect returned `Err`.
  SideEffectFailure,
  /// The source itself failed.
  UpstreamFailure,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RxError {
  #[error("projection failed: {0}")]
  ProjectionFailure(#[source] SharedError),
  #[error("side effect failed: {0}")]
  SideEffectFailure(#[source] SharedError),
  #[error("upstream failed: {0}")]
  UpstreamFailure(#[source] SharedError),
}

impl RxError {
  pub fn projection(err: impl Into<BoxError>) -> Self { Self::ProjectionFailure(shared(err)) }

  pub fn side_effect(err: impl Into<BoxError>) -> Self { Self::SideEffectFailure(shared(err)) }

  pub fn upstream(err: impl Into<BoxError>) -> Self { Self::UpstreamFailure(shared(err)) }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::ProjectionFailure(_) => ErrorKind::ProjectionFailure,
      Self::SideEffectFailure(_) => ErrorKind::SideEffectFailure,
      Self::UpstreamFailure(_) => ErrorKind::UpstreamFailure,
    }
  }

  /// The underlying cause, whatever the kind.
  pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
    match self {
      Self::ProjectionFailure(e) | Self::SideEffectFailure(e) | Self::UpstreamFailure(e) => {
        e.as_ref()
      }
    }
  }
}

#[inline]
fn shared(err: impl Into<BoxError>) -> SharedError { Arc::from(err.into()) }
