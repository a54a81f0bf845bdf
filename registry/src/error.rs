use thiserror::Error;

/// Errors raised while registering producers or resolving abstractions.
///
/// Every variant describes a wiring mistake rather than a runtime condition,
/// so the registry never retries or recovers from one internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
  #[error("the producer must be a function, found {found}")]
  InvalidProducer { found: &'static str },

  #[error("the receiver must be either a reference or a callback, found {found}")]
  InvalidReceiver { found: &'static str },

  #[error("cannot detect type of the receiver, make sure you are passing a typed reference")]
  UnresolvableReceiver,

  #[error("no concrete found for the abstraction {abstraction}")]
  UnboundAbstraction { abstraction: &'static str },
}

impl RegistryError {
  /// The name of the abstraction that had no binding, if this error is about one.
  pub fn abstraction(&self) -> Option<&'static str> {
    match self {
      RegistryError::UnboundAbstraction { abstraction } => Some(*abstraction),
      _ => None,
    }
  }
}

/// A specialized `Result` type for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
