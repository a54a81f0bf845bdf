//! The main `Registry` struct and its associated methods.

use crate::core::{AbstractionKey, Binding, Instance, Lifecycle};
use crate::error::{RegistryError, Result};
use crate::producer::{Dependency, IntoProducer, Producer};
use crate::receiver::{Callback, IntoReceiver, ReceiverKind};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

/// A dependency-injection registry.
///
/// Maps each abstraction (usually a `dyn Trait`) to exactly one binding. A
/// binding knows how to produce a concrete `Rc<_>` for its abstraction and
/// whether that concrete is shared (singleton) or rebuilt on every
/// resolution (transient).
///
/// The registry is single-threaded: concretes are `Rc`s and caches are
/// unsynchronized, so it is neither `Send` nor `Sync`. Registration and
/// [`clear`](Registry::clear) need `&mut self`; resolution only needs `&self`.
///
/// # Examples
///
/// ```
/// use ioc_registry::Registry;
/// use std::rc::Rc;
///
/// trait Greeter {
///   fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
///
/// let mut registry = Registry::new();
/// registry
///   .register_singleton(|| -> Rc<dyn Greeter> { Rc::new(English) })
///   .unwrap();
///
/// let mut greeter: Option<Rc<dyn Greeter>> = None;
/// registry.make(&mut greeter).unwrap();
/// assert_eq!(greeter.unwrap().greet(), "Hello!");
///
/// registry
///   .make(|greeter: Rc<dyn Greeter>| assert_eq!(greeter.greet(), "Hello!"))
///   .unwrap();
/// ```
#[derive(Default)]
pub struct Registry {
  bindings: HashMap<AbstractionKey, Binding>,
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty `Registry` with room for `capacity` bindings.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      bindings: HashMap::with_capacity(capacity),
    }
  }

  // --- PRIVATE HELPERS ---

  fn bind(&mut self, producer: Producer, lifecycle: Lifecycle) {
    let (outputs, dependencies, produce) = producer.into_parts();
    for (output, abstraction) in outputs.into_iter().enumerate() {
      let binding = Binding::new(Rc::clone(&produce), output, lifecycle);
      self.insert(abstraction, binding);
      debug!(
        %abstraction,
        ?lifecycle,
        dependencies = dependencies.len(),
        "registered binding"
      );
    }
  }

  fn insert(&mut self, abstraction: AbstractionKey, binding: Binding) {
    if self.bindings.insert(abstraction, binding).is_some() {
      debug!(%abstraction, "replaced existing binding");
    }
  }

  fn unbound(abstraction: AbstractionKey) -> RegistryError {
    // Expected on the `get` and `maybe_resolve!` paths.
    debug!(%abstraction, "no concrete bound");
    RegistryError::UnboundAbstraction {
      abstraction: abstraction.type_name(),
    }
  }

  /// The resolution primitive. `Ok(None)` means nothing is bound to
  /// `abstraction`; an `Err` means a dependency further down was missing.
  pub(crate) fn resolve_key(&self, abstraction: AbstractionKey) -> Result<Option<Instance>> {
    let Some(binding) = self.bindings.get(&abstraction) else {
      return Ok(None);
    };
    if binding.is_cached() {
      trace!(%abstraction, "singleton cache hit");
    } else {
      trace!(%abstraction, lifecycle = ?binding.lifecycle(), "invoking producer");
    }
    binding.instance(self).map(Some)
  }

  /// Resolves one producer or callback parameter.
  pub(crate) fn dependency<D: Dependency>(&self) -> Result<D> {
    let abstraction = D::abstraction();
    self
      .resolve_key(abstraction)?
      .as_ref()
      .and_then(D::from_instance)
      .ok_or_else(|| Self::unbound(abstraction))
  }

  // --- PUBLIC API ---

  // --- Registration ---

  /// Binds every abstraction `producer` returns to it, caching the first
  /// concrete produced for each.
  ///
  /// The producer is not called here; bindings are lazy. A later registration
  /// for the same abstraction replaces this one.
  pub fn register_singleton<M>(&mut self, producer: impl IntoProducer<M>) -> Result<()> {
    self.bind(producer.into_producer()?, Lifecycle::Singleton);
    Ok(())
  }

  /// Binds every abstraction `producer` returns to it, producing a fresh
  /// concrete on every resolution.
  pub fn register_transient<M>(&mut self, producer: impl IntoProducer<M>) -> Result<()> {
    self.bind(producer.into_producer()?, Lifecycle::Transient);
    Ok(())
  }

  /// Binds `I` to an already built concrete.
  pub fn register_singleton_instance<I: ?Sized + 'static>(&mut self, instance: Rc<I>) {
    let abstraction = AbstractionKey::of::<I>();
    self.insert(abstraction, Binding::prebuilt(Rc::new(instance)));
    debug!(%abstraction, "registered singleton instance");
  }

  // --- Reset ---

  /// Drops every binding, and with them every cached singleton.
  pub fn clear(&mut self) {
    let dropped = self.bindings.len();
    self.bindings = HashMap::new();
    debug!(dropped, "cleared registry");
  }

  // --- Introspection ---

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  /// Whether something is bound to `I`. Does not resolve anything.
  pub fn contains<I: ?Sized + 'static>(&self) -> bool {
    self.bindings.contains_key(&AbstractionKey::of::<I>())
  }

  pub fn lifecycle_of<I: ?Sized + 'static>(&self) -> Option<Lifecycle> {
    self
      .bindings
      .get(&AbstractionKey::of::<I>())
      .map(Binding::lifecycle)
  }

  // --- Resolution ---

  /// Resolves into `receiver`, which is either a slot or a callback.
  ///
  /// - `&mut Option<Rc<I>>` is filled with the concrete bound to `I`.
  /// - A closure or function with `Rc<_>` parameters is called with every
  ///   parameter resolved; its return value is discarded.
  /// - An untyped reference (`&mut dyn Any`) fails with
  ///   [`RegistryError::UnresolvableReceiver`].
  /// - Anything else fails with [`RegistryError::InvalidReceiver`].
  pub fn make<'a, M>(&self, receiver: impl IntoReceiver<'a, M>) -> Result<()> {
    match receiver.into_receiver().kind {
      ReceiverKind::Slot { abstraction, fill } => {
        trace!(%abstraction, "filling slot");
        fill(self)
      }
      ReceiverKind::Callback { parameters, call } => {
        trace!(parameters = parameters.len(), "invoking callback");
        call(self)
      }
      ReceiverKind::Untyped => Err(RegistryError::UnresolvableReceiver),
      ReceiverKind::Invalid { found } => Err(RegistryError::InvalidReceiver { found }),
    }
  }

  /// Fills `slot` with the concrete bound to `I`. On failure the slot is left
  /// untouched.
  pub fn fill<I: ?Sized + 'static>(&self, slot: &mut Option<Rc<I>>) -> Result<()> {
    *slot = Some(self.resolve::<I>()?);
    Ok(())
  }

  /// Resolves every parameter of `callback`, then calls it. Nothing is called
  /// if any parameter is unbound.
  pub fn invoke<M>(&self, callback: impl Callback<M>) -> Result<()> {
    callback.call(self)
  }

  /// Resolves the concrete bound to `I`.
  pub fn resolve<I: ?Sized + 'static>(&self) -> Result<Rc<I>> {
    self.dependency::<Rc<I>>()
  }

  /// Resolves the concrete bound to `I`, or `None` if it (or anything it
  /// depends on) is unbound.
  pub fn get<I: ?Sized + 'static>(&self) -> Option<Rc<I>> {
    self.resolve::<I>().ok()
  }
}

impl std::fmt::Debug for Registry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Registry")
      .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
      .finish()
  }
}
