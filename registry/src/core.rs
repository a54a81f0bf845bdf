//! Core data structures shared by the registry, producers and receivers.

use crate::error::Result;
use crate::registry::Registry;
use once_cell::unsync::OnceCell;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A type-erased concrete.
///
/// The erased value is always an `Rc<I>` for the abstraction `I` it was
/// produced for, so cloning the outer `Rc` shares the same concrete.
pub type Instance = Rc<dyn Any>;

/// A producer with its own dependency resolution baked in. Returns one
/// instance per declared output abstraction, in declaration order.
pub(crate) type ProduceFn = dyn Fn(&Registry) -> Result<Vec<Instance>>;

/// The identity of an abstraction, used as the registry key.
///
/// Equality and hashing only look at the `TypeId`; the type name is carried
/// along for error messages and logs.
#[derive(Clone, Copy)]
pub struct AbstractionKey {
  type_id: TypeId,
  type_name: &'static str,
}

impl AbstractionKey {
  pub fn of<I: ?Sized + 'static>() -> Self {
    Self {
      type_id: TypeId::of::<I>(),
      type_name: std::any::type_name::<I>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

impl PartialEq for AbstractionKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for AbstractionKey {}

impl Hash for AbstractionKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for AbstractionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key(TypeId({:?}), {})", self.type_id, self.type_name)
  }
}

impl fmt::Display for AbstractionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.type_name)
  }
}

/// How long a produced concrete lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
  /// The first produced concrete is cached and handed out on every resolution.
  Singleton,
  /// Every resolution runs the producer again.
  Transient,
}

/// One registry entry: where an abstraction's concrete comes from, and how
/// long it lives.
pub(crate) struct Binding {
  source: Source,
  lifecycle: Lifecycle,
}

enum Source {
  /// Output `output` of a shared producer. Singletons keep the first result
  /// in `cached`.
  Producer {
    produce: Rc<ProduceFn>,
    output: usize,
    cached: OnceCell<Instance>,
  },
  /// A concrete handed over already built.
  Prebuilt(Instance),
}

impl Binding {
  pub(crate) fn new(produce: Rc<ProduceFn>, output: usize, lifecycle: Lifecycle) -> Self {
    Self {
      source: Source::Producer {
        produce,
        output,
        cached: OnceCell::new(),
      },
      lifecycle,
    }
  }

  /// A singleton binding with no producer behind it.
  pub(crate) fn prebuilt(instance: Instance) -> Self {
    Self {
      source: Source::Prebuilt(instance),
      lifecycle: Lifecycle::Singleton,
    }
  }

  pub(crate) fn lifecycle(&self) -> Lifecycle {
    self.lifecycle
  }

  pub(crate) fn is_cached(&self) -> bool {
    match &self.source {
      Source::Producer { cached, .. } => cached.get().is_some(),
      Source::Prebuilt(_) => true,
    }
  }

  /// Returns the cached concrete, or runs the producer (resolving its
  /// dependencies through `registry`) and caches the result for singletons.
  pub(crate) fn instance(&self, registry: &Registry) -> Result<Instance> {
    let (produce, output, cached) = match &self.source {
      Source::Prebuilt(instance) => return Ok(Rc::clone(instance)),
      Source::Producer {
        produce,
        output,
        cached,
      } => (produce, *output, cached),
    };
    if let Some(instance) = cached.get() {
      return Ok(Rc::clone(instance));
    }

    let mut outputs = produce(registry)?;
    // `Concretes` is sealed, so every producer returns exactly one instance
    // per declared output.
    let instance = outputs.swap_remove(output);

    match self.lifecycle {
      Lifecycle::Singleton => Ok(Rc::clone(cached.get_or_init(|| instance))),
      Lifecycle::Transient => Ok(instance),
    }
  }
}

/// Expands `$mac!` with every plain value type that is neither a callable nor
/// a reference slot. Registration and resolution both reject these.
macro_rules! for_each_plain_value {
  ($mac:ident) => {
    $mac!(
      &str, String, bool, char, (), i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
      usize, f32, f64,
    );
  };
}
