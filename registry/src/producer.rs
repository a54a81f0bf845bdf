//! Producers: how a concrete is built once its own dependencies are resolved.

use crate::core::{AbstractionKey, Instance, ProduceFn};
use crate::error::{RegistryError, Result};
use crate::marker::NotCallable;
use crate::registry::Registry;
use std::fmt;
use std::rc::Rc;

mod sealed {
  use std::rc::Rc;

  pub trait Sealed {}

  impl<I: ?Sized> Sealed for Rc<I> {}

  macro_rules! seal_tuple {
    ($($name:ident),+) => {
      impl<$($name: ?Sized),+> Sealed for ($(Rc<$name>,)+) {}
    };
  }

  seal_tuple!(A, B);
  seal_tuple!(A, B, C);
  seal_tuple!(A, B, C, D);
}

/// A parameter that can be supplied by the registry.
///
/// Implemented for `Rc<I>`: the parameter asks for whatever concrete is
/// currently bound to the abstraction `I`. This trait is sealed.
///
/// ```compile_fail
/// use ioc_registry::{AbstractionKey, Dependency, Instance};
///
/// struct Port(u16);
///
/// impl Dependency for Port {
///   fn abstraction() -> AbstractionKey {
///     AbstractionKey::of::<u16>()
///   }
///
///   fn from_instance(_instance: &Instance) -> Option<Self> {
///     None
///   }
/// }
/// ```
pub trait Dependency: sealed::Sealed + Sized + 'static {
  fn abstraction() -> AbstractionKey;
  fn from_instance(instance: &Instance) -> Option<Self>;
}

impl<I: ?Sized + 'static> Dependency for Rc<I> {
  fn abstraction() -> AbstractionKey {
    AbstractionKey::of::<I>()
  }

  fn from_instance(instance: &Instance) -> Option<Self> {
    instance.downcast_ref::<Rc<I>>().cloned()
  }
}

/// The value a producer returns.
///
/// A single `Rc<I>` binds `I`. A tuple of `Rc`s binds every element's
/// abstraction to the same producer. This trait is sealed: a binding indexes
/// into `into_instances` by its position in `abstractions`, so the two must
/// always agree.
///
/// ```compile_fail
/// use ioc_registry::{AbstractionKey, Concretes, Instance};
///
/// struct Pair;
///
/// impl Concretes for Pair {
///   fn abstractions() -> Vec<AbstractionKey> {
///     vec![AbstractionKey::of::<u8>(), AbstractionKey::of::<u16>()]
///   }
///
///   fn into_instances(self) -> Vec<Instance> {
///     Vec::new()
///   }
/// }
/// ```
pub trait Concretes: sealed::Sealed + 'static {
  fn abstractions() -> Vec<AbstractionKey>;
  fn into_instances(self) -> Vec<Instance>;
}

impl<I: ?Sized + 'static> Concretes for Rc<I> {
  fn abstractions() -> Vec<AbstractionKey> {
    vec![AbstractionKey::of::<I>()]
  }

  fn into_instances(self) -> Vec<Instance> {
    vec![Rc::new(self) as Instance]
  }
}

macro_rules! impl_concretes_tuple {
  ($($name:ident $var:ident),+) => {
    impl<$($name: ?Sized + 'static),+> Concretes for ($(Rc<$name>,)+) {
      fn abstractions() -> Vec<AbstractionKey> {
        vec![$(AbstractionKey::of::<$name>()),+]
      }

      fn into_instances(self) -> Vec<Instance> {
        let ($($var,)+) = self;
        vec![$(Rc::new($var) as Instance),+]
      }
    }
  };
}

impl_concretes_tuple!(A a, B b);
impl_concretes_tuple!(A a, B b, C c);
impl_concretes_tuple!(A a, B b, C c, D d);

/// An ordered parameter list, resolved left to right.
pub(crate) trait Dependencies: Sized {
  fn abstractions() -> Vec<AbstractionKey>;
  fn resolve(registry: &Registry) -> Result<Self>;
}

impl Dependencies for () {
  fn abstractions() -> Vec<AbstractionKey> {
    Vec::new()
  }

  fn resolve(_registry: &Registry) -> Result<Self> {
    Ok(())
  }
}

macro_rules! impl_dependencies_tuple {
  ($($name:ident),+) => {
    impl<$($name: Dependency),+> Dependencies for ($($name,)+) {
      fn abstractions() -> Vec<AbstractionKey> {
        vec![$($name::abstraction()),+]
      }

      fn resolve(registry: &Registry) -> Result<Self> {
        // Tuple expressions evaluate in order, so the first missing
        // parameter is the one reported.
        Ok(($(registry.dependency::<$name>()?,)+))
      }
    }
  };
}

impl_dependencies_tuple!(A);
impl_dependencies_tuple!(A, B);
impl_dependencies_tuple!(A, B, C);
impl_dependencies_tuple!(A, B, C, D);
impl_dependencies_tuple!(A, B, C, D, E);
impl_dependencies_tuple!(A, B, C, D, E, G);
impl_dependencies_tuple!(A, B, C, D, E, G, H);
impl_dependencies_tuple!(A, B, C, D, E, G, H, J);

/// A registered way of building one or more concretes.
///
/// Usually created implicitly by [`Registry::register_singleton`] or
/// [`Registry::register_transient`], but it can be built up front with
/// [`Producer::new`] to inspect what it declares.
pub struct Producer {
  outputs: Vec<AbstractionKey>,
  dependencies: Vec<AbstractionKey>,
  produce: Rc<ProduceFn>,
}

impl Producer {
  pub fn new<M>(producer: impl IntoProducer<M>) -> Result<Self> {
    producer.into_producer()
  }

  /// The abstractions this producer binds, in return order.
  pub fn outputs(&self) -> &[AbstractionKey] {
    &self.outputs
  }

  /// The abstractions this producer needs, in parameter order.
  pub fn dependencies(&self) -> &[AbstractionKey] {
    &self.dependencies
  }

  pub(crate) fn into_parts(self) -> (Vec<AbstractionKey>, Vec<AbstractionKey>, Rc<ProduceFn>) {
    (self.outputs, self.dependencies, self.produce)
  }
}

impl fmt::Debug for Producer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Producer")
      .field("outputs", &self.outputs)
      .field("dependencies", &self.dependencies)
      .finish_non_exhaustive()
  }
}

/// Conversion into a [`Producer`].
///
/// Implemented for functions and closures of up to eight `Rc<_>` parameters
/// that return a [`Concretes`] value. Plain values also implement it so that
/// handing one to a registration method fails with
/// [`RegistryError::InvalidProducer`] instead of being silently accepted.
pub trait IntoProducer<M> {
  fn into_producer(self) -> Result<Producer>;
}

impl IntoProducer<Producer> for Producer {
  fn into_producer(self) -> Result<Producer> {
    Ok(self)
  }
}

macro_rules! impl_into_producer {
  ($($name:ident $var:ident),*) => {
    impl<F, Out, $($name,)*> IntoProducer<fn($($name,)*) -> Out> for F
    where
      F: Fn($($name),*) -> Out + 'static,
      Out: Concretes,
      $($name: Dependency,)*
    {
      fn into_producer(self) -> Result<Producer> {
        Ok(Producer {
          outputs: Out::abstractions(),
          dependencies: <($($name,)*) as Dependencies>::abstractions(),
          produce: Rc::new(move |registry: &Registry| -> Result<Vec<Instance>> {
            let ($($var,)*) = <($($name,)*) as Dependencies>::resolve(registry)?;
            Ok((self)($($var),*).into_instances())
          }),
        })
      }
    }
  };
}

impl_into_producer!();
impl_into_producer!(A a);
impl_into_producer!(A a, B b);
impl_into_producer!(A a, B b, C c);
impl_into_producer!(A a, B b, C c, D d);
impl_into_producer!(A a, B b, C c, D d, E e);
impl_into_producer!(A a, B b, C c, D d, E e, G g);
impl_into_producer!(A a, B b, C c, D d, E e, G g, H h);
impl_into_producer!(A a, B b, C c, D d, E e, G g, H h, J j);

macro_rules! reject_as_producer {
  ($($ty:ty),* $(,)?) => {
    $(
      impl IntoProducer<NotCallable> for $ty {
        fn into_producer(self) -> Result<Producer> {
          Err(RegistryError::InvalidProducer {
            found: std::any::type_name::<$ty>(),
          })
        }
      }
    )*
  };
}

for_each_plain_value!(reject_as_producer);
