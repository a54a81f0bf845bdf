//! Receivers: the things [`Registry::make`] can resolve into.

use crate::core::AbstractionKey;
use crate::error::Result;
use crate::marker::{Fill, Invoke, NotCallable, Untyped};
use crate::producer::{Dependencies, Dependency};
use crate::registry::Registry;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

type Resolution<'a> = Box<dyn FnOnce(&Registry) -> Result<()> + 'a>;

pub(crate) enum ReceiverKind<'a> {
  Slot {
    abstraction: AbstractionKey,
    fill: Resolution<'a>,
  },
  Callback {
    parameters: Vec<AbstractionKey>,
    call: Resolution<'a>,
  },
  Untyped,
  Invalid {
    found: &'static str,
  },
}

/// A value handed to [`Registry::make`], classified by what it is.
///
/// Build one through [`IntoReceiver`]; `make` does that for you.
pub struct Receiver<'a> {
  pub(crate) kind: ReceiverKind<'a>,
}

impl<'a> Receiver<'a> {
  /// A slot to be filled with the concrete bound to `I`.
  pub fn slot<I: ?Sized + 'static>(slot: &'a mut Option<Rc<I>>) -> Self {
    Self {
      kind: ReceiverKind::Slot {
        abstraction: AbstractionKey::of::<I>(),
        fill: Box::new(move |registry: &Registry| registry.fill(slot)),
      },
    }
  }

  /// A callback whose parameters are resolved and passed in.
  pub fn callback<M, C: Callback<M> + 'a>(callback: C) -> Self {
    Self {
      kind: ReceiverKind::Callback {
        parameters: C::parameters(),
        call: Box::new(move |registry: &Registry| callback.call(registry)),
      },
    }
  }

  /// A reference whose pointee type is unknown.
  pub fn untyped() -> Self {
    Self {
      kind: ReceiverKind::Untyped,
    }
  }

  /// A value that is neither a slot nor a callback.
  pub fn invalid<T: ?Sized>() -> Self {
    Self {
      kind: ReceiverKind::Invalid {
        found: std::any::type_name::<T>(),
      },
    }
  }
}

impl fmt::Debug for Receiver<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      ReceiverKind::Slot { abstraction, .. } => {
        f.debug_struct("Slot").field("abstraction", abstraction).finish()
      }
      ReceiverKind::Callback { parameters, .. } => {
        f.debug_struct("Callback").field("parameters", parameters).finish()
      }
      ReceiverKind::Untyped => f.write_str("Untyped"),
      ReceiverKind::Invalid { found } => f.debug_struct("Invalid").field("found", found).finish(),
    }
  }
}

/// Conversion into a [`Receiver`].
pub trait IntoReceiver<'a, M> {
  fn into_receiver(self) -> Receiver<'a>;
}

impl<'a> IntoReceiver<'a, Receiver<'a>> for Receiver<'a> {
  fn into_receiver(self) -> Receiver<'a> {
    self
  }
}

impl<'a, I: ?Sized + 'static> IntoReceiver<'a, Fill> for &'a mut Option<Rc<I>> {
  fn into_receiver(self) -> Receiver<'a> {
    Receiver::slot(self)
  }
}

impl<'a, M, C: Callback<M> + 'a> IntoReceiver<'a, Invoke<M>> for C {
  fn into_receiver(self) -> Receiver<'a> {
    Receiver::callback(self)
  }
}

impl<'a> IntoReceiver<'a, Untyped> for &'a mut dyn Any {
  fn into_receiver(self) -> Receiver<'a> {
    Receiver::untyped()
  }
}

impl<'a> IntoReceiver<'a, Untyped> for &'a dyn Any {
  fn into_receiver(self) -> Receiver<'a> {
    Receiver::untyped()
  }
}

macro_rules! reject_as_receiver {
  ($($ty:ty),* $(,)?) => {
    $(
      impl<'a> IntoReceiver<'a, NotCallable> for $ty {
        fn into_receiver(self) -> Receiver<'a> {
          Receiver::invalid::<$ty>()
        }
      }
    )*
  };
}

for_each_plain_value!(reject_as_receiver);

/// A function whose parameters are all supplied by the registry.
///
/// Implemented for `FnOnce` closures and functions of up to eight `Rc<_>`
/// parameters. The return value is discarded.
pub trait Callback<M> {
  /// The abstractions this callback asks for, in parameter order.
  fn parameters() -> Vec<AbstractionKey>
  where
    Self: Sized;

  /// Resolves every parameter, then calls the callback.
  fn call(self, registry: &Registry) -> Result<()>;
}

macro_rules! impl_callback {
  ($($name:ident $var:ident),*) => {
    impl<F, R, $($name,)*> Callback<fn($($name,)*) -> R> for F
    where
      F: FnOnce($($name),*) -> R,
      $($name: Dependency,)*
    {
      fn parameters() -> Vec<AbstractionKey> {
        <($($name,)*) as Dependencies>::abstractions()
      }

      fn call(self, registry: &Registry) -> Result<()> {
        let ($($var,)*) = <($($name,)*) as Dependencies>::resolve(registry)?;
        let _ = (self)($($var),*);
        Ok(())
      }
    }
  };
}

impl_callback!();
impl_callback!(A a);
impl_callback!(A a, B b);
impl_callback!(A a, B b, C c);
impl_callback!(A a, B b, C c, D d);
impl_callback!(A a, B b, C c, D d, E e);
impl_callback!(A a, B b, C c, D d, E e, G g);
impl_callback!(A a, B b, C c, D d, E e, G g, H h);
impl_callback!(A a, B b, C c, D d, E e, G g, H h, J j);
