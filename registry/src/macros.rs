//! Public macros for ergonomic resolution.

/// Resolves an abstraction from a registry, panicking if it cannot be resolved.
///
/// Use this at the top of an application, where a missing binding is a
/// wiring bug. For the fallible form, call [`Registry::resolve`](crate::Registry::resolve)
/// or use [`maybe_resolve!`].
///
/// # Panics
///
/// Panics with the name of the missing abstraction if it, or anything its
/// producer depends on, is unbound.
///
/// # Examples
///
/// ```
/// use ioc_registry::{resolve, Registry};
/// use std::rc::Rc;
///
/// trait Greeter { fn greet(&self) -> String; }
/// struct English;
/// impl Greeter for English { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// let mut registry = Registry::new();
/// registry.register_singleton(|| -> Rc<dyn Greeter> { Rc::new(English) }).unwrap();
/// registry.register_singleton(|| Rc::new(String::from("hello"))).unwrap();
///
/// assert_eq!(resolve!(registry, trait Greeter).greet(), "Hello!");
/// assert_eq!(*resolve!(registry, String), "hello");
/// ```
#[macro_export]
macro_rules! resolve {
  // resolve!(registry, trait MyTrait)
  ($registry:expr, trait $trait_ident:ident) => {
    $registry
      .resolve::<dyn $trait_ident>()
      .unwrap_or_else(|err| panic!("Failed to resolve required trait abstraction: {}", err))
  };

  // resolve!(registry, MyType)
  ($registry:expr, $type:ty) => {
    $registry
      .resolve::<$type>()
      .unwrap_or_else(|err| panic!("Failed to resolve required abstraction: {}", err))
  };
}

/// Resolves an abstraction from a registry, returning `None` if it cannot be
/// resolved.
///
/// Accepts the same forms as [`resolve!`].
#[macro_export]
macro_rules! maybe_resolve {
  ($registry:expr, trait $trait_ident:ident) => {
    $registry.get::<dyn $trait_ident>()
  };

  ($registry:expr, $type:ty) => {
    $registry.get::<$type>()
  };
}
