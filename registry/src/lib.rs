//! # IoC Registry
//!
//! A small dependency-injection registry for single-threaded application
//! bootstrap code.
//!
//! Application code depends on abstractions (usually `dyn Trait`). The
//! registry maps each abstraction to a producer that knows how to build a
//! concrete for it. Producers may themselves take other abstractions as
//! parameters; those are resolved first, depth-first.
//!
//! ## Core Concepts
//!
//! - **Registry**: the map from abstraction to binding. Created explicitly and
//!   passed around; there is no process-wide instance.
//! - **Producer**: a function or closure with `Rc<_>` parameters returning an
//!   `Rc<_>` (or a tuple of them). Its signature is the binding's contract.
//! - **Lifecycle**: a singleton binding caches its first concrete; a transient
//!   binding builds a new one on every resolution.
//! - **Resolution**: [`Registry::make`] either fills a `&mut Option<Rc<_>>`
//!   slot or calls a callback with every parameter resolved.
//!
//! ## Quick Start
//!
//! ```
//! use ioc_registry::Registry;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! trait Shape {
//!   fn area(&self) -> u32;
//!   fn set_area(&self, area: u32);
//! }
//!
//! struct Circle {
//!   area: Cell<u32>,
//! }
//!
//! impl Shape for Circle {
//!   fn area(&self) -> u32 {
//!     self.area.get()
//!   }
//!   fn set_area(&self, area: u32) {
//!     self.area.set(area);
//!   }
//! }
//!
//! trait Database {
//!   fn describe(&self) -> String;
//! }
//!
//! struct MySql {
//!   shape: Rc<dyn Shape>,
//! }
//!
//! impl Database for MySql {
//!   fn describe(&self) -> String {
//!     format!("mysql storing a shape of area {}", self.shape.area())
//!   }
//! }
//!
//! let mut registry = Registry::new();
//! registry
//!   .register_singleton(|| -> Rc<dyn Shape> { Rc::new(Circle { area: Cell::new(5) }) })
//!   .unwrap();
//! registry
//!   .register_singleton(|shape: Rc<dyn Shape>| -> Rc<dyn Database> { Rc::new(MySql { shape }) })
//!   .unwrap();
//!
//! registry
//!   .make(|db: Rc<dyn Database>| {
//!     assert_eq!(db.describe(), "mysql storing a shape of area 5");
//!   })
//!   .unwrap();
//! ```

#[macro_use]
mod core;
mod error;
#[doc(hidden)]
pub mod marker;
mod macros;
mod producer;
mod receiver;
mod registry;

pub use crate::core::{AbstractionKey, Instance, Lifecycle};
pub use error::{RegistryError, Result};
pub use producer::{Concretes, Dependency, IntoProducer, Producer};
pub use receiver::{Callback, IntoReceiver, Receiver};
pub use registry::Registry;
