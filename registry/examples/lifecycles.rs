use ioc_registry::{resolve, Registry};
use std::cell::Cell;
use std::rc::Rc;

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// Two abstractions over the same tracker, so each can get its own lifecycle.
struct SingletonTracker(RequestTracker);
struct TransientTracker(RequestTracker);

fn main() {
  let ids = Rc::new(Cell::new(0));
  let mut registry = Registry::new();

  // --- Singleton Registration ---
  // This producer will only be called ONCE.
  let next = ids.clone();
  registry
    .register_singleton(move || {
      println!("Creating SINGLETON RequestTracker...");
      let id = next.replace(next.get() + 1);
      Rc::new(SingletonTracker(RequestTracker { id }))
    })
    .unwrap();

  // --- Transient Registration ---
  // This producer will be called EVERY time the abstraction is resolved.
  let next = ids.clone();
  registry
    .register_transient(move || {
      println!("Creating TRANSIENT RequestTracker...");
      let id = next.replace(next.get() + 1);
      Rc::new(TransientTracker(RequestTracker { id }))
    })
    .unwrap();

  println!("--- Resolving Singletons ---");
  let s1 = resolve!(registry, SingletonTracker);
  let s2 = resolve!(registry, SingletonTracker);
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.0.id, s2.0.id);
  assert!(Rc::ptr_eq(&s1, &s2), "Singleton instances should be identical");
  println!("Singleton instances are the same pointer, as expected.\n");

  println!("--- Resolving Transients ---");
  let t1 = resolve!(registry, TransientTracker);
  let t2 = resolve!(registry, TransientTracker);
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.0.id, t2.0.id);
  assert_eq!(t1.0.id, 1);
  assert_eq!(t2.0.id, 2);
  assert!(!Rc::ptr_eq(&t1, &t2), "Transient instances should be different");
  println!("Transient instances are different pointers, as expected.");
}
