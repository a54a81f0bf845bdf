use ioc_registry::{resolve, Registry, RegistryError};
use std::panic;
use std::rc::Rc;

trait UnregisteredService {}

fn main() {
  let registry = Registry::new();

  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve an abstraction that was never registered...");

  let result = panic::catch_unwind(|| {
    let registry = Registry::new();
    // This line will panic!
    let _service = resolve!(registry, trait UnregisteredService);
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `make()` entry point ---
  println!("\nNow, attempting to fill a slot through `make()`...");

  let mut slot: Option<Rc<dyn UnregisteredService>> = None;
  match registry.make(&mut slot) {
    Ok(()) => panic!("Should not have found the abstraction!"),
    Err(err @ RegistryError::UnboundAbstraction { .. }) => println!("Correctly failed: {}", err),
    Err(other) => panic!("Unexpected error: {}", other),
  }

  // --- Handing `make()` something that is neither a slot nor a callback ---
  match registry.make("STRING!") {
    Err(err) => println!("Correctly rejected: {}", err),
    Ok(()) => panic!("A string is not a receiver!"),
  }
}
