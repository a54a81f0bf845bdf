use ioc_registry::Registry;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

// 1. Define the abstraction (the trait)
trait Logger {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
trait ReportService {
  fn generate_report(&self);
}

struct PdfReports {
  logger: Rc<dyn Logger>,
}

impl ReportService for PdfReports {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  // Run with RUST_LOG=ioc_registry=trace to watch the registry work.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let mut registry = Registry::new();

  // --- Registration ---
  registry
    .register_singleton(|| -> Rc<dyn Logger> { Rc::new(ConsoleLogger) })
    .unwrap();

  // The producer declares the logger as a parameter; the registry resolves it.
  registry
    .register_singleton(|logger: Rc<dyn Logger>| -> Rc<dyn ReportService> {
      Rc::new(PdfReports { logger })
    })
    .unwrap();

  // --- Resolution and Usage ---
  println!("Resolving the high-level service into a slot...");
  let mut reports: Option<Rc<dyn ReportService>> = None;
  registry.make(&mut reports).unwrap();
  if let Some(reports) = reports {
    reports.generate_report();
  }

  println!("Resolving the same service through a callback...");
  registry
    .make(|reports: Rc<dyn ReportService>, logger: Rc<dyn Logger>| {
      logger.log("Callback received both abstractions.");
      reports.generate_report();
    })
    .unwrap();
}
