pub mod console_logger;
pub mod order_repository;

pub use console_logger::ConsoleLogger;
pub use order_repository::InMemoryOrderRepository;
