//! Concrete sink implementations

pub mod console;
pub mod file;
pub mod rotating;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use rotating::RotatingFileSink;
