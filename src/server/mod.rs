//! TCP dispatcher: accepts connections and hands each one to its own task.

pub mod handler;
pub mod listener;

pub use handler::{Handler, HandlerError};
pub use listener::Server;
