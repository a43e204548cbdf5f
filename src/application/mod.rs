//! Wires the seed configuration, the interpreter and the console together.

mod application;
mod console;
pub mod data;
mod runtime_config;

pub use application::{Application, ApplicationError};
pub use runtime_config::RuntimeConfig;
