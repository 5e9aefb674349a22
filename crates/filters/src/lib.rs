//! Compiles human-typed filter expressions such as
//! `>=10 & <100 | "exact" | #contains# | /regex/` into condition trees with
//! bound parameters.

pub mod chain;
pub mod compiler;
pub mod config;
pub mod error;
pub mod strategy;
pub mod tokenizer;

pub use compiler::Compiler;
pub use config::{ConfigOverrides, FilterConfig, StrategyDescriptor};
pub use error::{ConfigError, FilterError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
