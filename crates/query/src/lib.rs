pub mod ast;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod fragment;
pub mod renderer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
