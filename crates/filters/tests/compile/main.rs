//! End-to-end compilation tests
//!
//! These tests compile filter expressions with the default registries and
//! check the rendered SQL and bound parameters.

mod common;
mod dialects;
mod expressions;
mod negation;
mod regex;
