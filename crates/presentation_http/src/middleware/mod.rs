//! HTTP middleware components

pub mod validation;

pub use validation::ValidatedJson;
