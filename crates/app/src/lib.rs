//! Storefront application layer: document store access, catalog state and the session cart.

pub mod config;
pub mod context;
pub mod domain;
pub mod gateway;
pub mod report;

#[cfg(test)]
mod test;
