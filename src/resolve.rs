//! Metadata resolution: remote lookup, filename fallback, directory overrides.

mod heuristic;
mod resolver;

pub use resolver::{Resolver, Seed};
