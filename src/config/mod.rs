mod seed;

pub use seed::{SeedError, SeedHierarchy};
