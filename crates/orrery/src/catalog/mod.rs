pub mod bodies;
pub mod manifest;
pub mod registry;
