pub mod directory;
pub mod entity;

pub use directory::OutputDirectory;
pub use entity::{Jwks, PublisherEntity};
