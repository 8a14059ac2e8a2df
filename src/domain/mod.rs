//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Port definitions.
pub mod ports;

pub use entities::{ImageDimensions, ImageMetadata, ImageReference, ParsedDescriptor};
pub use ports::{MetadataProviderPort, ProviderError, ProviderResult};
