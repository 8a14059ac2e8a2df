mod metadata_provider_port;

pub use metadata_provider_port::{MetadataProviderPort, ProviderError, ProviderResult};
