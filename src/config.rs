use serde::{Deserialize, Serialize};

/// Access configuration for the external map-tile provider.
///
/// The token is an opaque value handed to the embedding map widget; the core
/// never validates, transmits, or interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapProviderConfig {
    pub access_token: String,
}

impl MapProviderConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        MapProviderConfig {
            access_token: access_token.into(),
        }
    }
}
