//! Map service returning a fixed, configured map identifier.

use async_trait::async_trait;
use tracing::debug;

use super::MapService;
use crate::error::Result;

/// Map service backed by a map file that already exists
#[derive(Debug, Clone, Default)]
pub struct StaticMapService {
    map_id: String,
}

impl StaticMapService {
    pub fn new(map_id: impl Into<String>) -> Self {
        Self { map_id: map_id.into() }
    }
}

#[async_trait]
impl MapService for StaticMapService {
    async fn generate_map(&self) -> Result<String> {
        debug!("Using static map '{}'", self.map_id);
        Ok(self.map_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_configured_id() {
        let service = StaticMapService::new("maps/lab.yaml");
        assert_eq!(service.generate_map().await.unwrap(), "maps/lab.yaml");
    }

    #[test]
    fn test_default_is_empty_id() {
        let service = StaticMapService::default();
        let id = tokio_test::block_on(service.generate_map()).unwrap();
        assert!(id.is_empty());
    }
}
