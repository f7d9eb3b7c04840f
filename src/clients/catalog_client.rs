use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::catalog::CatalogError;
use crate::domain::{Product, ProductCreate, ProductUpdate};

/// Client for the catalog's `ResourceActor<Product>`.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl_resource_client!(CatalogClient, Product, CatalogError, product);

impl CatalogClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(CatalogError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: String,
        update: ProductUpdate,
    ) -> Result<Product, CatalogError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(CatalogError::from)
    }

    /// Stops the catalog actor even while other clones are still held.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        debug!("Sending shutdown request");
        self.inner.shutdown().await.map_err(CatalogError::from)
    }
}
