//! Catalog service for the storefront listing and admin inventory edits.

use common::FruitId;
use store::{Fruit, Store, StoreExt};

use crate::error::DomainError;

use super::{CreateFruit, SetFruitStock};

/// Service for reading and editing the fruit catalog.
pub struct CatalogService<S: Store> {
    store: S,
}

impl<S: Store> CatalogService<S> {
    /// Creates a new catalog service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists every fruit, ordered by id.
    #[tracing::instrument(skip(self))]
    pub async fn list_fruits(&self) -> Result<Vec<Fruit>, DomainError> {
        Ok(self.store.list_fruits().await?)
    }

    /// Loads a single fruit.
    #[tracing::instrument(skip(self))]
    pub async fn get_fruit(&self, id: FruitId) -> Result<Fruit, DomainError> {
        Ok(self.store.require_fruit(id).await?)
    }

    /// Adds a fruit to the catalog.
    #[tracing::instrument(skip(self))]
    pub async fn create_fruit(&self, cmd: CreateFruit) -> Result<Fruit, DomainError> {
        cmd.validate()?;
        let fruit = self.store.create_fruit(cmd.into_new_fruit()).await?;
        tracing::info!(fruit_id = %fruit.id, name = %fruit.name, "fruit created");
        Ok(fruit)
    }

    /// Overwrites a fruit's stock count.
    #[tracing::instrument(skip(self))]
    pub async fn set_fruit_stock(&self, cmd: SetFruitStock) -> Result<Fruit, DomainError> {
        cmd.validate()?;
        let fruit = self
            .store
            .set_fruit_stock(cmd.fruit_id, cmd.stock)
            .await?;
        metrics::gauge!("fruit_stock", "fruit" => fruit.name.clone()).set(fruit.stock as f64);
        tracing::info!(fruit_id = %fruit.id, stock = fruit.stock, "stock updated");
        Ok(fruit)
    }
}
