//! MongoDB repository implementation.

use async_trait::async_trait;
use mongodb::{
    bson::{self, doc, Bson, Document},
    Collection, Database,
};
use uuid::Uuid;

use storefront_core::cart::{Cart, CartMutation};
use storefront_core::storage::{CartRepository, RepositoryError, Result};

use super::conversions::{cart_to_document, document_to_cart, CartDocument};
use super::error::{is_duplicate_key, map_mongo_error};

const CARTS_COLLECTION: &str = "carts";

/// Attempts at a compare-and-swap update before giving up with `Conflict`.
const MAX_UPDATE_ATTEMPTS: usize = 16;

/// Filter matching a cart only while it is still at `version`.
///
/// Documents written before versioning have no `version` field and count as 0.
fn version_filter(id: &str, version: i64) -> Document {
    if version == 0 {
        doc! { "_id": id, "version": { "$in": [0_i64, Bson::Null] } }
    } else {
        doc! { "_id": id, "version": version }
    }
}

/// Cart storage backed by the shared MongoDB handle.
#[derive(Debug, Clone)]
pub struct MongoCartRepository {
    database: Database,
    carts: Collection<CartDocument>,
}

impl MongoCartRepository {
    pub fn new(database: Database) -> Self {
        let carts = database.collection(CARTS_COLLECTION);
        Self { database, carts }
    }

    async fn find_document(&self, id: &str) -> Result<Option<CartDocument>> {
        self.carts
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_mongo_error)
    }
}

#[async_trait]
impl CartRepository for MongoCartRepository {
    async fn get_cart(&self, id: Uuid) -> Result<Option<Cart>> {
        self.find_document(&id.to_string())
            .await?
            .map(document_to_cart)
            .transpose()
    }

    async fn save_cart(&self, cart: &Cart) -> Result<()> {
        let items =
            bson::to_bson(&cart.items).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        self.carts
            .update_one(
                doc! { "_id": cart.id.to_string() },
                doc! { "$set": { "items": items }, "$inc": { "version": 1_i64 } },
            )
            .upsert(true)
            .await
            .map_err(map_mongo_error)?;

        tracing::debug!(cart_id = %cart.id, items = cart.items.len(), "Cart saved");
        Ok(())
    }

    async fn update_cart(&self, id: Uuid, mutation: CartMutation) -> Result<Cart> {
        let id_str = id.to_string();

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            match self.find_document(&id_str).await? {
                Some(document) => {
                    let version = document.version;
                    let updated = mutation.clone().apply(document_to_cart(document)?)?;

                    let result = self
                        .carts
                        .replace_one(
                            version_filter(&id_str, version),
                            cart_to_document(&updated, version + 1),
                        )
                        .await
                        .map_err(map_mongo_error)?;

                    if result.matched_count == 1 {
                        return Ok(updated);
                    }
                }
                None if mutation.creates_cart() => {
                    let updated = mutation.clone().apply(Cart::with_id(id))?;

                    match self.carts.insert_one(cart_to_document(&updated, 1)).await {
                        Ok(_) => return Ok(updated),
                        Err(err) if is_duplicate_key(&err) => {}
                        Err(err) => return Err(map_mongo_error(err)),
                    }
                }
                None => {
                    return Err(RepositoryError::NotFound {
                        entity_type: "Cart",
                        id: id_str,
                    })
                }
            }

            tracing::debug!(cart_id = %id, attempt, "Cart changed during update, retrying");
        }

        Err(RepositoryError::Conflict(format!(
            "cart {id} changed {MAX_UPDATE_ATTEMPTS} times during update"
        )))
    }

    async fn delete_cart(&self, id: Uuid) -> Result<()> {
        let result = self
            .carts
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_mongo_error)?;

        if result.deleted_count == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Cart",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        crate::db::ping(&self.database).await.map_err(|e| match e {
            crate::db::DbError::Driver(err) => map_mongo_error(err),
            other => RepositoryError::ConnectionFailed(other.to_string()),
        })
    }
}
