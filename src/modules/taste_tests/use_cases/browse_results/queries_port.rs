// What the results pipeline needs from a data source. Visibility rules belong to the source.

use crate::modules::taste_tests::core::record::TasteTestRecord;
use crate::modules::taste_tests::core::taxonomy::Taxonomy;
use async_trait::async_trait;

#[async_trait]
pub trait TasteTestQueries: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<TasteTestRecord>>;

    async fn list_by_user(&self, user_id: &str) -> anyhow::Result<Vec<TasteTestRecord>>;

    async fn property_taxonomy(&self) -> anyhow::Result<Taxonomy>;

    async fn flavor_taxonomy(&self) -> anyhow::Result<Taxonomy>;
}
