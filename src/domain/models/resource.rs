use std::fmt::Debug;

use async_trait::async_trait;

use super::Failure;
use super::ListPayload;

/// Client-side required-field check. Everything beyond field presence is the
/// server's call.
pub trait Validate {
    fn validate(&self) -> Result<(), Failure>;
}

/// Typed CRUD over one resource family, bounded by a scope key.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    type Scope: Clone + Debug + PartialEq + Send + Sync;
    type Entity: Clone + Debug + Send + Sync;
    type CreateParams: Send + Sync;
    type UpdateParams: Send + Sync;

    /// Fetches the whole collection for `scope`. The payload is decoded but
    /// not yet unwrapped, the caller decides what to do with the envelope.
    async fn list(&self, scope: &Self::Scope) -> Result<ListPayload<Self::Entity>, Failure>;

    async fn create(
        &self,
        scope: &Self::Scope,
        params: Self::CreateParams,
    ) -> Result<Self::Entity, Failure>;

    async fn update(
        &self,
        scope: &Self::Scope,
        id: &str,
        params: Self::UpdateParams,
    ) -> Result<Self::Entity, Failure>;

    async fn delete(&self, scope: &Self::Scope, id: &str) -> Result<(), Failure>;
}
