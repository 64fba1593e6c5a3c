#[cfg(test)]
#[path = "comment_client_test.rs"]
mod tests;

use async_trait::async_trait;

use super::GatewayRef;
use crate::domain::models::Comment;
use crate::domain::models::CommentScope;
use crate::domain::models::CreateCommentParams;
use crate::domain::models::Failure;
use crate::domain::models::ListPayload;
use crate::domain::models::ResourceClient;
use crate::domain::models::UpdateCommentParams;
use crate::domain::models::Validate;

pub struct CommentClient {
    gateway: GatewayRef,
}

impl CommentClient {
    pub fn new(gateway: GatewayRef) -> CommentClient {
        return CommentClient { gateway };
    }

    fn item_path(scope: &CommentScope, id: &str) -> Result<String, Failure> {
        if id.trim().is_empty() {
            return Err(Failure::validation_gap("comment_id"));
        }

        return Ok(format!("{}/{id}", scope.path()));
    }
}

#[async_trait]
impl ResourceClient for CommentClient {
    type Scope = CommentScope;
    type Entity = Comment;
    type CreateParams = CreateCommentParams;
    type UpdateParams = UpdateCommentParams;

    #[allow(clippy::implicit_return)]
    async fn list(&self, scope: &CommentScope) -> Result<ListPayload<Comment>, Failure> {
        scope.validate()?;
        let body = self.gateway.get(&scope.path()).await?;
        return ListPayload::decode(body);
    }

    #[allow(clippy::implicit_return)]
    async fn create(
        &self,
        scope: &CommentScope,
        params: CreateCommentParams,
    ) -> Result<Comment, Failure> {
        scope.validate()?;
        params.validate()?;
        let body = self
            .gateway
            .post(&scope.path(), serde_json::to_value(&params)?)
            .await?;
        return Ok(serde_json::from_value(body)?);
    }

    #[allow(clippy::implicit_return)]
    async fn update(
        &self,
        scope: &CommentScope,
        id: &str,
        params: UpdateCommentParams,
    ) -> Result<Comment, Failure> {
        scope.validate()?;
        let path = CommentClient::item_path(scope, id)?;
        params.validate()?;
        let body = self
            .gateway
            .patch(&path, serde_json::to_value(&params)?)
            .await?;
        return Ok(serde_json::from_value(body)?);
    }

    #[allow(clippy::implicit_return)]
    async fn delete(&self, scope: &CommentScope, id: &str) -> Result<(), Failure> {
        scope.validate()?;
        let path = CommentClient::item_path(scope, id)?;
        self.gateway.delete(&path).await?;
        return Ok(());
    }
}
