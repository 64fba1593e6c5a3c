#[cfg(test)]
#[path = "task_client_test.rs"]
mod tests;

use async_trait::async_trait;

use super::GatewayRef;
use crate::domain::models::CreateTaskParams;
use crate::domain::models::Failure;
use crate::domain::models::ListPayload;
use crate::domain::models::ResourceClient;
use crate::domain::models::Task;
use crate::domain::models::TaskScope;
use crate::domain::models::UpdateTaskParams;
use crate::domain::models::Validate;

fn require_id(id: &str, field: &str) -> Result<(), Failure> {
    if id.trim().is_empty() {
        return Err(Failure::validation_gap(field));
    }

    return Ok(());
}

pub struct TaskClient {
    gateway: GatewayRef,
}

impl TaskClient {
    pub fn new(gateway: GatewayRef) -> TaskClient {
        return TaskClient { gateway };
    }
}

#[async_trait]
impl ResourceClient for TaskClient {
    type Scope = TaskScope;
    type Entity = Task;
    type CreateParams = CreateTaskParams;
    type UpdateParams = UpdateTaskParams;

    #[allow(clippy::implicit_return)]
    async fn list(&self, scope: &TaskScope) -> Result<ListPayload<Task>, Failure> {
        scope.validate()?;
        let body = self.gateway.get(&scope.path()).await?;
        return ListPayload::decode(body);
    }

    #[allow(clippy::implicit_return)]
    async fn create(&self, scope: &TaskScope, params: CreateTaskParams) -> Result<Task, Failure> {
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
        scope: &TaskScope,
        id: &str,
        params: UpdateTaskParams,
    ) -> Result<Task, Failure> {
        scope.validate()?;
        require_id(id, "task_id")?;
        params.validate()?;
        let body = self
            .gateway
            .patch(
                &format!("{}/{id}", scope.path()),
                serde_json::to_value(&params)?,
            )
            .await?;
        return Ok(serde_json::from_value(body)?);
    }

    #[allow(clippy::implicit_return)]
    async fn delete(&self, scope: &TaskScope, id: &str) -> Result<(), Failure> {
        scope.validate()?;
        require_id(id, "task_id")?;
        self.gateway.delete(&format!("{}/{id}", scope.path())).await?;
        return Ok(());
    }
}
