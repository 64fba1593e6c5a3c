#[cfg(test)]
#[path = "list_store_test.rs"]
mod tests;

use tokio::sync::watch;

use super::CommentClient;
use super::TaskClient;
use crate::domain::models::Failure;
use crate::domain::models::ResourceClient;

#[derive(Clone, Debug, PartialEq)]
pub struct ListState<S, E> {
    pub scope: S,
    pub items: Vec<E>,
    pub is_loading: bool,
    pub pending_mutations: usize,
}

impl<S, E> ListState<S, E> {
    pub fn is_saving(&self) -> bool {
        return self.pending_mutations > 0;
    }
}

/// Outcome of the refetch that follows a successful mutation. The mutation
/// itself went through either way; `Failed` means the held collection is now
/// behind the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Refetch {
    Done,
    Failed(Failure),
}

/// Holds one resource family's collection for a scope key. The collection is
/// only ever replaced wholesale by a successful `list`, and `scope` always
/// names the scope the held collection was fetched for. Mutations are sent to
/// the server and followed by a full refetch, nothing is merged locally.
///
/// Overlapping refreshes are not sequenced: whichever `list` answer arrives
/// last wins.
pub struct ListStore<C: ResourceClient> {
    client: C,
    state: watch::Sender<ListState<C::Scope, C::Entity>>,
}

pub type TaskStore = ListStore<TaskClient>;
pub type CommentStore = ListStore<CommentClient>;

impl<C: ResourceClient> ListStore<C> {
    pub fn new(client: C, scope: C::Scope) -> ListStore<C> {
        let (state, _) = watch::channel(ListState {
            scope,
            items: vec![],
            is_loading: false,
            pending_mutations: 0,
        });

        return ListStore { client, state };
    }

    pub fn snapshot(&self) -> ListState<C::Scope, C::Entity> {
        return self.state.borrow().clone();
    }

    pub fn is_loading(&self) -> bool {
        return self.state.borrow().is_loading;
    }

    pub fn is_saving(&self) -> bool {
        return self.state.borrow().is_saving();
    }

    pub fn scope(&self) -> C::Scope {
        return self.state.borrow().scope.clone();
    }

    /// Receives a notification every time the state changes.
    pub fn subscribe(&self) -> watch::Receiver<ListState<C::Scope, C::Entity>> {
        return self.state.subscribe();
    }

    /// Fetches `scope` and, on success, switches to it and replaces the
    /// collection with the server's. On failure both the previous scope and
    /// its items stay in place. `is_loading` is cleared either way.
    pub async fn refresh(&self, scope: C::Scope) -> Result<(), Failure> {
        self.state.send_modify(|state| {
            state.is_loading = true;
        });

        match self.client.list(&scope).await {
            Ok(payload) => {
                let items = payload.into_items();
                tracing::debug!(scope = ?scope, count = items.len(), "List refreshed");
                self.state.send_modify(|state| {
                    state.scope = scope;
                    state.items = items;
                    state.is_loading = false;
                });

                return Ok(());
            }
            Err(err) => {
                tracing::error!(scope = ?scope, error = ?err, "Failed to refresh list");
                self.state.send_modify(|state| {
                    state.is_loading = false;
                });

                return Err(err);
            }
        }
    }

    pub async fn reload(&self) -> Result<(), Failure> {
        return self.refresh(self.scope()).await;
    }

    pub async fn create(&self, params: C::CreateParams) -> Result<Refetch, Failure> {
        let scope = self.scope();
        self.begin_mutation();
        let res = self.client.create(&scope, params).await;
        self.end_mutation();

        return self.after_mutation("create", scope, res.map(|_| return ())).await;
    }

    pub async fn update(&self, id: &str, params: C::UpdateParams) -> Result<Refetch, Failure> {
        let scope = self.scope();
        self.begin_mutation();
        let res = self.client.update(&scope, id, params).await;
        self.end_mutation();

        return self.after_mutation("update", scope, res.map(|_| return ())).await;
    }

    /// Deletes without asking. Confirming with the user is the caller's job.
    pub async fn delete(&self, id: &str) -> Result<Refetch, Failure> {
        let scope = self.scope();
        self.begin_mutation();
        let res = self.client.delete(&scope, id).await;
        self.end_mutation();

        return self.after_mutation("delete", scope, res).await;
    }

    fn begin_mutation(&self) {
        self.state.send_modify(|state| {
            state.pending_mutations += 1;
        });
    }

    fn end_mutation(&self) {
        self.state.send_modify(|state| {
            state.pending_mutations = state.pending_mutations.saturating_sub(1);
        });
    }

    async fn after_mutation(
        &self,
        operation: &str,
        scope: C::Scope,
        res: Result<(), Failure>,
    ) -> Result<Refetch, Failure> {
        if let Err(err) = res {
            tracing::error!(operation = operation, scope = ?scope, error = ?err, "Mutation failed");
            return Err(err);
        }

        // The mutation is committed server side, a failed refetch must not be
        // reported as a failed mutation.
        match self.refresh(scope).await {
            Ok(()) => return Ok(Refetch::Done),
            Err(err) => return Ok(Refetch::Failed(err)),
        }
    }
}
