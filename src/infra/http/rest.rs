use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::entities::mutation::Mutation;
use crate::domain::entities::table::ManagedRow;
use crate::infra::http::client::RestClient;
use crate::usecase::ports::source::{MutationPort, RowSource, SourceError};

/// Lists `GET /{R::RESOURCE}`.
pub struct RestRowSource<R> {
    client: Arc<RestClient>,
    _row: PhantomData<fn() -> R>,
}

impl<R> RestRowSource<R> {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self {
            client,
            _row: PhantomData,
        }
    }
}

#[async_trait]
impl<R> RowSource<R> for RestRowSource<R>
where
    R: ManagedRow + DeserializeOwned + Send,
{
    async fn fetch_all(&self) -> Result<Vec<R>, SourceError> {
        self.client.get_json::<Vec<R>>(R::RESOURCE).await
    }
}

pub struct RestMutations {
    client: Arc<RestClient>,
}

impl RestMutations {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MutationPort for RestMutations {
    async fn apply(&self, mutation: &Mutation) -> Result<(), SourceError> {
        let client = &self.client;
        match mutation {
            Mutation::Assign {
                equipment,
                employee,
            } => {
                let body = json!({ "employeeId": employee.0 });
                client
                    .send_json(
                        Method::POST,
                        &format!("equipment/{equipment}/assign"),
                        Some(&body),
                    )
                    .await
            }
            Mutation::Unassign { equipment } => {
                client
                    .send_json(
                        Method::POST,
                        &format!("equipment/{equipment}/unassign"),
                        None::<&()>,
                    )
                    .await
            }
            Mutation::Suspend {
                employee,
                suspended,
            } => {
                let verb = if *suspended { "suspend" } else { "unsuspend" };
                client
                    .send_json(
                        Method::POST,
                        &format!("employees/{employee}/{verb}"),
                        None::<&()>,
                    )
                    .await
            }
            Mutation::Delete { resource, id } => client.delete(&format!("{resource}/{id}")).await,
            Mutation::Edit {
                resource,
                id,
                changes,
            } => {
                client
                    .send_json(Method::PUT, &format!("{resource}/{id}"), Some(changes))
                    .await
            }
            Mutation::SetLeaveStatus { id, status } => {
                let body = json!({ "status": status });
                client
                    .send_json(
                        Method::PATCH,
                        &format!("leave-requests/{id}/status"),
                        Some(&body),
                    )
                    .await
            }
        }
    }
}
