//! People API endpoints.

use crate::api::OrganizationRef;
use crate::client::SumbleClient;
use crate::error::SumbleResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// People API for searching the people of one organization.
pub struct PeopleApi<'a> {
    client: &'a SumbleClient,
}

impl<'a> PeopleApi<'a> {
    pub(crate) fn new(client: &'a SumbleClient) -> Self {
        Self { client }
    }

    /// Find people working at an organization.
    pub async fn find(&self, request: &FindPeopleRequest) -> SumbleResult<Value> {
        self.client.http.post("people/find", request).await
    }
}

/// Filters for people search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeopleFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_functions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_levels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

/// Request body for `people/find`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindPeopleRequest {
    pub organization: OrganizationRef,
    pub filters: PeopleFilters,
    pub limit: u32,
    pub offset: u32,
}
