//! Jobs API endpoints.

use crate::api::OrganizationRef;
use crate::client::SumbleClient;
use crate::error::SumbleResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Jobs API for searching job postings.
pub struct JobsApi<'a> {
    client: &'a SumbleClient,
}

impl<'a> JobsApi<'a> {
    pub(crate) fn new(client: &'a SumbleClient) -> Self {
        Self { client }
    }

    /// Find job postings, optionally scoped to one organization.
    pub async fn find(&self, request: &FindJobsRequest) -> SumbleResult<Value> {
        self.client.http.post("jobs/find", request).await
    }
}

/// Filters for job search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

/// Request body for `jobs/find`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindJobsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationRef>,
    pub filters: JobFilters,
    pub limit: u32,
    pub offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unscoped_request_has_no_organization() {
        let request = FindJobsRequest {
            organization: None,
            filters: JobFilters {
                countries: Some(vec!["US".into()]),
                ..Default::default()
            },
            limit: 20,
            offset: 0,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("organization").is_none());
        assert_eq!(value["filters"], json!({"countries": ["US"]}));
    }

    #[test]
    fn test_scoped_request() {
        let request = FindJobsRequest {
            organization: Some(OrganizationRef::Slug("acme".into())),
            filters: JobFilters::default(),
            limit: 10,
            offset: 30,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "organization": {"slug": "acme"},
                "filters": {},
                "limit": 10,
                "offset": 30
            })
        );
    }
}
