//! Organizations API endpoints.

use crate::client::SumbleClient;
use crate::error::SumbleResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Organizations API for searching and enriching organizations.
pub struct OrganizationsApi<'a> {
    client: &'a SumbleClient,
}

impl<'a> OrganizationsApi<'a> {
    pub(crate) fn new(client: &'a SumbleClient) -> Self {
        Self { client }
    }

    /// Find organizations matching technology filters or a query.
    pub async fn find(&self, request: &FindOrganizationsRequest) -> SumbleResult<Value> {
        self.client.http.post("organizations/find", request).await
    }

    /// Enrich a single organization with its technology usage.
    pub async fn enrich(&self, request: &EnrichOrganizationRequest) -> SumbleResult<Value> {
        self.client.http.post("organizations/enrich", request).await
    }
}

/// Identifies one organization. Serializes as a single-key object such as
/// `{"domain": "sumble.com"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationRef {
    Domain(String),
    Id(u64),
    Slug(String),
}

/// Sort direction for organization search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

/// Filters shared by organization search and enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

/// Request body for `organizations/find`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindOrganizationsRequest {
    pub filters: OrganizationFilters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_direction: Option<OrderDirection>,
    pub limit: u32,
    pub offset: u32,
}

/// Request body for `organizations/enrich`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichOrganizationRequest {
    pub organization: OrganizationRef,
    pub filters: OrganizationFilters,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_organization_ref_wire_shape() {
        assert_eq!(
            serde_json::to_value(OrganizationRef::Domain("sumble.com".into())).unwrap(),
            json!({"domain": "sumble.com"})
        );
        assert_eq!(
            serde_json::to_value(OrganizationRef::Id(42)).unwrap(),
            json!({"id": 42})
        );
        assert_eq!(
            serde_json::to_value(OrganizationRef::Slug("sumble".into())).unwrap(),
            json!({"slug": "sumble"})
        );
    }

    #[test]
    fn test_order_direction_accepts_lowercase() {
        let dir: OrderDirection = serde_json::from_value(json!("desc")).unwrap();
        assert_eq!(dir, OrderDirection::Desc);
        assert_eq!(serde_json::to_value(dir).unwrap(), json!("DESC"));
    }

    #[test]
    fn test_find_request_omits_unset_fields() {
        let request = FindOrganizationsRequest {
            filters: OrganizationFilters {
                technologies: Some(vec!["python".into()]),
                ..Default::default()
            },
            order_by_column: None,
            order_by_direction: None,
            limit: 10,
            offset: 0,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "filters": {"technologies": ["python"]},
                "limit": 10,
                "offset": 0
            })
        );
    }

    #[tokio::test]
    async fn test_enrich_posts_to_enrich_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/organizations/enrich"))
            .and(body_json(json!({
                "organization": {"domain": "sumble.com"},
                "filters": {"technologies": ["rust"]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = SumbleClient::builder()
            .api_key("sk-test")
            .base_url(server.uri())
            .build()
            .unwrap();

        let request = EnrichOrganizationRequest {
            organization: OrganizationRef::Domain("sumble.com".into()),
            filters: OrganizationFilters {
                technologies: Some(vec!["rust".into()]),
                ..Default::default()
            },
        };

        let result = client.organizations().enrich(&request).await.unwrap();
        assert_eq!(result, json!({"id": 1}));
    }
}
