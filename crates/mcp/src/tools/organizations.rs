// Organization search and enrichment tools

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::args::{self, OrganizationArgs, DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_OFFSET};
use crate::tools::{
    json_schema_enum, json_schema_integer, json_schema_object, json_schema_string,
    json_schema_string_array, Tool,
};
use serde::Deserialize;
use serde_json::Value;
use sumble_sdk::api::{
    EnrichOrganizationRequest, FindOrganizationsRequest, OrderDirection, OrganizationFilters,
};
use sumble_sdk::SumbleClient;
use tracing::debug;

const MAX_ORGANIZATIONS: u32 = 200;

/// Search organizations by the technologies they use.
pub struct FindOrganizationsTool;

#[derive(Debug, Deserialize)]
struct FindOrganizationsArgs {
    #[serde(default)]
    technologies: Option<Vec<String>>,
    #[serde(default)]
    technology_categories: Option<Vec<String>>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    since: Option<String>,
    #[serde(default)]
    order_by_column: Option<String>,
    #[serde(default)]
    order_by_direction: Option<OrderDirection>,
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

impl FindOrganizationsTool {
    pub const NAME: &'static str = "find_organizations";

    pub fn build_request(arguments: Value) -> Result<FindOrganizationsRequest, ToolError> {
        let args: FindOrganizationsArgs = args::parse(Self::NAME, arguments)?;

        Ok(FindOrganizationsRequest {
            filters: OrganizationFilters {
                technologies: args.technologies,
                technology_categories: args.technology_categories,
                query: args.query,
                since: args.since,
            },
            order_by_column: args.order_by_column,
            order_by_direction: args.order_by_direction,
            limit: args::bounded(Self::NAME, "limit", args.limit, 1, MAX_ORGANIZATIONS, DEFAULT_LIMIT)?,
            offset: args::bounded(Self::NAME, "offset", args.offset, 0, MAX_OFFSET, DEFAULT_OFFSET)?,
        })
    }
}

#[async_trait::async_trait]
impl Tool for FindOrganizationsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Find organizations that use given technologies or technology \
                categories, or that match a free-text query. Costs 5 credits per filter \
                per organization returned."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "technologies": json_schema_string_array("Technology names to match, e.g. [\"python\", \"kubernetes\"]"),
                    "technology_categories": json_schema_string_array("Technology categories to match, e.g. [\"cloud\"]"),
                    "query": json_schema_string("Free-text query, used instead of technology filters"),
                    "since": json_schema_string("Only count evidence on or after this date (YYYY-MM-DD)"),
                    "order_by_column": json_schema_string("Column to sort results by, e.g. \"employee_count\""),
                    "order_by_direction": json_schema_enum("Sort direction", &["ASC", "DESC"]),
                    "limit": json_schema_integer("Maximum number of organizations to return", 1, MAX_ORGANIZATIONS, DEFAULT_LIMIT),
                    "offset": json_schema_integer("Number of results to skip", 0, MAX_OFFSET, DEFAULT_OFFSET)
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, client: &SumbleClient, arguments: Value) -> Result<Value, ToolError> {
        let request = Self::build_request(arguments)?;
        debug!(limit = request.limit, offset = request.offset, "find_organizations");
        Ok(client.organizations().find(&request).await?)
    }
}

/// Enrich one organization with its technology usage.
pub struct EnrichOrganizationTool;

#[derive(Debug, Deserialize)]
struct EnrichOrganizationArgs {
    #[serde(flatten)]
    organization: OrganizationArgs,
    #[serde(default)]
    technologies: Option<Vec<String>>,
    #[serde(default)]
    technology_categories: Option<Vec<String>>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    since: Option<String>,
}

impl EnrichOrganizationTool {
    pub const NAME: &'static str = "enrich_organization";

    pub fn build_request(arguments: Value) -> Result<EnrichOrganizationRequest, ToolError> {
        let args: EnrichOrganizationArgs = args::parse(Self::NAME, arguments)?;

        Ok(EnrichOrganizationRequest {
            organization: args.organization.require(Self::NAME)?,
            filters: OrganizationFilters {
                technologies: args.technologies,
                technology_categories: args.technology_categories,
                query: args.query,
                since: args.since,
            },
        })
    }
}

#[async_trait::async_trait]
impl Tool for EnrichOrganizationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get the technologies an organization uses. Identify the \
                organization by one of domain, organization_id or slug. Costs 5 credits \
                per technology returned."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "domain": json_schema_string("Organization domain, e.g. \"sumble.com\""),
                    "organization_id": {
                        "type": "integer",
                        "description": "Sumble organization ID"
                    },
                    "slug": json_schema_string("Sumble organization slug"),
                    "technologies": json_schema_string_array("Only report these technologies"),
                    "technology_categories": json_schema_string_array("Only report technologies in these categories"),
                    "query": json_schema_string("Free-text technology query"),
                    "since": json_schema_string("Only count evidence on or after this date (YYYY-MM-DD)")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, client: &SumbleClient, arguments: Value) -> Result<Value, ToolError> {
        let request = Self::build_request(arguments)?;
        debug!(organization = ?request.organization, "enrich_organization");
        Ok(client.organizations().enrich(&request).await?)
    }
}
