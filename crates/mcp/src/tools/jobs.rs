// Job search tool

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::args::{self, OrganizationArgs, DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_OFFSET};
use crate::tools::{
    json_schema_integer, json_schema_object, json_schema_string, json_schema_string_array, Tool,
};
use serde::Deserialize;
use serde_json::Value;
use sumble_sdk::api::{FindJobsRequest, JobFilters};
use sumble_sdk::SumbleClient;
use tracing::debug;

const MAX_JOBS: u32 = 100;

/// Search job postings, optionally within one organization.
pub struct FindJobsTool;

#[derive(Debug, Deserialize)]
struct FindJobsArgs {
    #[serde(flatten)]
    organization: OrganizationArgs,
    #[serde(default)]
    technologies: Option<Vec<String>>,
    #[serde(default)]
    technology_categories: Option<Vec<String>>,
    #[serde(default)]
    countries: Option<Vec<String>>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    since: Option<String>,
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

impl FindJobsTool {
    pub const NAME: &'static str = "find_jobs";

    pub fn build_request(arguments: Value) -> Result<FindJobsRequest, ToolError> {
        let args: FindJobsArgs = args::parse(Self::NAME, arguments)?;

        Ok(FindJobsRequest {
            organization: args.organization.into_ref(),
            filters: JobFilters {
                technologies: args.technologies,
                technology_categories: args.technology_categories,
                countries: args.countries,
                query: args.query,
                since: args.since,
            },
            limit: args::bounded(Self::NAME, "limit", args.limit, 1, MAX_JOBS, DEFAULT_LIMIT)?,
            offset: args::bounded(Self::NAME, "offset", args.offset, 0, MAX_OFFSET, DEFAULT_OFFSET)?,
        })
    }
}

#[async_trait::async_trait]
impl Tool for FindJobsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Find job postings by technology, country or free-text query. \
                Optionally scope the search to one organization via domain, \
                organization_id or slug. Costs 3 credits per job returned."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "domain": json_schema_string("Limit to the organization with this domain"),
                    "organization_id": {
                        "type": "integer",
                        "description": "Limit to the organization with this Sumble ID"
                    },
                    "slug": json_schema_string("Limit to the organization with this Sumble slug"),
                    "technologies": json_schema_string_array("Technologies mentioned in the posting"),
                    "technology_categories": json_schema_string_array("Technology categories mentioned in the posting"),
                    "countries": json_schema_string_array("ISO country codes, e.g. [\"US\", \"GB\"]"),
                    "query": json_schema_string("Free-text query"),
                    "since": json_schema_string("Only postings on or after this date (YYYY-MM-DD)"),
                    "limit": json_schema_integer("Maximum number of jobs to return", 1, MAX_JOBS, DEFAULT_LIMIT),
                    "offset": json_schema_integer("Number of results to skip", 0, MAX_OFFSET, DEFAULT_OFFSET)
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, client: &SumbleClient, arguments: Value) -> Result<Value, ToolError> {
        let request = Self::build_request(arguments)?;
        debug!(scoped = request.organization.is_some(), limit = request.limit, "find_jobs");
        Ok(client.jobs().find(&request).await?)
    }
}
