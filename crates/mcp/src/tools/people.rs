// People search tool

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::args::{self, OrganizationArgs, DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_OFFSET};
use crate::tools::{
    json_schema_integer, json_schema_object, json_schema_string, json_schema_string_array, Tool,
};
use serde::Deserialize;
use serde_json::Value;
use sumble_sdk::api::{FindPeopleRequest, PeopleFilters};
use sumble_sdk::SumbleClient;
use tracing::debug;

const MAX_PEOPLE: u32 = 250;

/// Search the people working at one organization.
pub struct FindPeopleTool;

#[derive(Debug, Deserialize)]
struct FindPeopleArgs {
    #[serde(flatten)]
    organization: OrganizationArgs,
    #[serde(default)]
    job_functions: Option<Vec<String>>,
    #[serde(default)]
    job_levels: Option<Vec<String>>,
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

impl FindPeopleTool {
    pub const NAME: &'static str = "find_people";

    pub fn build_request(arguments: Value) -> Result<FindPeopleRequest, ToolError> {
        let args: FindPeopleArgs = args::parse(Self::NAME, arguments)?;

        Ok(FindPeopleRequest {
            organization: args.organization.require(Self::NAME)?,
            filters: PeopleFilters {
                job_functions: args.job_functions,
                job_levels: args.job_levels,
                countries: args.countries,
                query: args.query,
                since: args.since,
            },
            limit: args::bounded(Self::NAME, "limit", args.limit, 1, MAX_PEOPLE, DEFAULT_LIMIT)?,
            offset: args::bounded(Self::NAME, "offset", args.offset, 0, MAX_OFFSET, DEFAULT_OFFSET)?,
        })
    }
}

#[async_trait::async_trait]
impl Tool for FindPeopleTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Find people at an organization by job function, level or country. \
                Identify the organization by one of domain, organization_id or slug. \
                Costs 1 credit per person returned."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "domain": json_schema_string("Organization domain, e.g. \"sumble.com\""),
                    "organization_id": {
                        "type": "integer",
                        "description": "Sumble organization ID"
                    },
                    "slug": json_schema_string("Sumble organization slug"),
                    "job_functions": json_schema_string_array("Job functions, e.g. [\"Engineering\", \"Sales\"]"),
                    "job_levels": json_schema_string_array("Seniority levels, e.g. [\"Director\", \"VP\"]"),
                    "countries": json_schema_string_array("ISO country codes, e.g. [\"US\"]"),
                    "query": json_schema_string("Free-text query"),
                    "since": json_schema_string("Only people seen on or after this date (YYYY-MM-DD)"),
                    "limit": json_schema_integer("Maximum number of people to return", 1, MAX_PEOPLE, DEFAULT_LIMIT),
                    "offset": json_schema_integer("Number of results to skip", 0, MAX_OFFSET, DEFAULT_OFFSET)
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, client: &SumbleClient, arguments: Value) -> Result<Value, ToolError> {
        let request = Self::build_request(arguments)?;
        debug!(organization = ?request.organization, limit = request.limit, "find_people");
        Ok(client.people().find(&request).await?)
    }
}
