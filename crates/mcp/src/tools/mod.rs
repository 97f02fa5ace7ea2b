mod args;
pub mod jobs;
pub mod organizations;
pub mod people;
mod registry;

use std::sync::Arc;

pub use jobs::FindJobsTool;
pub use organizations::{EnrichOrganizationTool, FindOrganizationsTool};
pub use people::FindPeopleTool;
pub use registry::{
    json_schema_array, json_schema_enum, json_schema_integer, json_schema_object,
    json_schema_string, json_schema_string_array, Tool, ToolRegistry,
};

impl ToolRegistry {
    /// Registry with the four Sumble tools, in advertised order.
    pub fn sumble() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FindOrganizationsTool));
        registry.register(Arc::new(EnrichOrganizationTool));
        registry.register(Arc::new(FindJobsTool));
        registry.register(Arc::new(FindPeopleTool));
        registry
    }
}
