// Argument parsing shared by the Sumble tools

use crate::error::ToolError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use sumble_sdk::api::OrganizationRef;

pub(crate) const DEFAULT_LIMIT: u32 = 10;
pub(crate) const DEFAULT_OFFSET: u32 = 0;
pub(crate) const MAX_OFFSET: u32 = 10_000;

/// Deserialize flat tool arguments. Absent or `null` arguments count as `{}`.
pub(crate) fn parse<T: DeserializeOwned>(tool: &'static str, arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid(tool, e.to_string()))
}

/// The three interchangeable ways to name an organization.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrganizationArgs {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub organization_id: Option<u64>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl OrganizationArgs {
    /// First present identifier wins: domain, then organization_id, then slug.
    /// Blank strings are treated as absent.
    pub fn into_ref(self) -> Option<OrganizationRef> {
        let non_blank = |s: Option<String>| s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        if let Some(domain) = non_blank(self.domain) {
            return Some(OrganizationRef::Domain(domain));
        }
        if let Some(id) = self.organization_id {
            return Some(OrganizationRef::Id(id));
        }
        non_blank(self.slug).map(OrganizationRef::Slug)
    }

    pub fn require(self, tool: &'static str) -> Result<OrganizationRef, ToolError> {
        self.into_ref().ok_or(ToolError::MissingOrganization { tool })
    }
}

/// Apply a default and check `min..=max`.
pub(crate) fn bounded(
    tool: &'static str,
    field: &str,
    value: Option<i64>,
    min: u32,
    max: u32,
    default: u32,
) -> Result<u32, ToolError> {
    let Some(value) = value else {
        return Ok(default);
    };
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ToolError::invalid(
            tool,
            format!("{} must be between {} and {}, got {}", field, min, max, value),
        ));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_arguments_are_empty_object() {
        let args: OrganizationArgs = parse("t", Value::Null).unwrap();
        assert!(args.into_ref().is_none());
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        let result = parse::<OrganizationArgs>("t", json!("domain=sumble.com"));
        assert!(matches!(result, Err(ToolError::InvalidArguments { tool: "t", .. })));
    }

    #[test]
    fn test_identifier_precedence() {
        let args: OrganizationArgs =
            parse("t", json!({"slug": "acme", "organization_id": 7, "domain": "acme.com"})).unwrap();
        assert_eq!(args.into_ref(), Some(OrganizationRef::Domain("acme.com".into())));

        let args: OrganizationArgs = parse("t", json!({"slug": "acme", "organization_id": 7})).unwrap();
        assert_eq!(args.into_ref(), Some(OrganizationRef::Id(7)));

        let args: OrganizationArgs = parse("t", json!({"domain": "  ", "slug": "acme"})).unwrap();
        assert_eq!(args.into_ref(), Some(OrganizationRef::Slug("acme".into())));
    }

    #[test]
    fn test_require_without_identifier() {
        let args = OrganizationArgs::default();
        assert!(matches!(
            args.require("find_people"),
            Err(ToolError::MissingOrganization { tool: "find_people" })
        ));
    }

    #[test]
    fn test_bounded() {
        assert_eq!(bounded("t", "limit", None, 1, 200, 10).unwrap(), 10);
        assert_eq!(bounded("t", "limit", Some(200), 1, 200, 10).unwrap(), 200);
        assert!(bounded("t", "limit", Some(0), 1, 200, 10).is_err());
        assert!(bounded("t", "limit", Some(201), 1, 200, 10).is_err());
        assert!(bounded("t", "offset", Some(-1), 0, MAX_OFFSET, 0).is_err());
    }
}
