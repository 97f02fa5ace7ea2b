//! Typed wrappers for the Sumble API endpoints.

pub mod jobs;
pub mod organizations;
pub mod people;

pub use jobs::{FindJobsRequest, JobFilters, JobsApi};
pub use organizations::{
    EnrichOrganizationRequest, FindOrganizationsRequest, OrderDirection, OrganizationFilters,
    OrganizationRef, OrganizationsApi,
};
pub use people::{FindPeopleRequest, PeopleApi, PeopleFilters};
