// Resource mappers, one module per managed object type.

pub mod authorization;
pub mod bucket;
pub mod dbrp_mapping;
pub mod legacy_authorization;
pub mod organization;
pub mod permission;
pub mod scraper;

pub use authorization::{AuthorizationAttrs, AuthorizationResource, AuthorizationStatus};
pub use bucket::{BucketAttrs, BucketResource, RetentionRuleAttrs};
pub use dbrp_mapping::{DbrpMappingAttrs, DbrpMappingResource};
pub use legacy_authorization::{LegacyAuthorizationAttrs, LegacyAuthorizationResource};
pub use organization::{OrganizationAttrs, OrganizationResource};
pub use permission::{PermissionAction, PermissionAttrs, PermissionResourceAttrs};
pub use scraper::{ScraperAttrs, ScraperResource};
