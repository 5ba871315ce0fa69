// Read-only data sources.

pub mod bucket;
pub mod organization;
pub mod ready;

pub use bucket::{BucketDataSource, BucketQuery};
pub use organization::{OrganizationDataSource, OrganizationQuery};
pub use ready::{ReadyDataSource, ReadyOutput, ReadyQuery};
