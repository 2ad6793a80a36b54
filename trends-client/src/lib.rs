pub mod api;
pub mod endpoint;

pub use api::TrendsClient;
pub use endpoint::{ApiEndpoint, DEPLOYED_API_BASE, LOCAL_API_BASE};
