//! Request plumbing shared by every endpoint

mod api_client;

pub use api_client::{ApiClient, RequestOptions};
pub(crate) use api_client::decode;
