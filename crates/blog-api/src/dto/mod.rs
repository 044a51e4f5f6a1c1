//! Wire shapes of backend requests and responses

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
