//! Low-level request plumbing shared by every resource method.

mod auth;
pub mod paths;
mod request;

pub use auth::refresh_access_token;
pub use request::{
    ApiRequest, AuthContext, FilePart, RequestBody, error_from_response, error_message,
    mentions_business_unit, parse_body, read_response, send_api_request,
};
