//! Request and result records shared by the executor and the UI.

mod request;
mod response;

pub use request::{GraphqlPayload, GraphqlRequest, HttpMethod, RequestSpec, RestRequest};
pub use response::{Outcome, RequestResult};
