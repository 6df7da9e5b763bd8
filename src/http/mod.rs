//! HTTP transport seam
//!
//! Every outbound call (model completion, repository API, deploy API) goes through the
//! [`HttpTransport`] trait so that the pipeline can be exercised without a network.

mod client;
mod mock;
mod transport;

pub use client::ReqwestTransport;
pub use mock::MockTransport;
pub use transport::{HttpError, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
