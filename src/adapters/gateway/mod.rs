//! Outbound gateways used by the terminal client.

mod http_submission;

pub use http_submission::HttpSubmissionGateway;
