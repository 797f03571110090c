//! Test helpers module
//!
//! Shared infrastructure for the integration test suites: mock HTTP servers
//! for the event repository and payment gateway, and test data builders.

pub mod api_mock;
pub mod test_data;

#[allow(unused_imports)]
pub use api_mock::{EventApiMock, PaymentApiMock};
#[allow(unused_imports)]
pub use test_data::*;
