//! Save transport: the network seam of the model.
//!
//! - [`Transport`] async contract (`post` one [`SaveRequest`], get a [`Reply`])
//! - [`HttpTransport`] production implementation over `reqwest`

mod http;
#[allow(clippy::module_inception)]
mod transport;

pub use http::HttpTransport;
pub use transport::{Reply, SaveRequest, Transport};
