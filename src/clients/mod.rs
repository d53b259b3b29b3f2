//! Outbound access to the n8n public API: the [`UsersApi`] and [`ExecutionsApi`] traits,
//! their `reqwest` implementation, and the shared [`N8nClient`] handle.

pub mod api;
pub mod http;
pub mod n8n_client;

pub use api::*;
pub use http::HttpApi;
pub use n8n_client::N8nClient;
