//! Request execution: transport abstraction and HTTP dispatch.

pub mod http;

pub use http::{ApiRequest, ReqwestTransport, Transport};
