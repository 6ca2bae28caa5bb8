//! Outbound adapters implementing the domain's driven ports.

pub mod http;

pub use self::http::DirectoryHttpClient;
