// Adapters layer: concrete implementations of the domain ports (http, cache, store, fixtures).

pub mod cache;
pub mod fixture;
pub mod http;
pub mod store;

pub use cache::InMemoryCache;
pub use fixture::FixtureFileRecords;
pub use http::HttpFileRecords;
pub use store::InMemoryBinderStore;
