// Adapters layer: concrete implementations of the domain ports and the HTTP surface.

pub mod http;
pub mod storage;
