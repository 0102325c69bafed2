// Adapters layer: concrete implementations for external systems (http, html, storage).

pub mod html;
pub mod http;
pub mod storage;
