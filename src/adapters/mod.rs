// Adapters layer: concrete implementations for external collaborators (log routing, catalog files).

pub mod catalog_csv;
pub mod log_sink;
