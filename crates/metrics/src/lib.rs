pub use prometheus_client::metrics::counter::Counter;
pub use prometheus_client::metrics::family::Family;

mod registry;
pub use registry::{Registry, SharedRegistry};

mod attestation;
pub use attestation::{AttestationMetrics, RejectionLabel};
