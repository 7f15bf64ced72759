//! Proxy module
//!
//! Handles request forwarding to the upstream text-generation provider.

pub mod headers;
pub mod huggingface;
pub mod logging;
pub mod provider;
pub mod upstream;

pub use huggingface::HuggingFaceClient;
pub use logging::RequestContext;
pub use provider::InferenceProvider;
pub use upstream::{GenerationRequest, UpstreamBody, UpstreamReply};
