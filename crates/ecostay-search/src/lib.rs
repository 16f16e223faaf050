//! The certified-hotel search pipeline and its streaming output.

pub mod error;
pub mod filter;
pub mod merge;
pub mod pipeline;
pub mod registry;
pub mod stream;

pub use error::SearchError;
pub use filter::filter;
pub use merge::merge;
pub use pipeline::{build_http_client, SearchPipeline};
pub use registry::{CertificationRegistry, PgRegistry, StaticRegistry};
pub use stream::{ndjson_line, ndjson_stream, stream_hotels, SearchEvent};
