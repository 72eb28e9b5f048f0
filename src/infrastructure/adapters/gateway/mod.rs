//! Gateway Adapter - 上游转发

mod upstream_forwarder;

pub use upstream_forwarder::{
    strip_hop_by_hop_headers, upstream_url, ForwardError, UpstreamForwarder,
};
