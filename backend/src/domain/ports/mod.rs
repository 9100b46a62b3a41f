//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod social_graph_sink;

#[cfg(test)]
pub use social_graph_sink::MockSocialGraphSink;
pub use social_graph_sink::{SocialGraphSink, SocialGraphSinkError};
