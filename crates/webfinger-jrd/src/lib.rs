//! JSON Resource Descriptor handling for WebFinger lookups.
//!
//! This crate turns the raw body of a WebFinger (RFC 7033) or host-meta
//! response into a [`LookupResult`]: the parsed document, the raw text, and an
//! index of links keyed by a fixed set of [`Relation`]s.
//!
//! HTTP fetching is handled by `webfinger-client`.
//! This crate only validates and indexes JSON responses.

mod error;
mod normalize;
mod relation;
mod types;

pub use error::{JrdError, UnknownRelation};
pub use normalize::normalize;
pub use relation::Relation;
pub use types::{JrdIndex, JrdProperties, Link, LinkIndex, LookupResult};

/// Property key holding the display name of the resource.
pub const NAME_PROPERTY: &str = "http://packetizer.com/ns/name";
