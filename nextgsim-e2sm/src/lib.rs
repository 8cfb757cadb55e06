//! E2 Service Model payload codec
//!
//! Builds and validates the binary event-trigger and action-definition
//! payloads carried in E2 subscriptions, and decodes indication headers and
//! messages back into typed structures.
//!
//! # Modules
//!
//! - `kpm` - E2SM-KPM v2 (Key Performance Measurement)
//! - `rc` - E2SM-RC v1 (RAN Control)
//! - `codec` - Validated protobuf encode/decode shared by both models
//! - `validate` - Structural schema checks
//!
//! Payloads are Protocol Buffers messages. Every payload is validated against
//! its model's structural constraints before it is encoded, so a malformed
//! subscription is rejected locally instead of by the peer.

pub mod codec;
pub mod descriptor;
pub mod error;
pub mod kpm;
pub mod rc;
pub mod validate;

pub use descriptor::ServiceModelDescriptor;
pub use error::{E2smError, PayloadPart};
pub use validate::{SchemaViolation, Validate};
