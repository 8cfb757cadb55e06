//! Service model identity

use std::fmt;

/// Identity of an E2 service model.
///
/// The object identifier is globally unique per model and is what E2 nodes
/// advertise in their RAN function definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceModelDescriptor {
    /// ASN.1 object identifier of the model
    pub oid: &'static str,
    /// Model name as registered with the E2 termination
    pub name: &'static str,
    /// Model version
    pub version: &'static str,
}

impl fmt::Display for ServiceModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.name, self.version, self.oid)
    }
}
