use serde::{Deserialize, Serialize};

/// One inventory ledger entry. Rows are inserted and deleted, never updated
/// in place; a deleted row is copied into the trash archive first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: i32,
    pub owner: String,
    /// Stored and matched as an opaque string; the transport value is passed
    /// through without parsing.
    pub date: String,
    pub name: String,
    pub model: String,
    pub count: i32,
    pub project: String,
    pub location: String,
}

/// Payload for a new ledger entry. All seven fields are required; values are
/// handed to the store exactly as deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDevice {
    pub owner: String,
    pub date: String,
    pub name: String,
    pub model: String,
    pub count: i32,
    pub project: String,
    pub location: String,
}

/// Optional search filters, AND-combined. `date` matches exactly; the other
/// fields match as substrings. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceFilter {
    pub owner: Option<String>,
    pub date: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub project: Option<String>,
    pub location: Option<String>,
}
