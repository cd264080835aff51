//! Remediation Configuration

use serde::{Deserialize, Serialize};

/// Remediation options
///
/// Hosts load this from their own configuration files; the engine never
/// touches the filesystem itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationConfig {
    /// Link data cells to the column headers above them
    pub column_headers: bool,

    /// Link data cells to header cells earlier in the same row
    pub row_headers: bool,

    /// Prefix for identifiers minted onto header cells
    pub id_prefix: String,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            column_headers: true,
            row_headers: true,
            id_prefix: "axsh".to_string(),
        }
    }
}
