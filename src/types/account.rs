use serde::{Deserialize, Serialize};

/// Balance and ownership of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// Balance in display units
    pub balance: f64,
    pub lamports: u64,
    pub exists: bool,
    pub owner: Option<String>,
    pub executable: bool,
}
