use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body for policy creation and update calls.
///
/// Every field is optional; update calls serialize only the fields that
/// changed, create calls whatever the form collected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_code: Option<String>,
    /// First unpaid premium date, as the backend formats it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commencement_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_assured: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_head: Option<String>,
}

/// Counts from the dashboard stats endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStats {
    #[serde(default)]
    pub total_policies: u64,
    #[serde(default)]
    pub active_policies: u64,
    #[serde(default)]
    pub matured_policies: u64,
}
