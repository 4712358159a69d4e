use models_policy::RawRecord;
use serde_json::Value;

/// Candidate source keys per canonical concept, probed in order. First
/// present non-null value wins.
pub const POLICY_NO_KEYS: &[&str] = &["policyNumber", "policyNo"];
pub const CUSTOMER_NAME_KEYS: &[&str] = &["personName", "customerName", "name", "person_name"];
pub const POLICY_TYPE_KEYS: &[&str] = &["product", "policyType", "policy_type"];
pub const GROUP_CODE_KEYS: &[&str] = &["groupCode", "group_code"];
pub const MATURITY_DATE_KEYS: &[&str] = &["maturityDate", "maturity_date"];
pub const PREMIUM_KEYS: &[&str] = &["premium"];
pub const SUM_ASSURED_KEYS: &[&str] = &["sumAssured", "sum_assured", "amount"];
pub const STATUS_KEYS: &[&str] = &["status"];

/// A policy record normalized for display.
///
/// Canonical fields are additive: every field of the raw payload is kept
/// in [`PolicyRecord::raw`], so nothing the backend sent is lost.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRecord {
    pub policy_no: String,
    pub customer_name: String,
    pub policy_type: String,
    pub group_code: String,
    pub maturity_date: String,
    pub status: String,
    pub premium: f64,
    pub sum_assured: f64,
    pub raw: RawRecord,
}

/// Reconciles one raw backend record into the canonical shape.
pub fn normalize(raw: &RawRecord) -> PolicyRecord {
    PolicyRecord {
        policy_no: first_text(raw, POLICY_NO_KEYS),
        customer_name: first_text(raw, CUSTOMER_NAME_KEYS),
        policy_type: first_text(raw, POLICY_TYPE_KEYS),
        group_code: first_text(raw, GROUP_CODE_KEYS),
        maturity_date: first_text(raw, MATURITY_DATE_KEYS),
        status: first_text(raw, STATUS_KEYS),
        premium: first_present(raw, PREMIUM_KEYS).map_or(0.0, parse_amount),
        sum_assured: first_present(raw, SUM_ASSURED_KEYS).map_or(0.0, parse_amount),
        raw: raw.clone(),
    }
}

impl PolicyRecord {
    /// The record as a single map: canonical aliases first, then every
    /// raw field spread through (raw values win on a name collision).
    /// This is the shape tables and exports consume.
    pub fn merged(&self) -> RawRecord {
        let mut merged = RawRecord::new();
        merged.insert("policyNo".to_string(), Value::String(self.policy_no.clone()));
        merged.insert(
            "customerName".to_string(),
            Value::String(self.customer_name.clone()),
        );
        merged.insert(
            "policyType".to_string(),
            Value::String(self.policy_type.clone()),
        );
        merged.insert(
            "groupCode".to_string(),
            Value::String(self.group_code.clone()),
        );
        merged.insert(
            "maturityDate".to_string(),
            Value::String(self.maturity_date.clone()),
        );
        merged.insert("status".to_string(), Value::String(self.status.clone()));
        for (key, value) in &self.raw {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

fn first_present<'a>(raw: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| !value.is_null())
}

fn first_text(raw: &RawRecord, keys: &[&str]) -> String {
    first_present(raw, keys).map_or_else(String::new, value_text)
}

/// Renders a scalar for display. Missing and null become the empty
/// string, not the word "null".
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}

/// Coerces a monetary value for aggregation. String amounts may carry
/// thousands separators; anything non-numeric counts as zero.
pub fn parse_amount(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => {
            let cleaned: String = text
                .chars()
                .filter(|ch| !matches!(ch, ',' | ' '))
                .collect();
            cleaned.parse().unwrap_or_else(|_| {
                if !cleaned.is_empty() {
                    tracing::warn!(value = %text, "non-numeric amount treated as zero");
                }
                0.0
            })
        }
        _ => 0.0,
    }
}

/// Renders a monetary field from the raw record: numeric values as-is,
/// absent or non-numeric values as the empty string.
pub fn amount_display(raw: &RawRecord, key: &str) -> String {
    match raw.get(key) {
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        _ => String::new(),
    }
}
