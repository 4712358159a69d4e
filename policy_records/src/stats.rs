use crate::record::PolicyRecord;

/// Per-status counts the dashboard summary cards render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub total: usize,
    pub active: usize,
    pub matured: usize,
    pub lapsed: usize,
}

/// Counts records by status. Status strings compare case-insensitively
/// since backends have returned both `ACTIVE` and `Active`.
pub fn tally_statuses(records: &[PolicyRecord]) -> StatusTally {
    let mut tally = StatusTally {
        total: records.len(),
        ..StatusTally::default()
    };
    for record in records {
        if record.status.eq_ignore_ascii_case("ACTIVE") {
            tally.active += 1;
        } else if record.status.eq_ignore_ascii_case("MATURED") {
            tally.matured += 1;
        } else if record.status.eq_ignore_ascii_case("LAPSED") {
            tally.lapsed += 1;
        }
    }
    tally
}

/// Sum of the coerced amount field across records.
pub fn total_amount(records: &[PolicyRecord]) -> f64 {
    records.iter().map(|record| record.sum_assured).sum()
}
