use chrono::{DateTime, Months, Utc};

/// Activity window used when none is configured
pub const DEFAULT_ACTIVE_MONTHS: u32 = 3;

/// Whether a branch's last commit falls within the last `months` calendar months
///
/// A branch without a known commit date is inactive.
pub fn is_active(last_commit: Option<DateTime<Utc>>, as_of: DateTime<Utc>, months: u32) -> bool {
    let Some(last_commit) = last_commit else {
        return false;
    };
    match as_of.checked_sub_months(Months::new(months)) {
        Some(cutoff) => last_commit >= cutoff,
        None => true,
    }
}
