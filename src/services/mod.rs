use chrono::{DateTime, Duration, SubsecRound, Utc};

pub mod comments;
pub mod posts;

/// Current time at the precision Postgres stores.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next `updated_at` for a record, always strictly after `previous`.
pub fn refreshed(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
