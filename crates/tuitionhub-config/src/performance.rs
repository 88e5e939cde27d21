use std::env;
use tuitionhub_performance::LatePolicy;

#[derive(Clone, Copy, Debug, Default)]
pub struct PerformanceConfig {
    pub late_policy: LatePolicy,
}

impl PerformanceConfig {
    /// Reads `ATTENDANCE_LATE_POLICY` (`half` or `full`).
    pub fn from_env() -> Self {
        Self {
            late_policy: late_policy_from(env::var("ATTENDANCE_LATE_POLICY").ok()),
        }
    }
}

fn late_policy_from(raw: Option<String>) -> LatePolicy {
    match raw {
        None => LatePolicy::default(),
        Some(value) => value.parse().unwrap_or_else(|err| {
            tracing::warn!(%err, "Falling back to half-present late policy");
            LatePolicy::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_late_policy_defaults_to_half() {
        assert_eq!(late_policy_from(None), LatePolicy::HalfPresent);
        assert_eq!(late_policy_from(Some("sometimes".into())), LatePolicy::HalfPresent);
    }

    #[test]
    fn test_late_policy_full() {
        assert_eq!(late_policy_from(Some("full".into())), LatePolicy::FullPresent);
    }
}
