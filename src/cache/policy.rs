//! Sweep Policy Module
//!
//! Decides when a write should trigger a bulk removal of expired entries.

use serde::Serialize;

// == Sweep Policy ==
/// Opportunistic sweep strategy applied after every `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "threshold", rename_all = "snake_case")]
pub enum SweepPolicy {
    /// Expired entries are only dropped when a read finds them.
    #[default]
    Lazy,
    /// Once the table holds more than this many entries, every expired entry
    /// is removed in the same call that crossed the threshold.
    Threshold(usize),
}

impl SweepPolicy {
    /// Returns true if a table of `len` entries should be swept now.
    pub fn should_sweep(&self, len: usize) -> bool {
        match self {
            SweepPolicy::Lazy => false,
            SweepPolicy::Threshold(limit) => len > *limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_never_sweeps() {
        assert!(!SweepPolicy::Lazy.should_sweep(0));
        assert!(!SweepPolicy::Lazy.should_sweep(usize::MAX));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let policy = SweepPolicy::Threshold(100);
        assert!(!policy.should_sweep(100));
        assert!(policy.should_sweep(101));
    }

    #[test]
    fn test_policy_serialize() {
        let json = serde_json::to_string(&SweepPolicy::Threshold(100)).unwrap();
        assert_eq!(json, r#"{"kind":"threshold","threshold":100}"#);
        let json = serde_json::to_string(&SweepPolicy::Lazy).unwrap();
        assert_eq!(json, r#"{"kind":"lazy"}"#);
    }
}
