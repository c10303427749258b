use regex::{Regex, RegexBuilder};
use rtw_domain::TierFamily;
use tracing::error;

/// Decides whether a voucher code suppresses the reward add-on.
///
/// The configured pattern is matched case-insensitively anywhere in the
/// code. A missing or malformed pattern is a configuration error: it is
/// logged and every voucher is treated as reward eligible.
#[derive(Debug, Clone, Default)]
pub struct RewardClassifier {
    without_reward: Option<Regex>,
}

impl RewardClassifier {
    pub fn new(pattern: Option<&str>) -> Self {
        Self {
            without_reward: compile(pattern),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.without_reward.is_some()
    }

    pub fn is_voucher_without_reward(&self, code: &str) -> bool {
        let code = code.trim();
        if code.is_empty() {
            return false;
        }
        self.without_reward
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(code))
    }

    pub fn is_voucher_with_reward(&self, code: &str) -> bool {
        !self.is_voucher_without_reward(code)
    }

    /// The tier family to price a registration with. The reward is only
    /// priced in when it is wanted and the voucher, if any, allows it.
    pub fn family_for(&self, voucher_code: Option<&str>, wants_reward: bool) -> TierFamily {
        let allowed = voucher_code.is_none_or(|code| self.is_voucher_with_reward(code));
        TierFamily::from_reward(wants_reward && allowed)
    }
}

fn compile(pattern: Option<&str>) -> Option<Regex> {
    let Some(source) = pattern.filter(|p| !p.trim().is_empty()) else {
        error!("Voucher without-reward pattern is not configured, assuming every voucher has a reward");
        return None;
    };
    match RegexBuilder::new(source).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(e) => {
            error!(
                "Invalid voucher without-reward pattern '{}', assuming every voucher has a reward: {}",
                source, e
            );
            None
        }
    }
}

/// One-off check of `code` against `pattern`; see [`RewardClassifier`].
pub fn is_voucher_without_reward(code: &str, pattern: Option<&str>) -> bool {
    if code.trim().is_empty() {
        return false;
    }
    RewardClassifier::new(pattern).is_voucher_without_reward(code)
}

pub fn is_voucher_with_reward(code: &str, pattern: Option<&str>) -> bool {
    !is_voucher_without_reward(code, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN: &str = "^(NR|NOREWARD)-";

    #[test]
    fn test_matching_voucher_has_no_reward() {
        assert!(is_voucher_without_reward("NR-1234", Some(PATTERN)));
        assert!(is_voucher_without_reward("noreward-77", Some(PATTERN)));
        assert!(!is_voucher_with_reward("nr-1234", Some(PATTERN)));
    }

    #[test]
    fn test_other_vouchers_have_reward() {
        assert!(!is_voucher_without_reward("VOUCHER-1", Some(PATTERN)));
        assert!(is_voucher_with_reward("VOUCHER-1", Some(PATTERN)));
    }

    #[test]
    fn test_empty_code_has_reward() {
        assert!(!is_voucher_without_reward("", Some(PATTERN)));
        assert!(!is_voucher_without_reward("   ", Some(".*")));
        assert!(is_voucher_with_reward("", Some(PATTERN)));
    }

    #[test]
    fn test_missing_pattern_degrades_to_reward() {
        assert!(!is_voucher_without_reward("NR-1", None));
        assert!(!is_voucher_without_reward("NR-1", Some("")));
        assert!(!RewardClassifier::new(None).is_configured());
    }

    #[test]
    fn test_malformed_pattern_degrades_to_reward() {
        assert!(!is_voucher_without_reward("NR-1", Some("(NR")));
        assert!(is_voucher_with_reward("NR-1", Some("[")));
        assert!(!RewardClassifier::new(Some("(NR")).is_configured());
    }

    #[test]
    fn test_unanchored_pattern_matches_anywhere() {
        let classifier = RewardClassifier::new(Some("bez"));
        assert!(classifier.is_configured());
        assert!(classifier.is_voucher_without_reward("2024-BEZ-odmeny"));
    }

    #[test]
    fn test_family_for() {
        let classifier = RewardClassifier::new(Some(PATTERN));
        assert_eq!(classifier.family_for(None, true), TierFamily::WithReward);
        assert_eq!(classifier.family_for(None, false), TierFamily::Plain);
        assert_eq!(
            classifier.family_for(Some("VOUCHER-1"), true),
            TierFamily::WithReward
        );
        assert_eq!(classifier.family_for(Some("NR-1"), true), TierFamily::Plain);
        assert_eq!(classifier.family_for(Some("NR-1"), false), TierFamily::Plain);
    }
}
