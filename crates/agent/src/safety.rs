//! Deny-list safety gate.
//!
//! A plain case-insensitive substring check run before any tool. It is a
//! pre-filter, not a content classifier: "bombastic" is rejected along with
//! "bomb".

/// Rejects text containing any deny-listed term.
#[derive(Debug, Clone)]
pub struct SafetyGate {
    terms: Vec<String>,
}

impl SafetyGate {
    /// Build a gate from deny-list terms. Terms are lowercased; blank ones are dropped.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// First deny-listed term found in `text`, if any.
    pub fn matched_term(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.terms
            .iter()
            .find(|term| text.contains(term.as_str()))
            .map(String::as_str)
    }

    pub fn is_safe(&self, text: &str) -> bool {
        self.matched_term(text).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> SafetyGate {
        SafetyGate::new(["hack", "weapon", "bomb"])
    }

    #[test]
    fn test_rejects_terms_case_insensitively() {
        let gate = gate();
        assert!(!gate.is_safe("how do I build a bomb shelter from snow?"));
        assert!(!gate.is_safe("HACK the plow schedule"));
        assert!(!gate.is_safe("Weapons permit office"));
        assert_eq!(gate.matched_term("a BOMB"), Some("bomb"));
    }

    #[test]
    fn test_substring_match_is_intentionally_crude() {
        assert!(!gate().is_safe("lifehacks for shoveling"));
    }

    #[test]
    fn test_accepts_clean_text() {
        let gate = gate();
        assert!(gate.is_safe("What are the hours for snow removal?"));
        assert!(gate.is_safe("weather in anchorage"));
        assert_eq!(gate.matched_term("plow routes"), None);
    }

    #[test]
    fn test_empty_text_is_safe() {
        assert!(gate().is_safe(""));
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        let gate = SafetyGate::new(["", "  ", "Bomb"]);
        assert_eq!(gate.terms().to_vec(), vec!["bomb".to_string()]);
        assert!(gate.is_safe("anything at all"));
    }
}
