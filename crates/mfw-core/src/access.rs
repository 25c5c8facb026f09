//! Access-code gate in front of the workbench.

use std::collections::HashSet;

use crate::config::AccessCodes;
use crate::error::{MfwError, Result};

/// Set of codes that unlock the workbench.
#[derive(Clone, Default)]
pub struct AccessGate {
    codes: HashSet<String>,
}

impl AccessGate {
    /// Parses a comma-separated list; entries are trimmed and blanks dropped.
    pub fn from_list(list: &str) -> Self {
        let codes = list
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect();
        Self { codes }
    }

    pub fn from_config(codes: Option<&AccessCodes>) -> Self {
        codes
            .map(|codes| Self::from_list(&codes.valid_list))
            .unwrap_or_default()
    }

    pub fn is_configured(&self) -> bool {
        !self.codes.is_empty()
    }

    /// Checks a user-entered code.
    ///
    /// A gate with no codes rejects everyone with a configuration error so a
    /// missing secrets file never opens the workbench.
    pub fn verify(&self, code: &str) -> Result<()> {
        if !self.is_configured() {
            return Err(MfwError::config(
                "no access codes configured; check access_codes.valid_list in secret.json",
            ));
        }
        if self.codes.contains(code.trim()) {
            Ok(())
        } else {
            Err(MfwError::security("invalid access code"))
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("codes", &self.codes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_trims_both_sides() {
        let gate = AccessGate::from_list(" vip-001 , vip-002,vip-003 ");
        assert!(gate.verify("vip-002").is_ok());
        assert!(gate.verify("  vip-001\n").is_ok());
        assert!(gate.verify("vip-003").is_ok());
    }

    #[test]
    fn test_verify_rejects_unknown() {
        let gate = AccessGate::from_list("vip-001");
        let err = gate.verify("vip-999").unwrap_err();
        assert!(err.is_security());
    }

    #[test]
    fn test_blank_entries_do_not_admit_empty_code() {
        let gate = AccessGate::from_list("a,,b, ,");
        assert!(gate.verify("").is_err());
        assert!(gate.verify("   ").is_err());
    }

    #[test]
    fn test_unconfigured_gate_is_config_error() {
        let gate = AccessGate::from_config(None);
        assert!(!gate.is_configured());
        assert!(gate.verify("anything").unwrap_err().is_config());
    }

    #[test]
    fn test_debug_hides_codes() {
        let gate = AccessGate::from_list("top-secret");
        assert!(!format!("{gate:?}").contains("top-secret"));
    }
}
