use std::fmt;

/// Relay routes exposed by the bridge. `/health` is not a relay route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Invoice,
    Payment,
    Deposit,
    ClosePackage,
    DriveIngest,
}

impl Route {
    pub const ALL: [Self; 5] = [
        Self::Invoice,
        Self::Payment,
        Self::Deposit,
        Self::ClosePackage,
        Self::DriveIngest,
    ];

    /// Stable identifier used in config keys, logs and error bodies.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Payment => "payment",
            Self::Deposit => "deposit",
            Self::ClosePackage => "close_package",
            Self::DriveIngest => "drive_ingest",
        }
    }

    /// Primary HTTP path.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Invoice => "/invoice",
            Self::Payment => "/payment",
            Self::Deposit => "/deposit",
            Self::ClosePackage => "/close-package",
            Self::DriveIngest => "/drive-ingest",
        }
    }

    /// Additional paths served by the same handler.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::DriveIngest => &["/drive/ingest"],
            _ => &[],
        }
    }

    /// Environment variable holding the destination webhook URL.
    #[must_use]
    pub fn hook_env_var(self) -> &'static str {
        match self {
            Self::Invoice => "ZAPIER_HOOK_INVOICE",
            Self::Payment => "ZAPIER_HOOK_PAYMENT",
            Self::Deposit => "ZAPIER_HOOK_DEPOSIT",
            Self::ClosePackage => "ZAPIER_HOOK_CLOSE_PACKAGE",
            Self::DriveIngest => "ZAPIER_HOOK_DRIVE_INGEST",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn paths_are_unique() {
        let mut seen = HashSet::new();
        for route in Route::ALL {
            assert!(seen.insert(route.path()), "duplicate path {}", route.path());
            for alias in route.aliases() {
                assert!(seen.insert(*alias), "duplicate alias {alias}");
            }
        }
        assert!(!seen.contains("/health"));
    }

    #[test]
    fn close_package_uses_dash_path_and_underscore_name() {
        assert_eq!(Route::ClosePackage.path(), "/close-package");
        assert_eq!(Route::ClosePackage.name(), "close_package");
        assert_eq!(Route::ClosePackage.to_string(), "close_package");
    }

    #[test]
    fn drive_ingest_keeps_legacy_alias() {
        assert_eq!(Route::DriveIngest.path(), "/drive-ingest");
        assert_eq!(Route::DriveIngest.aliases(), &["/drive/ingest"]);
    }

    #[test]
    fn hook_env_vars_match_names() {
        for route in Route::ALL {
            let expected = format!("ZAPIER_HOOK_{}", route.name().to_uppercase());
            assert_eq!(route.hook_env_var(), expected);
        }
    }
}
