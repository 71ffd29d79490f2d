//! Human-readable error rendering with remediation hints

use crate::core::error::ModmanError;

/// A hint attached to an error when printed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorHelp {
    pub hint: &'static str,
}

impl ErrorHelp {
    /// Look up the hint for an error, if there is one.
    pub fn for_error(error: &ModmanError) -> Option<Self> {
        let hint = match error {
            ModmanError::AlreadyInstalled(_) => {
                "Did you mean `modman update`? Use `install --needed` to skip installed mods."
            }
            ModmanError::NotInstalled(_) => {
                "Install the mod first, or use `install --update-needed`."
            }
            ModmanError::RuntimeVersionTooLow { .. } => {
                "Run `modman update-runtime` to fetch a newer runtime library."
            }
            ModmanError::InvalidRange(_) => {
                "Run `modman list-installed` to see valid ids."
            }
            ModmanError::FileCollision { .. } => {
                "Uninstall the mod that owns the file before installing this one."
            }
            ModmanError::UnsupportedPackageType(_) => {
                "Supported package types are .sporemod and .package."
            }
            ModmanError::Path(_) => {
                "Pass --library-dir, --base-data-dir, --expansion-data-dir and --runtime-dir (add --save-paths to remember them)."
            }
            _ => return None,
        };
        Some(Self { hint })
    }
}

/// Format an error for stderr, appending a hint line when one is known.
pub fn format_error_with_help(error: &ModmanError) -> String {
    match ErrorHelp::for_error(error) {
        Some(help) => format!("Error: {}\n  hint: {}", error, help.hint),
        None => format!("Error: {}", error),
    }
}
