//! Shell detection and export formatting.

use std::env;
use std::fmt;

use crate::{Error, Result};

/// Supported shell types for export formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    /// Bourne Again Shell (bash).
    Bash,
    /// Z Shell (zsh).
    Zsh,
    /// Friendly Interactive Shell (fish).
    Fish,
    /// `PowerShell`.
    PowerShell,
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bash => write!(f, "bash"),
            Self::Zsh => write!(f, "zsh"),
            Self::Fish => write!(f, "fish"),
            Self::PowerShell => write!(f, "powershell"),
        }
    }
}

impl ShellType {
    /// Detect the current shell from environment variables.
    ///
    /// Detection precedence:
    /// 1. `ZSH_VERSION` - indicates zsh
    /// 2. `FISH_VERSION` - indicates fish
    /// 3. `PSModulePath` - indicates `PowerShell`
    /// 4. `SHELL` environment variable (path like `/bin/bash`)
    /// 5. Default to bash if unable to determine
    #[must_use]
    pub fn detect() -> Self {
        if env::var("ZSH_VERSION").is_ok() {
            return Self::Zsh;
        }
        if env::var("FISH_VERSION").is_ok() {
            return Self::Fish;
        }
        if env::var("PSModulePath").is_ok() {
            return Self::PowerShell;
        }

        match env::var("SHELL") {
            Ok(path) if path.contains("zsh") => Self::Zsh,
            Ok(path) if path.contains("fish") => Self::Fish,
            Ok(path) if path.contains("pwsh") || path.contains("powershell") => Self::PowerShell,
            _ => Self::Bash,
        }
    }

    /// Parse a shell type from a string.
    ///
    /// Accepts "bash", "sh", "zsh", "fish", "powershell", "pwsh" and "ps",
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell name is not recognized.
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bash" | "sh" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            "powershell" | "pwsh" | "ps" => Ok(Self::PowerShell),
            _ => Err(Error::Validation {
                field: "shell".to_string(),
                message: format!(
                    "unknown shell type '{s}': supported shells are bash, zsh, fish, powershell"
                ),
            }),
        }
    }

    /// Format an export statement for this shell type.
    ///
    /// Values are quoted only when the shell would otherwise split or
    /// expand them. `PowerShell` values are always quoted.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::output::ShellType;
    ///
    /// assert_eq!(ShellType::Bash.format_export("PORT", "5000"), "export PORT=5000");
    /// assert_eq!(ShellType::Bash.format_export("NAME", "a b"), "export NAME='a b'");
    /// assert_eq!(ShellType::Fish.format_export("PORT", "5000"), "set -x PORT 5000");
    /// assert_eq!(ShellType::PowerShell.format_export("PORT", "5000"), "$env:PORT=\"5000\"");
    /// ```
    #[must_use]
    pub fn format_export(&self, var: &str, value: &str) -> String {
        match self {
            Self::Bash | Self::Zsh => format!("export {var}={}", posix_quote(value)),
            Self::Fish => format!("set -x {var} {}", fish_quote(value)),
            Self::PowerShell => format!("$env:{var}=\"{}\"", powershell_escape(value)),
        }
    }
}

fn is_shell_safe(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | ',' | '+' | '@')
        })
}

fn posix_quote(value: &str) -> String {
    if is_shell_safe(value) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn fish_quote(value: &str) -> String {
    if is_shell_safe(value) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn powershell_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '`' | '"' | '$') {
            out.push('`');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_from_string() {
        assert_eq!(ShellType::from_string("bash").unwrap(), ShellType::Bash);
        assert_eq!(ShellType::from_string("BASH").unwrap(), ShellType::Bash);
        assert_eq!(ShellType::from_string("sh").unwrap(), ShellType::Bash);
        assert_eq!(ShellType::from_string("zsh").unwrap(), ShellType::Zsh);
        assert_eq!(ShellType::from_string("fish").unwrap(), ShellType::Fish);
        assert_eq!(
            ShellType::from_string("pwsh").unwrap(),
            ShellType::PowerShell
        );

        let err = ShellType::from_string("tcsh").unwrap_err();
        assert!(err.to_string().contains("unknown shell type 'tcsh'"));
    }

    #[test]
    fn test_display_round_trips_through_from_string() {
        for shell in [
            ShellType::Bash,
            ShellType::Zsh,
            ShellType::Fish,
            ShellType::PowerShell,
        ] {
            assert_eq!(ShellType::from_string(&shell.to_string()).unwrap(), shell);
        }
    }

    #[test]
    fn test_format_export_plain_values() {
        assert_eq!(
            ShellType::Zsh.format_export("API_HOST", "localhost"),
            "export API_HOST=localhost"
        );
        assert_eq!(
            ShellType::Fish.format_export("API_URL", "http://a.example:80/x"),
            "set -x API_URL http://a.example:80/x"
        );
    }

    #[test]
    fn test_format_export_quotes_special_values() {
        assert_eq!(ShellType::Bash.format_export("EMPTY", ""), "export EMPTY=''");
        assert_eq!(
            ShellType::Bash.format_export("GREETING", "it's $HOME"),
            "export GREETING='it'\\''s $HOME'"
        );
        assert_eq!(
            ShellType::Fish.format_export("GREETING", "it's"),
            "set -x GREETING 'it\\'s'"
        );
        assert_eq!(
            ShellType::PowerShell.format_export("PRICE", "$5 \"off\""),
            "$env:PRICE=\"`$5 `\"off`\"\""
        );
    }

    #[test]
    #[serial]
    fn test_detect_defaults_to_bash() {
        let saved: Vec<_> = ["ZSH_VERSION", "FISH_VERSION", "PSModulePath", "SHELL"]
            .iter()
            .map(|name| (*name, env::var(name).ok()))
            .collect();
        for (name, _) in &saved {
            env::remove_var(name);
        }

        assert_eq!(ShellType::detect(), ShellType::Bash);
        env::set_var("SHELL", "/usr/bin/fish");
        assert_eq!(ShellType::detect(), ShellType::Fish);
        env::set_var("ZSH_VERSION", "5.9");
        assert_eq!(ShellType::detect(), ShellType::Zsh);

        for (name, value) in saved {
            match value {
                Some(v) => env::set_var(name, v),
                None => env::remove_var(name),
            }
        }
    }
}
