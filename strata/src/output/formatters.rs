//! Output formatter implementations.

use crate::config::accessor::{flatten, KEY_DELIMITER};
use crate::{Error, Result, Value};

use super::{OutputFormatter, ShellType};

/// Validates that a string is a valid environment variable name.
///
/// Valid names must:
/// - Start with a letter or underscore
/// - Contain only letters, digits, and underscores
fn is_valid_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Converts a dotted configuration key to an environment variable name.
///
/// - Converts to uppercase
/// - Replaces dots and hyphens with underscores
/// - Validates the result
fn key_to_env_var(key: &str) -> Result<String> {
    let var_name = key.to_uppercase().replace([KEY_DELIMITER, '-'], "_");

    if !is_valid_env_var_name(&var_name) {
        return Err(Error::Validation {
            field: "environment_variable".to_string(),
            message: format!(
                "invalid environment variable name '{var_name}' for key '{key}': must contain only alphanumeric characters and underscores, and start with a letter or underscore"
            ),
        });
    }

    Ok(var_name)
}

/// Flatten a value into `(dotted key, leaf)` pairs in key order.
fn leaves<'a>(key: Option<&str>, value: &'a Value) -> Result<Vec<(String, &'a Value)>> {
    match (key, value) {
        (_, Value::Mapping(map)) if !map.is_empty() => Ok(flatten(map)
            .into_iter()
            .map(|(path, leaf)| match key {
                Some(k) => (format!("{k}{KEY_DELIMITER}{path}"), leaf),
                None => (path, leaf),
            })
            .collect()),
        (None, Value::Mapping(_)) => Ok(Vec::new()),
        (Some(k), leaf) => Ok(vec![(k.to_string(), leaf)]),
        (None, _) => Err(Error::Validation {
            field: "key".to_string(),
            message: "a key is required to render a single value as variables".to_string(),
        }),
    }
}

fn leaf_text(value: &Value) -> String {
    value.scalar_string().unwrap_or_else(|| value.to_string())
}

fn dotenv_quote(value: &str) -> String {
    let plain = value.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | ',' | '+' | '@')
    });
    if !value.is_empty() && plain {
        return value.to_string();
    }
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}

/// Formatter for YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, _key: Option<&str>, value: &Value) -> Result<String> {
        let yaml = serde_yaml::to_string(value).map_err(|e| Error::Validation {
            field: "yaml_output".to_string(),
            message: format!("failed to serialize to YAML: {e}"),
        })?;
        Ok(yaml.trim_end().to_string())
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, _key: Option<&str>, value: &Value) -> Result<String> {
        serde_json::to_string_pretty(value).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}

/// Formatter for dotenv (.env file) format.
///
/// Leaf keys become `UPPER_SNAKE` variable names.
pub struct DotenvFormatter;

impl OutputFormatter for DotenvFormatter {
    fn format(&self, key: Option<&str>, value: &Value) -> Result<String> {
        let mut lines = Vec::new();
        for (path, leaf) in leaves(key, value)? {
            let var_name = key_to_env_var(&path)?;
            lines.push(format!("{var_name}={}", dotenv_quote(&leaf_text(leaf))));
        }
        Ok(lines.join("\n"))
    }
}

/// Formatter for shell-specific export statements.
pub struct ExportFormatter {
    shell: ShellType,
}

impl ExportFormatter {
    /// Create a new export formatter for the given shell.
    #[must_use]
    pub const fn new(shell: ShellType) -> Self {
        Self { shell }
    }
}

impl OutputFormatter for ExportFormatter {
    fn format(&self, key: Option<&str>, value: &Value) -> Result<String> {
        let mut exports = Vec::new();
        for (path, leaf) in leaves(key, value)? {
            let var_name = key_to_env_var(&path)?;
            exports.push(self.shell.format_export(&var_name, &leaf_text(leaf)));
        }
        Ok(exports.join("\n"))
    }
}

/// Formatter for human-readable output.
///
/// A single scalar prints as its bare value; trees print one
/// `key = value` line per leaf.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format(&self, key: Option<&str>, value: &Value) -> Result<String> {
        if !value.is_mapping() {
            return Ok(leaf_text(value));
        }

        let entries = leaves(key, value)?;
        if entries.is_empty() {
            return Ok("No settings.".to_string());
        }

        let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        let lines: Vec<String> = entries
            .iter()
            .map(|(k, v)| format!("{k:<width$} = {}", leaf_text(v)))
            .collect();
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Map;

    fn settings() -> Value {
        let yaml = "
api:
  host: localhost
  port: 8080
services:
  foo:
    float: 10.5
    name: the foo
  tags: [a, b]
";
        let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        Value::from(parsed)
    }

    // ========================================================================
    // Environment Variable Name Tests
    // ========================================================================

    #[test]
    fn test_is_valid_env_var_name() {
        assert!(is_valid_env_var_name("API_HOST"));
        assert!(is_valid_env_var_name("_PRIVATE"));
        assert!(is_valid_env_var_name("V2"));

        assert!(!is_valid_env_var_name(""));
        assert!(!is_valid_env_var_name("2FA"));
        assert!(!is_valid_env_var_name("API HOST"));
        assert!(!is_valid_env_var_name("PORT_CAFÉ"));
    }

    #[test]
    fn test_key_to_env_var() {
        assert_eq!(key_to_env_var("api.host").unwrap(), "API_HOST");
        assert_eq!(
            key_to_env_var("services.foo-bar.url").unwrap(),
            "SERVICES_FOO_BAR_URL"
        );
        assert!(key_to_env_var("1st.key").is_err());
        assert!(key_to_env_var("with space").is_err());
    }

    #[test]
    fn test_leaves_requires_key_for_scalar() {
        let err = leaves(None, &Value::from(5_i64)).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "key"));
    }

    #[test]
    fn test_leaves_prefixes_key() {
        let tree = settings();
        let api = tree.as_mapping().unwrap().get("api").unwrap();
        let entries = leaves(Some("api"), api).unwrap();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["api.host", "api.port"]);
    }

    // ========================================================================
    // Formatter Tests
    // ========================================================================

    #[test]
    fn test_yaml_formatter() {
        let out = YamlFormatter.format(None, &settings()).unwrap();
        let reparsed: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(Value::from(reparsed), settings());
        assert!(!out.ends_with('\n'));

        let scalar = YamlFormatter
            .format(Some("api.host"), &Value::from("localhost"))
            .unwrap();
        assert_eq!(scalar, "localhost");
    }

    #[test]
    fn test_json_formatter() {
        let out = JsonFormatter.format(None, &settings()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["api"]["port"], 8080);
        assert_eq!(json["services"]["foo"]["float"], 10.5);
        assert_eq!(json["services"]["tags"][1], "b");
    }

    #[test]
    fn test_dotenv_formatter() {
        let out = DotenvFormatter.format(None, &settings()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "API_HOST=localhost",
                "API_PORT=8080",
                "SERVICES_FOO_FLOAT=10.5",
                "SERVICES_FOO_NAME=\"the foo\"",
                "SERVICES_TAGS=\"[\\\"a\\\",\\\"b\\\"]\"",
            ]
        );
    }

    #[test]
    fn test_dotenv_formatter_single_value() {
        let out = DotenvFormatter
            .format(Some("api.port"), &Value::Integer(8080))
            .unwrap();
        assert_eq!(out, "API_PORT=8080");
    }

    #[test]
    fn test_export_formatter_bash() {
        let formatter = ExportFormatter::new(ShellType::Bash);
        let mut foo = Map::new();
        foo.insert("name".to_string(), Value::from("the foo"));
        let out = formatter
            .format(Some("services.foo"), &Value::Mapping(foo))
            .unwrap();
        assert_eq!(out, "export SERVICES_FOO_NAME='the foo'");
    }

    #[test]
    fn test_export_formatter_powershell() {
        let formatter = ExportFormatter::new(ShellType::PowerShell);
        let out = formatter.format(Some("api.port"), &Value::Integer(80)).unwrap();
        assert_eq!(out, "$env:API_PORT=\"80\"");
    }

    #[test]
    fn test_human_formatter_tree() {
        let out = HumanFormatter.format(None, &settings()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "api.host           = localhost");
        assert_eq!(lines[3], "services.foo.name  = the foo");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_human_formatter_scalar_and_empty() {
        let scalar = HumanFormatter.format(Some("x"), &Value::Float(10.5)).unwrap();
        assert_eq!(scalar, "10.5");
        assert_eq!(
            HumanFormatter.format(None, &Value::Mapping(Map::new())).unwrap(),
            "No settings."
        );
    }
}
