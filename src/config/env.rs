use toml::Value;

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Settings read from prefixed environment variables.
///
/// `PREFIX<sep>ETH<sep>DEFAULT_NODE` maps to the path `eth.default_node`.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
            vars: None,
        }
    }

    /// Reads from a fixed set of variables instead of the process environment.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Maps an explicit set of variables instead of the process environment.
    pub fn entries_from<I, K, V>(&self, vars: I) -> Vec<ConfigEntry>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);

        vars.into_iter()
            .filter_map(|(key, value)| {
                let path_str = key.as_ref().strip_prefix(&prefix_with_sep)?;
                if path_str.is_empty() {
                    return None;
                }

                let path = path_str
                    .split(&self.separator)
                    .map(str::to_lowercase)
                    .collect();

                Some(ConfigEntry::at_path(path, coerce_value(value.as_ref())))
            })
            .collect()
    }
}

impl ConfigSource for EnvSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        match &self.vars {
            Some(vars) => Ok(self.entries_from(vars.iter().map(|(k, v)| (k, v)))),
            None => Ok(self.entries_from(std::env::vars())),
        }
    }
}

fn coerce_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    if s.contains('.') && !s.contains(':') {
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_vars_map_to_lowercase_paths() {
        let source = EnvSource::new("DAPP", "__");
        let entries = source.entries_from([
            ("DAPP__ETH__DEFAULT_NODE", "wss://node.example:8546"),
            ("DAPP__IPFS__GATEWAY", "https://gw.example/ipfs"),
            ("OTHER__ETH__NETWORK_TYPE", "main"),
            ("DAPP__", "ignored"),
        ]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, vec!["eth", "default_node"]);
        assert_eq!(
            entries[0].value,
            Value::String("wss://node.example:8546".into())
        );
        assert_eq!(entries[1].path, vec!["ipfs", "gateway"]);
    }

    #[test]
    fn test_fixed_vars_replace_process_environment() {
        let source =
            EnvSource::new("DAPP", "__").with_vars([("DAPP__ETH__NETWORK_TYPE", "main")]);
        let entries = source.entries().unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, vec!["eth", "network_type"]);
    }

    #[test]
    fn test_value_coercion() {
        assert_eq!(coerce_value("TRUE"), Value::Boolean(true));
        assert_eq!(coerce_value("false"), Value::Boolean(false));
        assert_eq!(coerce_value("5001"), Value::Integer(5001));
        assert_eq!(coerce_value("-3"), Value::Integer(-3));
        assert_eq!(coerce_value("1.5"), Value::Float(1.5));
        assert_eq!(
            coerce_value("0x314159265dd8dbb310642f98f50c066173c1259b"),
            Value::String("0x314159265dd8dbb310642f98f50c066173c1259b".into())
        );
        assert_eq!(coerce_value("rinkeby"), Value::String("rinkeby".into()));
    }
}
