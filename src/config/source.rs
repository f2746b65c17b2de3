use toml::{Table, Value};

use super::ConfigError;

/// A value contributed by a source, positioned at a path in the merged table.
///
/// An empty path means the value is a table merged into the root.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub path: Vec<String>,
    pub value: Value,
}

impl ConfigEntry {
    pub fn root(table: Table) -> Self {
        Self {
            path: Vec::new(),
            value: Value::Table(table),
        }
    }

    pub fn at_path(path: Vec<String>, value: Value) -> Self {
        Self { path, value }
    }
}

/// One layer of the settings pipeline.
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError>;
}

/// An in-memory layer, typically used for built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct TableSource {
    table: Table,
}

impl TableSource {
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}

impl ConfigSource for TableSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        Ok(vec![ConfigEntry::root(self.table.clone())])
    }
}

/// Merges `value` into `table` at `path`, creating intermediate tables.
///
/// Tables merge recursively; any other value replaces what was there.
pub fn merge_at_path(table: &mut Table, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        if let Value::Table(overlay) = value {
            deep_merge(table, overlay);
        }
        return;
    };

    if rest.is_empty() {
        match (table.get_mut(first), value) {
            (Some(Value::Table(base)), Value::Table(overlay)) => deep_merge(base, overlay),
            (_, value) => {
                table.insert(first.clone(), value);
            }
        }
        return;
    }

    if !matches!(table.get(first), Some(Value::Table(_))) {
        table.insert(first.clone(), Value::Table(Table::new()));
    }

    if let Some(Value::Table(nested)) = table.get_mut(first) {
        merge_at_path(nested, rest, value);
    }
}

fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
