use std::{collections::BTreeMap, sync::Arc};

use parking_lot::RwLock;

use crate::{
    column_family::ColumnFamilyDescriptor,
    store::{
        InstanceName,
        table::{TableData, TableRef},
    },
    util::{Result, Status},
};

/// Maximum table id length accepted by the store
const MAX_TABLE_ID_LEN: usize = 50;

/// Manages all tables of one instance
///
/// # Thread Safety
///
/// The map is protected by a RwLock:
/// - Reads (lookup, exists, list) use the read lock
/// - Writes (create, delete) use the write lock
///
/// # Lifecycle
///
/// ```text
/// create_table → validate id & families → insert TableData
///         ↓
/// delete_table → remove from map → mark dropped (open scans notice)
/// ```
pub(crate) struct TableSet {
    instance: InstanceName,
    tables: RwLock<BTreeMap<String, TableRef>>,
}

impl TableSet {
    pub(crate) fn new(instance: InstanceName) -> Self {
        TableSet {
            instance,
            tables: RwLock::new(BTreeMap::new()),
        }
    }

    fn not_found(&self, table_id: &str) -> Status {
        Status::not_found(format!(
            "Table not found: {}",
            self.instance.table_path(table_id)
        ))
    }

    pub(crate) fn exists(&self, table_id: &str) -> bool {
        self.tables.read().contains_key(table_id)
    }

    /// Look up a live table
    pub(crate) fn get(&self, table_id: &str) -> Result<TableRef> {
        self.tables
            .read()
            .get(table_id)
            .map(Arc::clone)
            .ok_or_else(|| self.not_found(table_id))
    }

    pub(crate) fn create(
        &self,
        table_id: &str,
        families: Vec<ColumnFamilyDescriptor>,
    ) -> Result<TableRef> {
        validate_table_id(table_id)?;
        validate_families(&families)?;

        let mut tables = self.tables.write();
        if tables.contains_key(table_id) {
            return Err(Status::already_exists(format!(
                "Table already exists: {}",
                self.instance.table_path(table_id)
            )));
        }

        let table = Arc::new(TableData::new(
            table_id.to_string(),
            self.instance.table_path(table_id),
            families,
        ));
        tables.insert(table_id.to_string(), Arc::clone(&table));
        Ok(table)
    }

    pub(crate) fn delete(&self, table_id: &str) -> Result<()> {
        let removed = self.tables.write().remove(table_id);
        match removed {
            Some(table) => {
                table.mark_dropped();
                Ok(())
            },
            None => Err(self.not_found(table_id)),
        }
    }

    /// Table ids in ascending order
    pub(crate) fn list(&self) -> Vec<String> {
        self.tables.read().keys().cloned().collect()
    }

    pub(crate) fn count(&self) -> usize {
        self.tables.read().len()
    }
}

/// Ids are `[_a-zA-Z0-9][-_.a-zA-Z0-9]*`, at most 50 characters
fn validate_table_id(table_id: &str) -> Result<()> {
    let mut chars = table_id.chars();
    let valid_first = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphanumeric());
    let valid_rest = chars.all(|c| matches!(c, '-' | '_' | '.') || c.is_ascii_alphanumeric());

    if !valid_first || !valid_rest || table_id.len() > MAX_TABLE_ID_LEN {
        return Err(Status::invalid_argument(format!(
            "Invalid table id '{table_id}'"
        )));
    }
    Ok(())
}

fn validate_families(families: &[ColumnFamilyDescriptor]) -> Result<()> {
    if families.is_empty() {
        return Err(Status::invalid_argument(
            "A table needs at least one column family",
        ));
    }
    for (i, family) in families.iter().enumerate() {
        if family.name.is_empty() {
            return Err(Status::invalid_argument("Column family name must not be empty"));
        }
        if families[..i].iter().any(|f| f.name == family.name) {
            return Err(Status::invalid_argument(format!(
                "Column family '{}' listed twice",
                family.name
            )));
        }
        if family.options.max_versions == Some(0) {
            return Err(Status::invalid_argument(format!(
                "Column family '{}' must keep at least one version",
                family.name
            )));
        }
    }
    Ok(())
}
