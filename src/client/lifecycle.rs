use tracing::{info, warn};

use crate::{
    client::StoreContext,
    column_family::ColumnFamilyDescriptor,
    store::{CreateTableRequest, TableDescriptor},
    util::Result,
};

/// What `create` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Creates and deletes tables
pub struct TableLifecycleManager<'a> {
    ctx: &'a StoreContext,
}

impl<'a> TableLifecycleManager<'a> {
    pub fn new(ctx: &'a StoreContext) -> Self {
        TableLifecycleManager { ctx }
    }

    pub fn exists(&self, table_id: &str) -> Result<bool> {
        self.ctx.admin().exists(table_id)
    }

    pub fn describe(&self, table_id: &str) -> Result<TableDescriptor> {
        self.ctx.admin().get_table(table_id)
    }

    /// Create `table_id` unless it is already there
    ///
    /// An existing table is left untouched and reported as
    /// `AlreadyExists`, even if its families differ from `families`; the
    /// difference is only logged.
    pub fn create<F>(&self, table_id: &str, families: F) -> Result<CreateOutcome>
    where
        F: IntoIterator,
        F::Item: Into<ColumnFamilyDescriptor>,
    {
        let families: Vec<ColumnFamilyDescriptor> = families.into_iter().map(Into::into).collect();

        if self.exists(table_id)? {
            self.warn_on_schema_drift(table_id, &families);
            info!(table = table_id, "table already exists");
            return Ok(CreateOutcome::AlreadyExists);
        }

        info!(table = table_id, "creating table");
        let request = families
            .into_iter()
            .fold(CreateTableRequest::of(table_id), |req, f| req.add_family(f));

        match self.ctx.admin().create_table(request) {
            Ok(descriptor) => {
                info!(table = %descriptor.name, "table created successfully");
                Ok(CreateOutcome::Created)
            },
            // created by someone else between exists() and create_table()
            Err(status) if status.is_already_exists() => Ok(CreateOutcome::AlreadyExists),
            Err(status) => Err(status),
        }
    }

    /// Delete `table_id`; `NotFound` if it does not exist
    pub fn delete(&self, table_id: &str) -> Result<()> {
        info!(table = table_id, "deleting table");
        self.ctx.admin().delete_table(table_id)?;
        info!(table = table_id, "table deleted successfully");
        Ok(())
    }

    fn warn_on_schema_drift(&self, table_id: &str, requested: &[ColumnFamilyDescriptor]) {
        let Ok(existing) = self.describe(table_id) else {
            return;
        };
        let have = existing.family_names();
        let missing: Vec<&str> = requested
            .iter()
            .map(|f| f.name.as_str())
            .filter(|name| !have.contains(name))
            .collect();
        if !missing.is_empty() {
            warn!(
                table = table_id,
                ?missing,
                existing = ?have,
                "existing table lacks requested column families"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryStore, InstanceName};

    fn ctx() -> StoreContext {
        StoreContext::connect(&InMemoryStore::new(InstanceName::new("p", "i")))
    }

    #[test]
    fn test_create_is_idempotent() {
        let ctx = ctx();
        let lifecycle = TableLifecycleManager::new(&ctx);

        assert!(!lifecycle.exists("demo").unwrap());
        assert_eq!(lifecycle.create("demo", ["cf1"]).unwrap(), CreateOutcome::Created);
        assert!(lifecycle.exists("demo").unwrap());
        assert_eq!(
            lifecycle.create("demo", ["cf1"]).unwrap(),
            CreateOutcome::AlreadyExists
        );
    }

    #[test]
    fn test_create_with_different_families_keeps_existing() {
        let ctx = ctx();
        let lifecycle = TableLifecycleManager::new(&ctx);
        lifecycle.create("demo", ["cf1"]).unwrap();

        assert_eq!(
            lifecycle.create("demo", ["cf1", "cf2"]).unwrap(),
            CreateOutcome::AlreadyExists
        );
        assert_eq!(lifecycle.describe("demo").unwrap().family_names(), vec!["cf1"]);
    }

    #[test]
    fn test_delete_round_trip() {
        let ctx = ctx();
        let lifecycle = TableLifecycleManager::new(&ctx);
        lifecycle.create("demo", ["cf1"]).unwrap();

        lifecycle.delete("demo").unwrap();
        assert!(!lifecycle.exists("demo").unwrap());

        let err = lifecycle.delete("demo").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_invalid_request_propagates() {
        let ctx = ctx();
        let lifecycle = TableLifecycleManager::new(&ctx);
        let err = lifecycle
            .create("demo", Vec::<ColumnFamilyDescriptor>::new())
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
