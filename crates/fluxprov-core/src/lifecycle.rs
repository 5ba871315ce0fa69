// ── Lifecycle driver ──
//
// Owns the local identity of one managed object and walks it through
//
//   absent ─create─▶ present ─update*─▶ present ─delete─▶ absent
//                    present ─read finds nothing─▶ absent
//
// Mappers stay stateless; `Instance` is the only place the id lives.

use std::future::Future;

use tracing::{info, warn};

use crate::connection::Connection;
use crate::error::CoreError;
use crate::resource::Resource;

/// One managed object: its mapper, last known attributes, and remote id.
#[derive(Debug)]
pub struct Instance<R: Resource> {
    resource: R,
    id: Option<String>,
    attrs: R::Attrs,
}

impl<R: Resource> Instance<R> {
    /// A declared object that does not exist remotely yet.
    pub fn new(resource: R, attrs: R::Attrs) -> Self {
        Self {
            resource,
            id: None,
            attrs,
        }
    }

    /// An object known by id, e.g. restored from host state or imported.
    pub fn existing(resource: R, id: impl Into<String>, attrs: R::Attrs) -> Self {
        Self {
            resource,
            id: Some(id.into()),
            attrs,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.id.is_some()
    }

    pub fn attrs(&self) -> &R::Attrs {
        &self.attrs
    }

    pub fn into_parts(self) -> (Option<String>, R::Attrs) {
        (self.id, self.attrs)
    }

    fn type_name(&self) -> &'static str {
        self.resource.schema().type_name
    }

    fn require_id(&self, operation: &'static str) -> Result<String, CoreError> {
        self.id.clone().ok_or(CoreError::NotPresent {
            resource_type: self.type_name(),
            operation,
        })
    }

    /// Create the remote object, then refresh from the server.
    pub async fn create(&mut self, conn: &Connection) -> Result<(), CoreError> {
        if let Some(id) = &self.id {
            return Err(CoreError::AlreadyPresent {
                resource_type: self.type_name(),
                id: id.clone(),
            });
        }
        self.resource.validate(&self.attrs)?;

        let id = self.resource.create(conn, &self.attrs).await?;
        info!(resource_type = self.type_name(), id = %id, "created");
        self.id = Some(id);

        self.read(conn).await?;
        Ok(())
    }

    /// Refresh attributes from the server.
    ///
    /// Returns `false` (and clears the id) when the object is gone.
    pub async fn read(&mut self, conn: &Connection) -> Result<bool, CoreError> {
        let id = self.require_id("read")?;

        match self.resource.read(conn, &id, &self.attrs).await? {
            Some(attrs) => {
                self.attrs = attrs;
                Ok(true)
            }
            None => {
                info!(resource_type = self.type_name(), id = %id, "no longer exists remotely");
                self.id = None;
                Ok(false)
            }
        }
    }

    /// Move the object to `desired`.
    ///
    /// A change to any force-new attribute is rejected before anything is
    /// sent; the caller has to delete and recreate instead.
    pub async fn update(&mut self, conn: &Connection, desired: R::Attrs) -> Result<(), CoreError> {
        let id = self.require_id("update")?;
        let schema = self.resource.schema();

        let prior = serde_json::to_value(&self.attrs)?;
        let mut next = serde_json::to_value(&desired)?;
        let replaced = schema.force_new_changes(&prior, &next);
        if !replaced.is_empty() {
            return Err(CoreError::RequiresReplacement {
                resource_type: schema.type_name,
                attributes: replaced,
            });
        }
        schema.carry_computed(&prior, &mut next);
        if prior == next {
            return Ok(());
        }
        let desired: R::Attrs = serde_json::from_value(next)?;
        self.resource.validate(&desired)?;

        self.resource.update(conn, &id, &desired).await?;
        info!(resource_type = schema.type_name, id = %id, "updated");
        self.attrs = desired;

        self.read(conn).await?;
        Ok(())
    }

    /// Delete the remote object and forget its id.
    pub async fn delete(&mut self, conn: &Connection) -> Result<(), CoreError> {
        let id = self.require_id("delete")?;

        self.resource.delete(conn, &id, &self.attrs).await?;
        info!(resource_type = self.type_name(), id = %id, "deleted");
        self.id = None;
        Ok(())
    }
}

/// Run the follow-up step of a multi-step create, undoing the create if it
/// fails.
///
/// On failure of `step`, `rollback` is awaited once; its own failure is
/// logged and the original error is returned either way.
pub async fn create_with_rollback<T, S, SFut, B, BFut>(
    resource_type: &'static str,
    id: &str,
    step: S,
    rollback: B,
) -> Result<T, CoreError>
where
    S: FnOnce() -> SFut,
    SFut: Future<Output = Result<T, CoreError>>,
    B: FnOnce() -> BFut,
    BFut: Future<Output = Result<(), CoreError>>,
{
    match step().await {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(resource_type, id, error = %err, "create failed half-way, rolling back");
            if let Err(cleanup) = rollback().await {
                warn!(
                    resource_type,
                    id,
                    error = %cleanup,
                    "rollback failed; remote object may remain"
                );
            }
            Err(err)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn failure(context: &str) -> CoreError {
        CoreError::Internal(context.into())
    }

    #[tokio::test]
    async fn rollback_runs_once_on_failure() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = create_with_rollback(
            "test",
            "1",
            || async { Err(failure("step")) },
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;

        assert!(matches!(result, Err(CoreError::Internal(ref m)) if m == "step"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rollback_failure_keeps_original_error() {
        let result: Result<(), _> = create_with_rollback(
            "test",
            "1",
            || async { Err(failure("step")) },
            || async { Err(failure("rollback")) },
        )
        .await;

        assert!(matches!(result, Err(CoreError::Internal(ref m)) if m == "step"));
    }

    #[tokio::test]
    async fn success_skips_rollback() {
        let calls = AtomicUsize::new(0);
        let value = create_with_rollback(
            "test",
            "1",
            || async { Ok(7) },
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
