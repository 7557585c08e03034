//! Collaborator contracts for the query console.
//!
//! The console never talks to the platform directly. Everything remote -
//! schema listing, field listing, query execution - sits behind the
//! [`RecordService`] trait, and everything outbound - toasts, navigation
//! paths - behind [`Notifier`] and [`LinkResolver`]. The traits return
//! futures, allowing the caller to spawn them however they want, and making
//! every stage testable with mock collaborators.

use futures::future::BoxFuture;
use quarry_core::{EntityType, FieldName, Notice, NoticeKind, ResultSet, ServiceError};
use std::time::Duration;

// =============================================================================
// Record Service
// =============================================================================

/// The remote metadata/data service.
///
/// Implementations wrap the platform's managed procedures. All three calls
/// are asynchronous and may fail; the console converts every failure into a
/// user-visible notice and never retries on its own.
pub trait RecordService: Send + Sync {
    /// List every queryable entity type.
    fn list_entity_types(&self) -> BoxFuture<'static, Result<Vec<EntityType>, ServiceError>>;

    /// List the fields of one entity type.
    fn list_fields(
        &self,
        entity: EntityType,
    ) -> BoxFuture<'static, Result<Vec<FieldName>, ServiceError>>;

    /// Execute a query and return its rows plus column names.
    fn execute_query(&self, query: String) -> BoxFuture<'static, Result<ResultSet, ServiceError>>;
}

/// Await a service call, converting an overrun deadline into
/// `ServiceError::Timeout`.
pub(crate) async fn with_deadline<T>(
    limit: Duration,
    call: BoxFuture<'static, Result<T, ServiceError>>,
) -> Result<T, ServiceError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ServiceError::Timeout { duration: limit }),
    }
}

// =============================================================================
// Notifier
// =============================================================================

/// Fire-and-forget notification sink.
///
/// Consumed by an external toast/alerting surface; there is no return value
/// and no delivery guarantee.
pub trait Notifier: Send + Sync {
    /// Deliver one notice.
    fn notify(&self, notice: Notice);
}

/// Notifier that routes notices to `tracing`.
///
/// The default sink when no toast surface is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => tracing::info!(message = %notice.message, "success notice"),
            NoticeKind::Info => tracing::info!(message = %notice.message, "info notice"),
            NoticeKind::Error => tracing::warn!(message = %notice.message, "error notice"),
        }
    }
}

// =============================================================================
// Link Resolver
// =============================================================================

/// Deterministic navigation-path construction for a record id.
///
/// No remote call: the path is derived purely from the id.
pub trait LinkResolver: Send + Sync {
    /// Build the navigation path for a record id.
    fn record_link(&self, id: &str) -> String;
}

/// Resolver that prefixes record ids with a fixed base path.
#[derive(Debug, Clone)]
pub struct BasePathLinker {
    base: String,
}

impl BasePathLinker {
    /// Create a resolver with the given base path.
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for BasePathLinker {
    fn default() -> Self {
        Self::new("/")
    }
}

impl LinkResolver for BasePathLinker {
    fn record_link(&self, id: &str) -> String {
        format!("{}{}", self.base, id)
    }
}

// =============================================================================
// Mock Collaborators for Testing
// =============================================================================


// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;

    #[test]
    fn test_base_path_linker() {
        let linker = BasePathLinker::default();
        assert_eq!(linker.record_link("001xx0001"), "/001xx0001");

        let linker = BasePathLinker::new("/records/");
        assert_eq!(linker.record_link("42"), "/records/42");
    }

    #[tokio::test]
    async fn test_mock_service_entities() {
        let service = MockRecordService::new().with_entities(&["Account", "Contact"]);

        let entities = service.list_entity_types().await.unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].as_str(), "Account");
    }

    #[tokio::test]
    async fn test_mock_service_unconfigured_query_fails() {
        let service = MockRecordService::new();
        let err = service
            .execute_query("SELECT Id FROM Nope LIMIT 500".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Execution { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_deadline_times_out() {
        let service = MockRecordService::new().with_delayed_fields(
            "Account",
            Duration::from_secs(10),
            &["Industry"],
        );

        let err = with_deadline(
            Duration::from_secs(1),
            service.list_fields(EntityType::from("Account")),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::info("hello"));

        let notices = notifier.take();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Info);
        assert!(notifier.take().is_empty());
    }
}
