//! Reconciliation diagnostics
//!
//! A tenant whose local commit succeeded but whose administrator was never
//! created is a detectable state. Every occurrence is reported to a
//! [`DiagnosticSink`], separately from ordinary error logging, so that
//! reconciliation tooling can find it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::error;
use uuid::Uuid;

use tenant_shared::utils::mask_email;

use crate::domain::Tenant;

/// Tracing target of reconciliation events.
pub const RECONCILIATION_TARGET: &str = "tenant_reconciliation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InconsistencyReason {
    /// The identity service call returned an error or exceeded its deadline.
    RemoteFailure,
    /// The caller went away after the local commit, before the remote call finished.
    Cancelled,
}

impl InconsistencyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InconsistencyReason::RemoteFailure => "remote_failure",
            InconsistencyReason::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InconsistencyReport {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub admin_email: String,
    pub reason: InconsistencyReason,
    pub detail: String,
    pub detected_at: DateTime<Utc>,
}

pub trait DiagnosticSink: Send + Sync {
    fn report_inconsistency(&self, report: &InconsistencyReport);
}

/// Emits reports as `error` events on [`RECONCILIATION_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn report_inconsistency(&self, report: &InconsistencyReport) {
        error!(
            target: RECONCILIATION_TARGET,
            tenant_id = %report.tenant_id,
            tenant_name = %report.tenant_name,
            admin_email = %mask_email(&report.admin_email),
            reason = report.reason.as_str(),
            detail = %report.detail,
            detected_at = %report.detected_at.to_rfc3339(),
            "CRITICAL: tenant committed without administrator, manual reconciliation required"
        );
    }
}

/// Armed once the local commit succeeds.
///
/// Dropping an armed guard means the provisioning future was cancelled
/// between the commit and the end of the remote call, which is reported as
/// [`InconsistencyReason::Cancelled`].
pub struct InconsistencyGuard {
    sink: Arc<dyn DiagnosticSink>,
    pending: Option<PendingReport>,
}

struct PendingReport {
    tenant_id: Uuid,
    tenant_name: String,
    admin_email: String,
}

impl PendingReport {
    fn into_report(self, reason: InconsistencyReason, detail: String) -> InconsistencyReport {
        InconsistencyReport {
            tenant_id: self.tenant_id,
            tenant_name: self.tenant_name,
            admin_email: self.admin_email,
            reason,
            detail,
            detected_at: Utc::now(),
        }
    }
}

impl InconsistencyGuard {
    pub fn arm(sink: Arc<dyn DiagnosticSink>, tenant: &Tenant, admin_email: &str) -> Self {
        Self {
            sink,
            pending: Some(PendingReport {
                tenant_id: tenant.tenant_id,
                tenant_name: tenant.name.clone(),
                admin_email: admin_email.to_string(),
            }),
        }
    }

    /// The administrator exists; nothing to report.
    pub fn resolve(mut self) {
        self.pending = None;
    }

    /// Reports a remote failure and disarms the guard.
    pub fn report(mut self, reason: InconsistencyReason, detail: impl Into<String>) {
        if let Some(pending) = self.pending.take() {
            self.sink
                .report_inconsistency(&pending.into_report(reason, detail.into()));
        }
    }
}

impl Drop for InconsistencyGuard {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.sink.report_inconsistency(&pending.into_report(
                InconsistencyReason::Cancelled,
                "provisioning cancelled before the administrator was created".to_string(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_tenant, RecordingDiagnosticSink};

    #[test]
    fn test_resolved_guard_reports_nothing() {
        let sink = Arc::new(RecordingDiagnosticSink::default());
        let guard = InconsistencyGuard::arm(sink.clone(), &sample_tenant("Acme"), "a@acme.com");
        guard.resolve();
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn test_reported_guard_reports_once() {
        let sink = Arc::new(RecordingDiagnosticSink::default());
        let tenant = sample_tenant("Acme");
        let guard = InconsistencyGuard::arm(sink.clone(), &tenant, "a@acme.com");
        guard.report(InconsistencyReason::RemoteFailure, "identity service down");

        let reports = sink.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].tenant_id, tenant.tenant_id);
        assert_eq!(reports[0].reason, InconsistencyReason::RemoteFailure);
        assert_eq!(reports[0].detail, "identity service down");
    }

    #[test]
    fn test_dropped_guard_reports_cancellation() {
        let sink = Arc::new(RecordingDiagnosticSink::default());
        let tenant = sample_tenant("Acme");
        {
            let _guard = InconsistencyGuard::arm(sink.clone(), &tenant, "a@acme.com");
        }
        let reports = sink.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].reason, InconsistencyReason::Cancelled);
        assert_eq!(reports[0].tenant_name, "Acme");
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        let report = InconsistencyReport {
            tenant_id: Uuid::new_v4(),
            tenant_name: "Acme".to_string(),
            admin_email: "a@acme.com".to_string(),
            reason: InconsistencyReason::RemoteFailure,
            detail: "boom".to_string(),
            detected_at: Utc::now(),
        };
        TracingDiagnosticSink.report_inconsistency(&report);
    }
}
