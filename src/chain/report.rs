use chrono::{DateTime, Utc};
use serde::Serialize;

/// How one module took part in a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum InvocationStatus {
    /// Its answer became, or was appended to, the aggregate.
    Contributed,
    Empty,
    /// Answered a single value while the aggregate was already a list.
    Dropped,
    Failed(String),
    /// Never invoked; an earlier module gave a final answer.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationRecord {
    pub module: String,
    pub status: InvocationStatus,
}

/// Per-module trace of one dispatch, in registry order.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub capability: &'static str,
    pub started_at: DateTime<Utc>,
    pub invocations: Vec<InvocationRecord>,
}

impl DispatchReport {
    pub fn new(capability: &'static str) -> Self {
        Self {
            capability,
            started_at: Utc::now(),
            invocations: Vec::new(),
        }
    }

    pub fn record(&mut self, module: impl Into<String>, status: InvocationStatus) {
        self.invocations.push(InvocationRecord {
            module: module.into(),
            status,
        });
    }

    /// Names of the modules that actually ran, in order.
    pub fn invoked(&self) -> Vec<&str> {
        self.invocations
            .iter()
            .filter(|r| r.status != InvocationStatus::Skipped)
            .map(|r| r.module.as_str())
            .collect()
    }

    pub fn failures(&self) -> Vec<&InvocationRecord> {
        self.invocations
            .iter()
            .filter(|r| matches!(r.status, InvocationStatus::Failed(_)))
            .collect()
    }

    pub fn status_of(&self, module: &str) -> Option<&InvocationStatus> {
        self.invocations
            .iter()
            .find(|r| r.module == module)
            .map(|r| &r.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoked_excludes_skipped() {
        let mut report = DispatchReport::new("transfer");
        report.record("a", InvocationStatus::Failed("disk full".to_string()));
        report.record("b", InvocationStatus::Contributed);
        report.record("c", InvocationStatus::Skipped);

        assert_eq!(report.invoked(), vec!["a", "b"]);
        assert_eq!(report.failures().len(), 1);
        assert_eq!(report.status_of("c"), Some(&InvocationStatus::Skipped));
        assert_eq!(report.status_of("d"), None);
    }

    #[test]
    fn test_report_serialization() {
        let mut report = DispatchReport::new("transfer");
        report.record("a", InvocationStatus::Failed("boom".to_string()));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["capability"], "transfer");
        assert_eq!(json["invocations"][0]["status"]["status"], "failed");
        assert_eq!(json["invocations"][0]["status"]["detail"], "boom");
    }
}
