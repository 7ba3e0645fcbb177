use chrono::{DateTime, Local};
use courier_core::StepStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditClass {
    Info,
    Success,
    Failed,
    Error,
}

impl AuditClass {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditClass::Info => "info",
            AuditClass::Success => "success",
            AuditClass::Failed => "failed",
            AuditClass::Error => "error",
        }
    }
}

impl From<StepStatus> for AuditClass {
    fn from(status: StepStatus) -> Self {
        match status {
            StepStatus::Success => AuditClass::Success,
            StepStatus::Failed => AuditClass::Failed,
            StepStatus::Error => AuditClass::Error,
            StepStatus::Processing | StepStatus::Info => AuditClass::Info,
        }
    }
}

/// One received event, stored verbatim and stamped at receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub time: DateTime<Local>,
    pub step: String,
    pub status: StepStatus,
    pub message: String,
}

impl AuditEntry {
    pub fn class(&self) -> AuditClass {
        self.status.into()
    }

    pub fn time_label(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }

    pub fn display_line(&self) -> String {
        format!(
            "[{}] [{}] {}",
            self.time_label(),
            self.step.to_uppercase(),
            self.message
        )
    }
}

/// Append-only log for one session; a reset replaces the whole trail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditTrail {
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn append(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&AuditEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AuditEntry> {
        self.entries.iter()
    }
}
