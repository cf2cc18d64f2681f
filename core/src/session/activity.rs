use super::export::csv_field;
use crate::error::Result;
use chrono::Local;
use std::fs;
use std::path::Path;

/// Layout of activity timestamps and export directory stamps
pub const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Current local time as a `%Y-%m-%d_%H-%M-%S` stamp
pub fn now_stamp() -> String {
    Local::now().format(STAMP_FORMAT).to_string()
}

/// Timestamped record of user actions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityLog {
    entries: Vec<(String, String)>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, timestamp: impl Into<String>, action: impl Into<String>) {
        self.entries.push((timestamp.into(), action.into()));
    }

    /// Records `action` at the current local time
    pub fn record_now(&mut self, action: impl Into<String>) {
        self.record(now_stamp(), action);
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the log as `timestamp,action` CSV
    pub fn to_csv(&self) -> String {
        let mut out = String::from("timestamp,action\n");
        for (timestamp, action) in &self.entries {
            out.push_str(&csv_field(timestamp));
            out.push(',');
            out.push_str(&csv_field(action));
            out.push('\n');
        }
        out
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv())?;
        Ok(())
    }
}
