//! Per-row outcomes and the end-of-run summary.

use crate::ui::messages;
use crate::utils::table::Table;

const WRAP_WIDTH: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Override created remotely.
    Uploaded { override_id: String },
    /// Dry-run: request built, nothing submitted.
    WouldUpload,
    /// Rejected before submission.
    Invalid { reason: String },
    /// Submission attempted and refused or lost.
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct RowReport {
    pub line: u64,
    pub attendee: String,
    pub schedule: String,
    pub outcome: RowOutcome,
}

#[derive(Debug, Default)]
pub struct Report {
    pub rows: Vec<RowReport>,
}

impl Report {
    pub fn push(&mut self, row: RowReport) {
        self.rows.push(row);
    }

    pub fn successes(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    RowOutcome::Uploaded { .. } | RowOutcome::WouldUpload
                )
            })
            .count()
    }

    pub fn failures(&self) -> usize {
        self.rows.len() - self.successes()
    }

    /// Exit code of the run: 0 when every row went through, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.failures() > 0 { 1 } else { 0 }
    }

    fn failure_messages(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|r| match &r.outcome {
                RowOutcome::Invalid { reason } => {
                    Some(format!("line {}: validation: {}", r.line, reason))
                }
                RowOutcome::Failed { reason } => {
                    Some(format!("line {}: submission: {}", r.line, reason))
                }
                _ => None,
            })
            .collect()
    }

    /// Print the summary table, the counters and the failure list.
    pub fn print(&self, dry_run: bool) {
        let title = if dry_run {
            "Upload summary (dry run)"
        } else {
            "Upload summary"
        };
        messages::header(title);

        let mut table = Table::new(&["LINE", "ATTENDEE", "SCHEDULE", "STATUS"]);
        for row in &self.rows {
            let status = match &row.outcome {
                RowOutcome::Uploaded { override_id } => format!("uploaded ({})", override_id),
                RowOutcome::WouldUpload => "would upload".to_string(),
                RowOutcome::Invalid { .. } => "invalid".to_string(),
                RowOutcome::Failed { .. } => "failed".to_string(),
            };
            table.add_row(vec![
                row.line.to_string(),
                row.attendee.clone(),
                row.schedule.clone(),
                status,
            ]);
        }

        if !table.is_empty() {
            print!("{}", table.render());
        }
        println!();

        let ok = self.successes();
        let ko = self.failures();

        if dry_run {
            messages::dry_run(format!("{} row(s) would be uploaded, {} failed", ok, ko));
        } else {
            messages::success(format!("{} row(s) uploaded", ok));
        }

        if ko > 0 {
            messages::warning(format!("{} row(s) failed:", ko));
            for msg in self.failure_messages() {
                for wrapped in textwrap::wrap(&msg, WRAP_WIDTH) {
                    eprintln!("   {}", wrapped);
                }
            }
        }
    }
}
