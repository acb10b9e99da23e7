use chrono::NaiveDate;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::report::ReportSummary;

pub const CSV_HEADER: [&str; 5] = ["Name", "Roll Number", "Class", "Date", "Status"];

pub fn summarize(records: &[AttendanceRecord]) -> ReportSummary {
    let present = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    let absent = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Absent)
        .count();
    let total = present + absent;

    let rate = if total > 0 {
        (100.0 * present as f64 / total as f64).round() as u32
    } else {
        0
    };

    ReportSummary {
        present,
        absent,
        total,
        rate,
    }
}

/// Comma separated rows in input order. Field values are written verbatim, so a
/// value containing a comma shifts the remaining columns of its row.
pub fn to_delimited_text(records: &[AttendanceRecord]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');

    for record in records {
        let (name, roll_number, class_name) = match &record.student {
            Some(s) => (s.name.as_str(), s.roll_number.as_str(), s.class_name.as_str()),
            None => ("", "", ""),
        };
        let date = record.date.format("%Y-%m-%d").to_string();
        let row: [&str; 5] = [name, roll_number, class_name, &date, record.status.as_ref()];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

pub fn export_filename(today: NaiveDate) -> String {
    format!("attendance-report-{}.csv", today.format("%Y-%m-%d"))
}
