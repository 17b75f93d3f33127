//! Admin CSV export of the per-user summary.

use chrono::NaiveDate;
use qureplus_common::models::UserAnalysisSummary;

pub const CSV_HEADER: [&str; 8] = [
    "Name",
    "Age",
    "City",
    "Mobile",
    "Email",
    "Total Analyses",
    "Avg Probability",
    "Last Analysis",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// `qureplus-data-YYYY-MM-DD.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("qureplus-data-{}.csv", date.format("%Y-%m-%d"))
}

/// Header plus one line per summary, joined by `\n` with no trailing newline.
pub fn render_summary_csv(rows: &[UserAnalysisSummary]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for row in rows {
        let fields = [
            escape(&row.full_name),
            row.age.to_string(),
            escape(&row.city),
            escape(&row.mobile),
            escape(row.email.as_deref().unwrap_or("")),
            row.total_analyses.to_string(),
            row.avg_probability
                .map(|p| format!("{p:.1}"))
                .unwrap_or_else(|| "0".to_string()),
            row.last_analysis_date
                .map(|d| d.format("%-m/%-d/%Y").to_string())
                .unwrap_or_else(|| "Never".to_string()),
        ];
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn summary(name: &str, email: Option<&str>, avg: Option<f64>, analyses: i64) -> UserAnalysisSummary {
        UserAnalysisSummary {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            age: 44,
            city: "Pune".to_string(),
            mobile: "+91 98765 43210".to_string(),
            email: email.map(str::to_string),
            user_created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            total_analyses: analyses,
            last_analysis_date: (analyses > 0)
                .then(|| Utc.with_ymd_and_hms(2025, 3, 7, 10, 0, 0).unwrap()),
            avg_probability: avg,
        }
    }

    #[test]
    fn two_rows_make_three_lines_in_fixed_column_order() {
        let csv = render_summary_csv(&[
            summary("Asha Rao", Some("asha@example.com"), Some(62.345), 3),
            summary("Ravi K", None, None, 0),
        ]);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Name,Age,City,Mobile,Email,Total Analyses,Avg Probability,Last Analysis"
        );
        assert_eq!(
            lines[1],
            "Asha Rao,44,Pune,+91 98765 43210,asha@example.com,3,62.3,3/7/2025"
        );
        assert_eq!(lines[2], "Ravi K,44,Pune,+91 98765 43210,,0,0,Never");
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(render_summary_csv(&[]).lines().count(), 1);
    }

    #[test]
    fn fields_with_commas_or_quotes_are_quoted() {
        let csv = render_summary_csv(&[summary("Rao, \"Asha\"", None, None, 0)]);
        assert!(csv.ends_with("\"Rao, \"\"Asha\"\"\",44,Pune,+91 98765 43210,,0,0,Never"));
    }

    #[test]
    fn filename_is_date_stamped() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(export_filename(date), "qureplus-data-2026-10-19.csv");
    }
}
