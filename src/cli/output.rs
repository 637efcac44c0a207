//! Output formatting utilities

use crate::application::BuildReport;

/// Format build reports for display
pub fn format_build_summary(reports: &[BuildReport]) -> String {
    if reports.is_empty() {
        return "Nothing built".to_string();
    }

    let mut output = String::new();
    for report in reports {
        let status = if report.compiled {
            "compiled"
        } else {
            "filtered"
        };
        output.push_str(&format!(
            "{}: {} file(s) {} -> {}\n",
            report.role,
            report.files,
            status,
            report.output_dir.display()
        ));
    }
    output
}
