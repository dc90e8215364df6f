//! JSON reporter
//!
//! Outputs the PAN answer sheet: `{"answers": [{unknown_text, author, score}]}`.

use crate::models::AttributionReport;
use anyhow::Result;

/// Render the answer sheet as pretty-printed JSON
pub fn render(report: &AttributionReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&report.answer_sheet())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let json_str = render(&test_report()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        let answers = parsed["answers"].as_array().expect("answers array");
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0]["author"], "candidate2015");
        assert_eq!(answers[1]["author"], "None");
    }

    #[test]
    fn test_json_empty_answers() {
        let mut report = test_report();
        report.attributions.clear();
        let parsed: serde_json::Value =
            serde_json::from_str(&render(&report).unwrap()).expect("parse JSON");
        assert_eq!(parsed["answers"].as_array().expect("answers array").len(), 0);
    }
}
