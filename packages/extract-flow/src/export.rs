//! CSV projection of extracted records.

use crate::types::record::ExtractedRecord;

/// Header row of the export.
pub const CSV_HEADER: &str = "ID,Content,Type,Timestamp";

/// Render records as CSV with `ID,Content,Type,Timestamp` columns.
///
/// Content is always double-quoted with embedded quotes doubled; the
/// remaining columns never contain commas.
pub fn to_csv(records: &[ExtractedRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    for record in records {
        out.push('\n');
        out.push_str(&format!(
            "{},\"{}\",{},{}",
            record.id,
            record.content.replace('"', "\"\""),
            record.kind,
            record.timestamp.to_rfc3339(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(to_csv(&[]), "ID,Content,Type,Timestamp");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let records = vec![
            ExtractedRecord::new(1, r#"He said "hi""#),
            ExtractedRecord::new(2, "plain"),
        ];

        let csv = to_csv(&records);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "ID,Content,Type,Timestamp");
        assert!(lines[1].starts_with(r#"1,"He said ""hi""",extracted,"#));
        assert!(lines[2].starts_with(r#"2,"plain",extracted,"#));
    }
}
