use crate::layout::DocumentLines;

/// Report-level header fields printed by the Sun Nuclear software.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportHeader {
    pub date: Option<String>,
    pub hospital: Option<String>,
}

/// Scan the document for the `Date: ` and `Hospital Name: ` header lines.
/// Stops as soon as both are found.
pub fn parse_header(doc: &DocumentLines) -> ReportHeader {
    let mut header = ReportHeader::default();

    for line in doc.lines() {
        if header.date.is_none() {
            header.date = extract_after_label(line, "Date: ");
        }
        if header.hospital.is_none() {
            header.hospital = extract_after_label(line, "Hospital Name: ");
        }
        if header.date.is_some() && header.hospital.is_some() {
            break;
        }
    }

    header
}

/// Extract the text following `label` anywhere in `line`.
///
/// Truncates at the next large whitespace gap (3+ spaces) so a neighbouring
/// column on the same row is not captured.
pub fn extract_after_label(line: &str, label: &str) -> Option<String> {
    let idx = line.find(label)?;
    let after = line[idx + label.len()..].trim_start();
    let value = match after.find("   ") {
        Some(gap) => after[..gap].trim(),
        None => after.trim(),
    };
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_basic() {
        let doc: DocumentLines = [
            "Sun Nuclear Corporation",
            "Hospital Name: General Hospital",
            "Date: 6/21/2019",
            "QA File Parameter",
        ]
        .into_iter()
        .collect();
        let h = parse_header(&doc);
        assert_eq!(h.date.as_deref(), Some("6/21/2019"));
        assert_eq!(h.hospital.as_deref(), Some("General Hospital"));
    }

    #[test]
    fn test_missing_header() {
        let doc: DocumentLines = ["Notes", "None"].into_iter().collect();
        assert_eq!(parse_header(&doc), ReportHeader::default());
    }

    #[test]
    fn test_extract_truncates_at_gap() {
        assert_eq!(
            extract_after_label("Date: 6/21/2019     Page 1", "Date: ").as_deref(),
            Some("6/21/2019")
        );
        assert_eq!(extract_after_label("Date: ", "Date: "), None);
        assert_eq!(extract_after_label("Plan Date", "Date: "), None);
    }
}
