//! Labeled email datasets
//!
//! CSV files with at least `subject`, `body` and `label` columns. Other
//! columns are ignored; missing subject/body values, including the usual
//! NA spellings (`NA`, `null`, `NaN`, ...), become empty strings.

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{PhishError, Result};

/// Cell values read as missing, the same set pandas treats as NA
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One labeled email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub subject: String,
    pub body: String,
    /// 1 = phishing, 0 = benign
    pub label: u8,
}

impl LabeledExample {
    pub fn new(subject: impl Into<String>, body: impl Into<String>, label: u8) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            label,
        }
    }

    pub fn is_phishing(&self) -> bool {
        self.label == 1
    }
}

/// Load one CSV dataset
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledExample>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                PhishError::Dataset(format!(
                    "{}: missing required column '{}'",
                    path.display(),
                    name
                ))
            })
    };
    let subject_col = column("subject")?;
    let body_col = column("body")?;
    let label_col = column("label")?;

    let mut examples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let raw_label = record.get(label_col).unwrap_or("");
        let label = parse_label(raw_label).ok_or_else(|| {
            PhishError::Dataset(format!(
                "{}: row {} has invalid label '{}'",
                path.display(),
                row + 1,
                raw_label
            ))
        })?;

        examples.push(LabeledExample {
            subject: text_cell(record.get(subject_col)),
            body: text_cell(record.get(body_col)),
            label,
        });
    }

    info!(
        "Loaded {}: {} rows, {} columns",
        path.display(),
        examples.len(),
        headers.len()
    );

    Ok(examples)
}

/// Load and concatenate several datasets in order
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<LabeledExample>> {
    let mut all = Vec::new();
    for path in paths {
        all.extend(load_csv(path)?);
    }
    Ok(all)
}

fn text_cell(value: Option<&str>) -> String {
    match value {
        Some(v) if !NA_VALUES.contains(&v) => v.to_string(),
        _ => String::new(),
    }
}

/// Accepts `0`/`1` and their float spellings
fn parse_label(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return match v {
            0 => Some(0),
            1 => Some(1),
            _ => None,
        };
    }
    match raw.parse::<f64>() {
        Ok(v) if v == 0.0 => Some(0),
        Ok(v) if v == 1.0 => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_extra_columns_and_missing_values() {
        let file = write_csv(
            "sender,subject,body,label,urls\n\
             a@b.com,Hello,\"Body, with comma\",0,0\n\
             x@y.com,,Verify now,1,1\n\
             z@w.com,Only subject,,1.0,0\n\
             n@a.com,null,NaN,0,0\n\
             q@r.com,None,N/A,1,0\n\
             s@t.com,NA,nullable values stay,0,0\n",
        );

        let examples = load_csv(file.path()).unwrap();
        assert_eq!(examples.len(), 6);
        assert_eq!(examples[3], LabeledExample::new("", "", 0));
        assert_eq!(examples[4], LabeledExample::new("", "", 1));
        assert_eq!(examples[5].subject, "");
        assert_eq!(examples[5].body, "nullable values stay");
        assert_eq!(examples[0], LabeledExample::new("Hello", "Body, with comma", 0));
        assert_eq!(examples[1].subject, "");
        assert!(examples[1].is_phishing());
        assert_eq!(examples[2].body, "");
        assert_eq!(examples[2].label, 1);
    }

    #[test]
    fn test_missing_column() {
        let file = write_csv("subject,label\nHi,0\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("body"));
    }

    #[test]
    fn test_invalid_label() {
        let file = write_csv("subject,body,label\nHi,there,spam\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid label"));
    }

    #[test]
    fn test_load_all_concatenates() {
        let a = write_csv("subject,body,label\nA,a,0\n");
        let b = write_csv("subject,body,label\nB,b,1\nC,c,0\n");

        let all = load_all(&[a.path(), b.path()]).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].subject, "A");
        assert_eq!(all[2].subject, "C");
    }

    #[test]
    fn test_text_cell() {
        assert_eq!(text_cell(None), "");
        assert_eq!(text_cell(Some("nan")), "");
        assert_eq!(text_cell(Some("#N/A")), "");
        assert_eq!(text_cell(Some("Null")), "Null");
        assert_eq!(text_cell(Some(" NA")), " NA");
        assert_eq!(text_cell(Some("Hello")), "Hello");
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("0"), Some(0));
        assert_eq!(parse_label(" 1 "), Some(1));
        assert_eq!(parse_label("1.0"), Some(1));
        assert_eq!(parse_label("2"), None);
        assert_eq!(parse_label(""), None);
    }
}
