//! CSV export of annotation status.
//!
//! One row per (domain, rating) pair; domains nobody has rated appear once
//! with blank rating columns. The document opens with a UTF-8 byte-order
//! mark so spreadsheet software picks the right encoding.

use chrono::{DateTime, SecondsFormat, Utc};

use super::{RatingScores, SubjectCode};

/// UTF-8 byte-order mark prefixed to every export.
pub const UTF8_BOM: char = '\u{feff}';

const COLUMNS: [&str; 9] = [
    "domain",
    "url",
    "rated",
    "rater",
    "relevance",
    "popularity",
    "professionalism",
    "remark",
    "rated_at",
];

/// Which domains an export covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportScope {
    /// Domains of a single subject.
    Subject(SubjectCode),
    /// Every domain, with a leading `subject_code` column.
    All,
}

impl ExportScope {
    /// Download file name for the export.
    pub fn filename(&self) -> String {
        match self {
            Self::Subject(code) => format!("{code}_domains.csv"),
            Self::All => "all_domains.csv".to_owned(),
        }
    }

    /// Subject filter, if any.
    pub fn subject(&self) -> Option<&SubjectCode> {
        match self {
            Self::Subject(code) => Some(code),
            Self::All => None,
        }
    }
}

/// Rating details carried by a rated export row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRating {
    pub rater: String,
    pub scores: RatingScores,
    pub remark: Option<String>,
    pub rated_at: DateTime<Utc>,
}

/// One exported line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub subject_code: SubjectCode,
    pub domain: String,
    pub url: String,
    pub rating: Option<ExportRating>,
}

impl ExportRow {
    fn cells(&self) -> [String; 9] {
        let rated = if self.rating.is_some() { "yes" } else { "no" };
        match &self.rating {
            Some(rating) => [
                self.domain.clone(),
                self.url.clone(),
                rated.to_owned(),
                rating.rater.clone(),
                rating.scores.relevance().get().to_string(),
                rating.scores.popularity().get().to_string(),
                rating.scores.professionalism().get().to_string(),
                rating.remark.clone().unwrap_or_default(),
                rating.rated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            ],
            None => [
                self.domain.clone(),
                self.url.clone(),
                rated.to_owned(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }
}

/// A rendered CSV export ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    filename: String,
    body: String,
}

impl CsvExport {
    /// Render `rows` for `scope`.
    ///
    /// # Examples
    /// ```
    /// use rating_backend::domain::{CsvExport, ExportRow, ExportScope, SubjectCode};
    ///
    /// let code = SubjectCode::new("MATH").unwrap();
    /// let rows = vec![ExportRow {
    ///     subject_code: code.clone(),
    ///     domain: "example.edu".into(),
    ///     url: "https://a.example,https://b.example".into(),
    ///     rating: None,
    /// }];
    /// let export = CsvExport::render(&ExportScope::Subject(code), &rows);
    /// assert_eq!(export.filename(), "MATH_domains.csv");
    /// assert!(export.body().starts_with('\u{feff}'));
    /// assert!(export.body().contains("\"https://a.example,https://b.example\""));
    /// ```
    pub fn render(scope: &ExportScope, rows: &[ExportRow]) -> Self {
        let with_subject = matches!(scope, ExportScope::All);
        let mut body = String::new();
        body.push(UTF8_BOM);

        let mut header: Vec<&str> = Vec::with_capacity(COLUMNS.len() + 1);
        if with_subject {
            header.push("subject_code");
        }
        header.extend(COLUMNS);
        push_record(&mut body, header);

        for row in rows {
            let cells = row.cells();
            let mut record: Vec<&str> = Vec::with_capacity(cells.len() + 1);
            if with_subject {
                record.push(row.subject_code.as_ref());
            }
            record.extend(cells.iter().map(String::as_str));
            push_record(&mut body, record);
        }

        Self {
            filename: scope.filename(),
            body,
        }
    }

    pub fn filename(&self) -> &str {
        self.filename.as_str()
    }

    /// BOM-prefixed CSV text.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

fn push_record<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes = field.contains([',', '"', '\r', '\n']);
    if !needs_quotes {
        out.push_str(field);
        return;
    }
    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
}
