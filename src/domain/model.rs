use serde::Deserialize;
use thiserror::Error;

/// Instructional delivery mode of a course section.
///
/// The input file carries these as the literal strings `Face-to-Face`,
/// `Online` and `Hybrid`; anything else is rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modality {
    FaceToFace,
    Online,
    Hybrid,
}

impl Modality {
    /// Fixed emission order for report rows.
    pub const ALL: [Modality; 3] = [Modality::FaceToFace, Modality::Online, Modality::Hybrid];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Face-to-Face" => Some(Modality::FaceToFace),
            "Online" => Some(Modality::Online),
            "Hybrid" => Some(Modality::Hybrid),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Modality::FaceToFace => "Face-to-Face",
            Modality::Online => "Online",
            Modality::Hybrid => "Hybrid",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TermParseError {
    #[error("term code is shorter than four characters")]
    TooShort,
    #[error("first four characters are not a valid year")]
    InvalidYear,
}

/// Sort key derived from a term code such as `2023FA`.
///
/// The year is the leading four digits; the semester suffix maps SP to 1 and
/// FA to 2. Any other suffix (including none) maps to 0, so unknown terms
/// order before Spring within the same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermKey {
    pub year: i32,
    pub rank: u8,
}

impl TermKey {
    pub fn parse(term: &str) -> Result<Self, TermParseError> {
        let year_part = term.get(..4).ok_or(TermParseError::TooShort)?;
        let year: i32 = year_part.parse().map_err(|_| TermParseError::InvalidYear)?;
        let rank = match &term[4..] {
            "SP" => 1,
            "FA" => 2,
            _ => 0,
        };
        Ok(TermKey { year, rank })
    }
}

/// Raw CSV row shape. Column names follow the institutional export.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "TERM")]
    pub term: String,
    #[serde(rename = "CRS")]
    pub course: String,
    #[serde(rename = "CRS_SECT")]
    pub section: String,
    #[serde(rename = "MODALITY")]
    pub modality: String,
}

/// One normalized enrollment row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    pub term: String,
    pub term_key: TermKey,
    pub course: String,
    pub section: String,
    pub modality: Modality,
}

/// Enrollment and distinct-section counts for one modality of one
/// (course, term) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalityTally {
    pub enrollments: u32,
    pub sections: u32,
}

impl ModalityTally {
    pub fn add(&mut self, other: ModalityTally) {
        self.enrollments += other.enrollments;
        self.sections += other.sections;
    }
}

/// All modality tallies for one term of a course, plus the term subtotal.
/// Every modality is present, zeros included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermBreakdown {
    pub term: String,
    pub key: TermKey,
    pub tallies: [ModalityTally; 3],
    pub subtotal: ModalityTally,
}

impl TermBreakdown {
    pub fn tally(&self, modality: Modality) -> ModalityTally {
        self.tallies[modality.index()]
    }
}

/// Chronologically ordered per-term breakdowns for one course, terminated by
/// a grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    pub course: String,
    pub terms: Vec<TermBreakdown>,
    pub grand_total: ModalityTally,
}

/// Cover and page-furniture text, resolved from configuration.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub prefix: String,
    pub date_range: String,
    pub provider: String,
    pub published: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Modality,
    Subtotal,
    GrandTotal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: [String; 4],
    pub kind: RowKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub header: [&'static str; 4],
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSection {
    pub heading: String,
    pub table: TableBlock,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverBlock {
    pub title_lines: Vec<String>,
    pub attribution_lines: Vec<String>,
}

/// Running header/footer text for pages after the cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDecor {
    pub header_title: String,
    pub packet_label: String,
    pub attribution_tag: String,
}

/// Fully assembled document model, ready for pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub cover: CoverBlock,
    pub decor: PageDecor,
    pub sections: Vec<CourseSection>,
}

/// Output of the transform stage: aggregated summaries plus the assembled
/// document built from them.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub summaries: Vec<CourseSummary>,
    pub document: ReportDocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_key_recognized_suffixes() {
        assert_eq!(
            TermKey::parse("2023SP").unwrap(),
            TermKey { year: 2023, rank: 1 }
        );
        assert_eq!(
            TermKey::parse("2023FA").unwrap(),
            TermKey { year: 2023, rank: 2 }
        );
    }

    #[test]
    fn test_term_key_unrecognized_suffix_ranks_zero() {
        assert_eq!(
            TermKey::parse("2023SU").unwrap(),
            TermKey { year: 2023, rank: 0 }
        );
        assert_eq!(
            TermKey::parse("2023").unwrap(),
            TermKey { year: 2023, rank: 0 }
        );
    }

    #[test]
    fn test_term_key_invalid_year() {
        assert_eq!(TermKey::parse("20XXFA"), Err(TermParseError::InvalidYear));
        assert_eq!(TermKey::parse("FA"), Err(TermParseError::TooShort));
        assert_eq!(TermKey::parse(""), Err(TermParseError::TooShort));
    }

    #[test]
    fn test_term_ordering_spring_before_fall() {
        let sp = TermKey::parse("2020SP").unwrap();
        let fa = TermKey::parse("2020FA").unwrap();
        assert!(sp < fa);
    }

    #[test]
    fn test_term_ordering_unknown_sorts_first_within_year() {
        let unknown = TermKey::parse("2020SU").unwrap();
        let sp = TermKey::parse("2020SP").unwrap();
        assert!(unknown < sp);
    }

    #[test]
    fn test_term_ordering_year_dominates() {
        let fa_2019 = TermKey::parse("2019FA").unwrap();
        let sp_2020 = TermKey::parse("2020SP").unwrap();
        assert!(fa_2019 < sp_2020);
    }

    #[test]
    fn test_modality_parse_and_label() {
        for modality in Modality::ALL {
            assert_eq!(Modality::parse(modality.label()), Some(modality));
        }
        assert_eq!(Modality::parse("Remote"), None);
        assert_eq!(Modality::parse("online"), None);
    }

    #[test]
    fn test_modality_tally_add() {
        let mut total = ModalityTally::default();
        total.add(ModalityTally { enrollments: 3, sections: 1 });
        total.add(ModalityTally { enrollments: 2, sections: 2 });
        assert_eq!(total, ModalityTally { enrollments: 5, sections: 3 });
    }
}
