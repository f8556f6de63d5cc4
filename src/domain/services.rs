//! Transform-stage domain logic: prefix filtering and the per-course,
//! per-term, per-modality aggregation.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::model::{
    CourseSummary, EnrollmentRecord, ModalityTally, TermBreakdown, TermKey,
};

/// Keeps rows whose course code starts with `prefix` and returns them along
/// with the distinct matching course codes, sorted lexicographically.
///
/// An empty result is valid; it yields a cover-only report downstream.
pub fn filter_by_prefix(
    records: Vec<EnrollmentRecord>,
    prefix: &str,
) -> (Vec<EnrollmentRecord>, Vec<String>) {
    let matching: Vec<EnrollmentRecord> = records
        .into_iter()
        .filter(|record| record.course.starts_with(prefix))
        .collect();

    let courses: BTreeSet<String> = matching.iter().map(|r| r.course.clone()).collect();

    (matching, courses.into_iter().collect())
}

#[derive(Debug, Default)]
struct TallyAccumulator {
    rows: u32,
    sections: BTreeSet<String>,
}

/// Groups records into per-course summaries.
///
/// Iteration runs over sorted (course, term, modality) keys, so subtotals and
/// grand totals hold by construction: modality tallies sum to the term
/// subtotal, subtotals sum to the grand total, and the grand total equals the
/// number of input rows for the course. Every term carries all three
/// modalities; a modality with no rows tallies 0/0 rather than being omitted.
/// Section counts are distinct section ids, not row counts.
pub fn aggregate(records: &[EnrollmentRecord]) -> Vec<CourseSummary> {
    let mut grouped: BTreeMap<&str, BTreeMap<(TermKey, &str), [TallyAccumulator; 3]>> =
        BTreeMap::new();

    for record in records {
        let cells = grouped
            .entry(record.course.as_str())
            .or_default()
            .entry((record.term_key, record.term.as_str()))
            .or_default();
        let cell = &mut cells[record.modality.index()];
        cell.rows += 1;
        cell.sections.insert(record.section.clone());
    }

    grouped
        .into_iter()
        .map(|(course, terms)| {
            let mut grand_total = ModalityTally::default();
            let terms: Vec<TermBreakdown> = terms
                .into_iter()
                .map(|((key, term), cells)| {
                    let tallies = cells.map(|cell| ModalityTally {
                        enrollments: cell.rows,
                        sections: cell.sections.len() as u32,
                    });
                    let mut subtotal = ModalityTally::default();
                    for tally in tallies {
                        subtotal.add(tally);
                    }
                    grand_total.add(subtotal);
                    TermBreakdown {
                        term: term.to_string(),
                        key,
                        tallies,
                        subtotal,
                    }
                })
                .collect();
            CourseSummary {
                course: course.to_string(),
                terms,
                grand_total,
            }
        })
        .collect()
}
