//! Assembles the aggregated summaries into the document model consumed by
//! the PDF renderer: cover block, per-course tables, fixed note blocks.

use crate::domain::model::{
    CourseSection, CourseSummary, CoverBlock, Modality, PageDecor, ReportDocument, ReportMeta,
    RowKind, TableBlock, TableRow,
};

pub const TABLE_HEADER: [&str; 4] = ["Term", "Modality", "Enrollments", "Sections"];

pub fn build_document(meta: &ReportMeta, summaries: &[CourseSummary]) -> ReportDocument {
    ReportDocument {
        cover: build_cover(meta),
        decor: build_decor(meta),
        sections: summaries.iter().map(build_section).collect(),
    }
}

fn build_cover(meta: &ReportMeta) -> CoverBlock {
    CoverBlock {
        title_lines: vec![
            "Fall and Spring Enrollments and Sections by".to_string(),
            format!("Modality for {} Courses,", meta.prefix),
            meta.date_range.clone(),
        ],
        attribution_lines: vec![
            "Provided by".to_string(),
            meta.provider.clone(),
            meta.published.clone(),
        ],
    }
}

fn build_decor(meta: &ReportMeta) -> PageDecor {
    PageDecor {
        header_title: format!(
            "{} Courses by Term and Modality ({})",
            meta.prefix, meta.date_range
        ),
        packet_label: format!("Data Packet: {}", meta.prefix),
        attribution_tag: initials(&meta.provider),
    }
}

/// Footer tag from the provider name, e.g. "Center for Institutional
/// Effectiveness" becomes "CIE" (initials of capitalized words).
fn initials(provider: &str) -> String {
    provider
        .split_whitespace()
        .filter_map(|word| word.chars().next().filter(|c| c.is_uppercase()))
        .collect()
}

fn build_section(summary: &CourseSummary) -> CourseSection {
    let mut rows = Vec::new();

    for breakdown in &summary.terms {
        for (position, modality) in Modality::ALL.iter().enumerate() {
            let tally = breakdown.tally(*modality);
            rows.push(TableRow {
                cells: [
                    // The term code labels only the first row of its group.
                    if position == 0 {
                        breakdown.term.clone()
                    } else {
                        String::new()
                    },
                    modality.label().to_string(),
                    tally.enrollments.to_string(),
                    tally.sections.to_string(),
                ],
                kind: RowKind::Modality,
            });
        }
        rows.push(TableRow {
            cells: [
                String::new(),
                "Subtotal".to_string(),
                breakdown.subtotal.enrollments.to_string(),
                breakdown.subtotal.sections.to_string(),
            ],
            kind: RowKind::Subtotal,
        });
    }

    rows.push(TableRow {
        cells: [
            String::new(),
            format!("{} Grand Total:", summary.course),
            summary.grand_total.enrollments.to_string(),
            summary.grand_total.sections.to_string(),
        ],
        kind: RowKind::GrandTotal,
    });

    CourseSection {
        heading: format!("Course: {}", summary.course),
        table: TableBlock {
            header: TABLE_HEADER,
            rows,
        },
        notes: section_notes(),
    }
}

fn section_notes() -> Vec<String> {
    vec![
        "Source: Institutional enrollment records (end-of-term)".to_string(),
        "Note: Enrollment counts reflect distinct seats per section (not unduplicated students)."
            .to_string(),
        "Modality is determined by section codes (e.g., WB = Online, HY = Hybrid).".to_string(),
        "Time-of-day flags are based on section suffixes (below 599 = Day, above = Evening)."
            .to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ModalityTally, TermBreakdown, TermKey};

    fn meta() -> ReportMeta {
        ReportMeta {
            prefix: "ELC".to_string(),
            date_range: "Spring 2020 - Spring 2024".to_string(),
            provider: "Center for Institutional Effectiveness".to_string(),
            published: "December 2024".to_string(),
        }
    }

    fn summary_with_one_term() -> CourseSummary {
        let tallies = [
            ModalityTally { enrollments: 2, sections: 1 },
            ModalityTally { enrollments: 3, sections: 2 },
            ModalityTally::default(),
        ];
        let subtotal = ModalityTally { enrollments: 5, sections: 3 };
        CourseSummary {
            course: "ELC101".to_string(),
            terms: vec![TermBreakdown {
                term: "2023FA".to_string(),
                key: TermKey::parse("2023FA").unwrap(),
                tallies,
                subtotal,
            }],
            grand_total: subtotal,
        }
    }

    #[test]
    fn test_cover_and_decor_content() {
        let document = build_document(&meta(), &[]);

        assert!(document.cover.title_lines[1].contains("ELC"));
        assert_eq!(document.cover.attribution_lines[2], "December 2024");
        assert_eq!(
            document.decor.header_title,
            "ELC Courses by Term and Modality (Spring 2020 - Spring 2024)"
        );
        assert_eq!(document.decor.packet_label, "Data Packet: ELC");
        assert_eq!(document.decor.attribution_tag, "CIE");
    }

    #[test]
    fn test_empty_summaries_yield_cover_only_document() {
        let document = build_document(&meta(), &[]);
        assert!(document.sections.is_empty());
    }

    #[test]
    fn test_section_rows_per_term() {
        let document = build_document(&meta(), &[summary_with_one_term()]);

        let section = &document.sections[0];
        assert_eq!(section.heading, "Course: ELC101");
        // Three modality rows, one subtotal, one grand total.
        assert_eq!(section.table.rows.len(), 5);

        let kinds: Vec<RowKind> = section.table.rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RowKind::Modality,
                RowKind::Modality,
                RowKind::Modality,
                RowKind::Subtotal,
                RowKind::GrandTotal,
            ]
        );
    }

    #[test]
    fn test_term_code_only_on_first_modality_row() {
        let document = build_document(&meta(), &[summary_with_one_term()]);

        let rows = &document.sections[0].table.rows;
        assert_eq!(rows[0].cells[0], "2023FA");
        assert_eq!(rows[1].cells[0], "");
        assert_eq!(rows[2].cells[0], "");
    }

    #[test]
    fn test_zero_tally_row_is_present() {
        let document = build_document(&meta(), &[summary_with_one_term()]);

        let hybrid_row = &document.sections[0].table.rows[2];
        assert_eq!(hybrid_row.cells[1], "Hybrid");
        assert_eq!(hybrid_row.cells[2], "0");
        assert_eq!(hybrid_row.cells[3], "0");
    }

    #[test]
    fn test_grand_total_row_labels_course() {
        let document = build_document(&meta(), &[summary_with_one_term()]);

        let last = document.sections[0].table.rows.last().unwrap();
        assert_eq!(last.cells[1], "ELC101 Grand Total:");
        assert_eq!(last.cells[2], "5");
        assert_eq!(last.cells[3], "3");
    }

    #[test]
    fn test_initials_skip_lowercase_words() {
        assert_eq!(initials("Center for Institutional Effectiveness"), "CIE");
        assert_eq!(initials("Office of Data"), "OD");
        assert_eq!(initials(""), "");
    }
}
