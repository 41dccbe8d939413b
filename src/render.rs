//! Text and Markdown rendering of recommendation reports.
//!
//! JSON output serializes the reports directly and does not go through here.

use tzscout_core::{format_offset_display, GenderTag, OffsetKey, OutputFormat};
use tzscout_stats::recommend::{DemographicReport, LocationReport};
use tzscout_stats::table::{Column, DemographicRow, LocationRow, TableLabels};

/// Format-independent table: headings plus rows of cells.
pub struct Grid {
    headers: Vec<String>,
    right_aligned: Vec<bool>,
    link_column: Option<usize>,
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn to_text(&self, use_color: bool) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .zip(&self.right_aligned)
                .map(|((cell, &width), &right)| {
                    if right {
                        format!("{cell:>width$}")
                    } else {
                        format!("{cell:<width$}")
                    }
                })
                .collect();
            format!("  {}", padded.join("  ")).trim_end().to_string()
        };

        let mut out = String::new();
        let header = line(&self.headers);
        if use_color {
            out.push_str(&format!("\x1b[1m{header}\x1b[0m\n"));
        } else {
            out.push_str(&header);
            out.push('\n');
        }
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&format!("  {}\n", rule.join("  ")));
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }

    pub fn to_markdown(&self) -> String {
        let mut out = format!("| {} |\n", self.headers.join(" | "));
        let rule: Vec<&str> = self
            .right_aligned
            .iter()
            .map(|&right| if right { "---:" } else { "---" })
            .collect();
        out.push_str(&format!("| {} |\n", rule.join(" | ")));

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let cell = cell.replace('|', "\\|");
                    if Some(i) == self.link_column {
                        format!("[{cell}]({cell})")
                    } else {
                        cell
                    }
                })
                .collect();
            out.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        out
    }
}

/// Lay out location rows in the column order given by `labels`.
pub fn location_grid(labels: &TableLabels, rows: &[LocationRow]) -> Grid {
    Grid {
        headers: labels
            .columns
            .iter()
            .map(|&c| labels.heading(c).to_string())
            .collect(),
        right_aligned: labels
            .columns
            .iter()
            .map(|c| *c != Column::Project)
            .collect(),
        link_column: labels.columns.iter().position(|c| *c == Column::Project),
        rows: rows
            .iter()
            .map(|r| {
                labels
                    .columns
                    .iter()
                    .map(|c| match c {
                        Column::Rank => r.rank.to_string(),
                        Column::Project => r.row.project_url.clone(),
                        Column::Contributors => r.row.contributor_count.to_string(),
                    })
                    .collect()
            })
            .collect(),
    }
}

pub fn demographic_grid(gender: GenderTag, rows: &[DemographicRow]) -> Grid {
    Grid {
        headers: vec![
            "Rank".into(),
            "Project Link".into(),
            format!("Contributors ({gender})"),
            "All Contributors".into(),
            "Female %".into(),
        ],
        right_aligned: vec![true, false, true, true, true],
        link_column: Some(1),
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    r.rank.to_string(),
                    r.row.project_url.clone(),
                    r.row.contributors.to_string(),
                    r.row.contributors_all_genders.to_string(),
                    match r.row.female_percent {
                        Some(p) => format!("{p:.1}"),
                        None => "n/a".into(),
                    },
                ]
            })
            .collect(),
    }
}

fn section(title: &str, grid: &Grid, empty: bool, format: OutputFormat, use_color: bool) -> String {
    match format {
        OutputFormat::Markdown => {
            if empty {
                format!("## {title}\n\n_No matching projects._\n")
            } else {
                format!("## {title}\n\n{}", grid.to_markdown())
            }
        }
        _ => {
            let heading = if use_color {
                format!("\x1b[1m\x1b[36m{title}\x1b[0m")
            } else {
                title.to_string()
            };
            if empty {
                format!("{heading}\n  no matching projects\n")
            } else {
                format!("{heading}\n{}", grid.to_text(use_color))
            }
        }
    }
}

fn offset_list(offsets: &[OffsetKey]) -> String {
    if offsets.is_empty() {
        "none".into()
    } else {
        offsets
            .iter()
            .map(|k| format_offset_display(*k))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Own-zone and nearby-zone sections of a location report.
pub fn location_report(
    report: &LocationReport,
    rank_first: bool,
    format: OutputFormat,
    use_color: bool,
) -> String {
    let labels = |base: TableLabels| if rank_first { base.rank_first() } else { base };
    let own = labels(TableLabels::own_zone());
    let nearby = labels(TableLabels::nearby_zones());

    let mut out = section(
        &format!("{} ({})", own.title, report.display),
        &location_grid(&own, &report.primary),
        report.primary.is_empty(),
        format,
        use_color,
    );
    out.push('\n');
    out.push_str(&section(
        &format!("{} ({})", nearby.title, offset_list(&report.nearby_offsets)),
        &location_grid(&nearby, &report.nearby),
        report.nearby.is_empty(),
        format,
        use_color,
    ));
    out
}

/// Own-zone, nearby-zone and worldwide sections of a demographic report.
///
/// The offset-scoped sections are left out when the dataset has no bucket
/// for the offset.
pub fn demographic_report(report: &DemographicReport, format: OutputFormat, use_color: bool) -> String {
    let mut filters = vec![format!("gender {}", report.gender)];
    if let Some(range) = report.diversity {
        filters.push(format!("female share {range}"));
    }
    filters.push(format!("{} ratio", report.scope));
    filters.push(format!("{} merge", report.merge));
    let summary = filters.join(", ");

    let mut out = match format {
        OutputFormat::Markdown => format!("_{summary}_\n\n"),
        _ => format!("{summary}\n\n"),
    };

    if report.offset_known {
        out.push_str(&section(
            &format!("{} ({})", TableLabels::own_zone().title, report.display),
            &demographic_grid(report.gender, &report.primary),
            report.primary.is_empty(),
            format,
            use_color,
        ));
        out.push('\n');
        out.push_str(&section(
            &TableLabels::nearby_zones().title,
            &demographic_grid(report.gender, &report.nearby),
            report.nearby.is_empty(),
            format,
            use_color,
        ));
        out.push('\n');
    }
    out.push_str(&section(
        &TableLabels::worldwide().title,
        &demographic_grid(report.gender, &report.global),
        report.global.is_empty(),
        format,
        use_color,
    ));
    out
}
