use crate::inspect::{Findings, Inspection};
use crate::models::MediaRow;
use std::fmt;

/// Placeholder shown for absent table cells
pub const ABSENT: &str = "-";

pub const NO_PLAYABLE_MEDIA: &str = "No compatible MP4 media file found for web playback.";

/// Optional debug sections of the report
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub show_xml: bool,
    pub show_json: bool,
}

/// Render an inspection as a plain-text report.
///
/// When extraction failed the report holds the error followed by the raw XML.
pub fn render_inspection(inspection: &Inspection, options: RenderOptions) -> String {
    Report {
        inspection,
        options,
    }
    .to_string()
}

/// Render media rows as an aligned text table
pub fn render_table(rows: &[MediaRow]) -> String {
    MediaTable(rows).to_string()
}

struct Report<'a> {
    inspection: &'a Inspection,
    options: RenderOptions,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inspection = self.inspection;
        writeln!(f, "Source: {}\n", inspection.source)?;

        match &inspection.outcome {
            Ok(findings) => {
                write_findings(f, findings)?;
                if self.options.show_xml {
                    write_raw_xml(f, &inspection.raw_xml)?;
                }
                if self.options.show_json {
                    section(f, "Parsed JSON")?;
                    let json = serde_json::to_string_pretty(&findings.creative)
                        .map_err(|_| fmt::Error)?;
                    writeln!(f, "{}", json)?;
                }
                Ok(())
            }
            Err(e) => {
                writeln!(f, "{}", e)?;
                write_raw_xml(f, &inspection.raw_xml)
            }
        }
    }
}

fn write_findings(f: &mut fmt::Formatter<'_>, findings: &Findings) -> fmt::Result {
    let creative = &findings.creative;
    writeln!(f, "VAST Version: {}", creative.version)?;
    writeln!(f, "Duration:     {}", creative.duration)?;
    writeln!(f, "Ad Title:     {}", creative.title)?;
    if !creative.description.is_empty() {
        writeln!(f, "Description:  {}", creative.description)?;
    }

    section(f, "Creative Preview")?;
    match &findings.playable_url {
        Some(url) => writeln!(f, "Playing source: {}", url)?,
        None => writeln!(f, "{}", NO_PLAYABLE_MEDIA)?,
    }

    section(f, "Media Files Technical Data")?;
    write!(f, "{}", MediaTable(&findings.rows))
}

fn write_raw_xml(f: &mut fmt::Formatter<'_>, raw_xml: &str) -> fmt::Result {
    section(f, "XML Source")?;
    writeln!(f, "{}", raw_xml.trim_end())
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "\n{}\n{}", title, "=".repeat(title.len()))
}

struct MediaTable<'a>(&'a [MediaRow]);

impl fmt::Display for MediaTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths = MediaRow::HEADERS.map(str::len);
        for row in self.0 {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.unwrap_or(ABSENT).len());
            }
        }

        write_line(f, &widths, MediaRow::HEADERS)?;
        let rule = widths.map(|w| "-".repeat(w));
        write_line(f, &widths, rule.each_ref().map(String::as_str))?;
        for row in self.0 {
            write_line(f, &widths, row.cells().map(|cell| cell.unwrap_or(ABSENT)))?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, widths: &[usize; 5], cells: [&str; 5]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}
