//! Summary and table report generators for shell output.
//!
//! Provides compact, human-readable output for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::recommend::{FactorListing, RecommendationResult};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a single table cell may grow before it is truncated.
const MAX_CELL_WIDTH: usize = 28;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_recommendation_report(
        &self,
        result: &RecommendationResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        let title = config.title.as_deref().unwrap_or("Partner Recommendations");
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        lines.push(format!("{}  {}", self.color("Company:", "cyan"), result.affected));
        lines.push(format!(
            "{}  {}",
            self.color("Factors:", "cyan"),
            result.factors.join(", ")
        ));
        lines.push(format!(
            "{}  {} (lower score = closer)",
            self.color("Scoring:", "cyan"),
            result.mode
        ));
        lines.push(String::new());

        let recommendations = &result.graph.recommendations;
        if recommendations.is_empty() {
            lines.push(format!("  {}", self.color("No matching companies", "dim")));
        } else {
            lines.push(self.color(
                &format!(
                    "Closest {}:",
                    plural(recommendations.len(), "match", "matches")
                ),
                "bold",
            ));
            let name_width = recommendations
                .iter()
                .map(|r| display_width(&r.company))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH);
            for (rank, entry) in recommendations.iter().enumerate() {
                let score = format!("{:.2}", entry.total_score);
                lines.push(format!(
                    "  {}. {}  {}",
                    rank + 1,
                    pad(&truncate(&entry.company, MAX_CELL_WIDTH), name_width),
                    if rank == 0 {
                        self.color(&score, "green")
                    } else {
                        score
                    }
                ));
            }
        }

        if config.include_data_quality {
            lines.push(String::new());
            let quality = &result.data_quality;
            let text = format!("Data quality: {}", quality.summary());
            lines.push(if quality.is_clean() {
                self.color(&text, "dim")
            } else {
                self.color(&text, "yellow")
            });
        }

        Ok(lines.join("\n"))
    }

    fn generate_factor_report(
        &self,
        listing: &FactorListing,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        lines.push(self.color("Available Factors", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {}",
            self.color("Companies:", "cyan"),
            plural(listing.companies.len(), "company", "companies")
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Factors:", "cyan"),
            listing.factors.join(", ")
        ));
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

// ============================================================================
// Table
// ============================================================================

/// Table reporter for aligned terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// Render rows padded to shared column widths, header in bold.
    fn render_table(&self, header: &[String], rows: &[Vec<String>]) -> Vec<String> {
        let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(cell));
            }
        }
        for width in &mut widths {
            *width = (*width).min(MAX_CELL_WIDTH);
        }

        let mut lines = Vec::with_capacity(rows.len() + 2);
        let header_cells: Vec<String> = header
            .iter()
            .zip(&widths)
            .map(|(h, &w)| self.color(&pad(&truncate(h, w), w), "bold"))
            .collect();
        lines.push(header_cells.join("  "));
        lines.push("─".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));

        for row in rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| pad(&truncate(cell, w), w))
                .collect();
            lines.push(cells.join("  ").trim_end().to_string());
        }
        lines
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate_recommendation_report(
        &self,
        result: &RecommendationResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut header = Vec::with_capacity(result.columns.len() + 3);
        header.push("RANK".to_string());
        header.push("COMPANY".to_string());
        header.extend(result.columns.iter().map(|c| c.to_uppercase()));
        header.push("TOTAL SCORE".to_string());

        let rows: Vec<Vec<String>> = result
            .graph
            .recommendations
            .iter()
            .enumerate()
            .map(|(rank, entry)| {
                let mut row = Vec::with_capacity(header.len());
                row.push((rank + 1).to_string());
                row.push(entry.company.clone());
                for column in &result.columns {
                    row.push(
                        entry
                            .values
                            .get(column)
                            .map_or_else(|| "-".to_string(), ToString::to_string),
                    );
                }
                row.push(format!("{:.2}", entry.total_score));
                row
            })
            .collect();

        let mut lines = self.render_table(&header, &rows);
        if rows.is_empty() {
            lines.push(self.color("No matching companies", "dim"));
        }

        lines.push(String::new());
        let mut footer = format!(
            "Company: {} | Factors: {} | Mode: {} | {}",
            result.affected,
            result.factors.join(", "),
            result.mode,
            plural(rows.len(), "match", "matches")
        );
        if config.include_data_quality && !result.data_quality.is_clean() {
            footer.push_str(&format!(
                " | {} defaulted values",
                result.data_quality.total()
            ));
        }
        lines.push(footer);

        Ok(lines.join("\n"))
    }

    fn generate_factor_report(
        &self,
        listing: &FactorListing,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let header = ["FACTOR".to_string(), "LABEL".to_string()];
        let rows: Vec<Vec<String>> = listing
            .factor_info
            .iter()
            .map(|(factor, label)| vec![factor.clone(), label.clone()])
            .collect();

        let mut lines = self.render_table(&header, &rows);
        lines.push(String::new());
        lines.push(format!(
            "Companies ({}): {}",
            listing.companies.len(),
            listing.companies.join(", ")
        ));
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Right-pad `s` with spaces to `width` display columns.
fn pad(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - current))
    }
}

/// Truncate a string to fit within `max_width` display columns
fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let (budget, ellipsis) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ellipsis);
    out
}
