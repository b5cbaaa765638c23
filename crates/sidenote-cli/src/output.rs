//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use sidenote_core::{EntryRecord, EntrySummary};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single entry record in full
    pub fn print_record(&self, record: &EntryRecord) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", record.entry_id);
                println!("Title:   {}", record.title);
                println!("Status:  {}", record.status);
                println!("Created: {}", record.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated: {}", record.updated_at.format("%Y-%m-%d %H:%M"));
                if !record.note.is_empty() {
                    println!();
                    println!("{}", record.note);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(record).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", record.entry_id);
            }
        }
    }

    /// Print the active entry, or its absence
    pub fn print_active(&self, record: Option<&EntryRecord>) {
        match self.format {
            OutputFormat::Human => match record {
                Some(record) => println!(
                    "Active Entry: [{}] {} ({})",
                    record.entry_id, record.title, record.status
                ),
                None => println!("Active Entry: (none)"),
            },
            OutputFormat::Json => match record {
                Some(record) => println!("{}", serde_json::to_string_pretty(record).unwrap()),
                None => println!("null"),
            },
            OutputFormat::Quiet => {
                if let Some(record) = record {
                    println!("{}", record.entry_id);
                }
            }
        }
    }

    /// Print a list of entry summaries
    pub fn print_summaries(&self, summaries: &[EntrySummary]) {
        match self.format {
            OutputFormat::Human => {
                if summaries.is_empty() {
                    println!("No entries found.");
                    return;
                }
                for summary in summaries {
                    println!(
                        "{} | {:5} | {} | {}",
                        summary.entry_id,
                        summary.status.to_string(),
                        summary.updated_at.format("%Y-%m-%d %H:%M"),
                        truncate(&summary.title, 50)
                    );
                }
                println!("\n{} entry(ies)", summaries.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(summaries).unwrap());
            }
            OutputFormat::Quiet => {
                for summary in summaries {
                    println!("{}", summary.entry_id);
                }
            }
        }
    }

    /// Print a list of entry IDs (created or deleted batches)
    pub fn print_ids(&self, label: &str, ids: &[String]) {
        match self.format {
            OutputFormat::Human => {
                println!("{}: {}", label, ids.join(", "));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(ids).unwrap());
            }
            OutputFormat::Quiet => {
                for id in ids {
                    println!("{}", id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {}
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_tiny_max_len() {
        // max lengths shorter than the ellipsis must not underflow
        assert_eq!(truncate("abcdef", 2), "...");
        assert_eq!(truncate("abcdef", 0), "...");
        assert_eq!(truncate("ab", 2), "ab");
    }
}
