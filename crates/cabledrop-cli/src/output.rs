use console::{style, StyledObject};
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Kind of one-line status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Info,
    Warning,
    Error,
}

impl Status {
    fn name(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Info => "info",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }

    fn symbol(self) -> StyledObject<&'static str> {
        match self {
            Status::Success => style("✓").green().bold(),
            Status::Info => style("ℹ").blue().bold(),
            Status::Warning => style("⚠").yellow().bold(),
            Status::Error => style("✗").red().bold(),
        }
    }

    /// Warnings and errors stay off stdout so `--json` results remain one document
    fn to_stderr(self) -> bool {
        matches!(self, Status::Warning | Status::Error)
    }
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self { format: if json { OutputFormat::Json } else { OutputFormat::Human } }
    }

    pub fn success(&self, message: impl Display) {
        self.status(Status::Success, message);
    }

    pub fn info(&self, message: impl Display) {
        self.status(Status::Info, message);
    }

    pub fn warning(&self, message: impl Display) {
        self.status(Status::Warning, message);
    }

    pub fn error(&self, message: impl Display) {
        self.status(Status::Error, message);
    }

    /// Rounded table in human mode, `{"data": [...]}` in JSON mode
    pub fn table<T: Tabled + Serialize>(&self, rows: Vec<T>) {
        match self.format {
            OutputFormat::Human if rows.is_empty() => println!("{}", style("(no data)").dim()),
            OutputFormat::Human => {
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{}", table);
            }
            OutputFormat::Json => print_json(&serde_json::json!({ "data": rows }), false),
        }
    }

    /// `{"status": "success", "data": ...}` in JSON mode, the bare data otherwise
    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let text = match self.format {
            OutputFormat::Human => serde_json::to_string_pretty(&data)?,
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "status": "success",
                "data": data,
            }))?,
        };
        println!("{}", text);
        Ok(())
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        match self.format {
            OutputFormat::Human => println!("{}: {}", style(key).bold(), value),
            OutputFormat::Json => {
                print_json(&serde_json::json!({ key.to_string(): value.to_string() }), false)
            }
        }
    }

    pub fn section(&self, title: impl Display) {
        if let OutputFormat::Human = self.format {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    fn status(&self, status: Status, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                let line = format!("{} {}", status.symbol(), message);
                if status.to_stderr() {
                    eprintln!("{}", line);
                } else {
                    println!("{}", line);
                }
            }
            OutputFormat::Json => print_json(
                &serde_json::json!({
                    "status": status.name(),
                    "message": message.to_string(),
                }),
                status.to_stderr(),
            ),
        }
    }
}

fn print_json(value: &serde_json::Value, to_stderr: bool) {
    let Ok(text) = serde_json::to_string_pretty(value) else {
        return;
    };

    if to_stderr {
        eprintln!("{}", text);
    } else {
        println!("{}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_problems_go_to_stderr() {
        assert!(!Status::Success.to_stderr());
        assert!(!Status::Info.to_stderr());
        assert!(Status::Warning.to_stderr());
        assert!(Status::Error.to_stderr());
    }

    #[test]
    fn test_status_names() {
        let names: Vec<&str> = [Status::Success, Status::Info, Status::Warning, Status::Error]
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(names, vec!["success", "info", "warning", "error"]);
    }
}
