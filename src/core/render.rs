//! Renderer module
//!
//! Renders a WalkReport to different output formats: plain, jsonl, json

use crate::core::model::WalkReport;
use serde_json::json;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One path per line
    #[default]
    Plain,
    Jsonl,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(OutputFormat::Plain),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub show_skipped: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_skipped(mut self, show_skipped: bool) -> Self {
        self.show_skipped = show_skipped;
        self
    }
}

/// Renderer for walk reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a report to a string
    pub fn render(&self, report: &WalkReport) -> String {
        match self.config.format {
            OutputFormat::Plain => self.render_plain(report),
            OutputFormat::Jsonl => self.render_jsonl(report),
            OutputFormat::Json => self.render_json(report),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, report: &WalkReport, mut writer: W) -> std::io::Result<()> {
        let output = self.render(report);
        if output.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", output)
    }

    fn render_plain(&self, report: &WalkReport) -> String {
        let mut lines: Vec<String> = report
            .files
            .iter()
            .map(|f| f.path.display().to_string())
            .collect();

        if self.config.show_skipped {
            lines.extend(
                report
                    .skipped
                    .iter()
                    .map(|s| format!("skip\t{}\t{}", s.reason, s.path.display())),
            );
        }

        lines.join("\n")
    }

    /// One JSON object per line: files first, then skipped entries
    fn render_jsonl(&self, report: &WalkReport) -> String {
        let files = report
            .files
            .iter()
            .map(|f| json!({ "kind": "file", "path": f.path }));

        let skipped: Vec<_> = if self.config.show_skipped {
            report
                .skipped
                .iter()
                .map(|s| {
                    let mut value = serde_json::to_value(s).unwrap_or_default();
                    if let Some(obj) = value.as_object_mut() {
                        obj.insert("kind".to_string(), json!("skipped"));
                    }
                    value
                })
                .collect()
        } else {
            Vec::new()
        };

        files
            .chain(skipped)
            .filter_map(|value| {
                if self.config.pretty {
                    serde_json::to_string_pretty(&value).ok()
                } else {
                    serde_json::to_string(&value).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// The whole report as one JSON object
    fn render_json(&self, report: &WalkReport) -> String {
        let mut value = serde_json::to_value(report).unwrap_or_default();
        if !self.config.show_skipped {
            if let Some(obj) = value.as_object_mut() {
                obj.remove("skipped");
            }
        }

        if self.config.pretty {
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
        }
    }
}
