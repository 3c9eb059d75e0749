//! `show-options`: print what the parser made of the command line.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::cli::command::{Command, Invocation, OptionDeclarations};
use crate::error::UsageError;
use crate::option::{CliOption, Literal, OptionDef};
use crate::runtime::Runtime;

/// Label recording the format of the last report.
pub const LAST_FORMAT_LABEL: &str = "last-format";

fn format_def() -> OptionDef {
    OptionDef::text(Literal::both('f', "format"))
}

fn output_format_def() -> OptionDef {
    OptionDef::text(Literal::long("output-format"))
}

fn since_def() -> OptionDef {
    OptionDef::timestamp(Literal::long("since"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

impl Format {
    fn parse(raw: &str) -> Result<Self, UsageError> {
        match raw.to_ascii_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            _ => Err(UsageError::WrongType {
                option: format_def().to_string(),
                expected: "a \"json\" or \"text\"",
                actual: raw.to_string(),
            }),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Json => "json",
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    app: &'a str,
    global: &'a [CliOption],
    command: &'a [CliOption],
    #[serde(skip_serializing_if = "Option::is_none")]
    since: Option<DateTime<Utc>>,
    labels: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    runtime: Option<&'a Runtime>,
}

/// Prints global and command options as text or JSON.
#[derive(Debug, Default)]
pub struct ShowOptions;

impl Command for ShowOptions {
    crate::command_name!(ShowOptions);

    fn description(&self) -> &str {
        "Show parsed global and command options"
    }

    fn declare(&self, options: &mut OptionDeclarations) {
        options
            .optional(format_def())
            .equivalent(&format_def(), &output_format_def())
            .optional(since_def());
    }

    fn execute(&mut self, invocation: &mut Invocation<'_>) -> anyhow::Result<()> {
        let options = invocation.options;
        let format = options
            .text(&format_def())
            .or_else(|| options.text(&output_format_def()))
            .map(Format::parse)
            .transpose()?
            .unwrap_or(Format::Text);
        invocation
            .config
            .set_label(LAST_FORMAT_LABEL, format.as_str());

        let report = Report {
            app: invocation.config.app_name(),
            global: invocation.config.options(),
            command: options.as_slice(),
            since: options.timestamp(&since_def()),
            labels: invocation.config.labels(),
            runtime: invocation.runtime,
        };

        match format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *invocation.out, &report)?;
                writeln!(invocation.out)?;
            }
            Format::Text => write_text(invocation.out, &report)?,
        }
        Ok(())
    }
}

fn write_text(out: &mut dyn Write, report: &Report<'_>) -> std::io::Result<()> {
    writeln!(out, "app: {}", report.app)?;
    for (title, options) in [("global", report.global), ("command", report.command)] {
        writeln!(out, "{}:", title)?;
        if options.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for option in options {
            writeln!(out, "  {} ({})", option, option.kind().describe())?;
        }
    }
    if let Some(since) = report.since {
        writeln!(out, "since: {}", since.to_rfc3339_opts(SecondsFormat::Secs, true))?;
    }
    writeln!(out, "labels:")?;
    for (key, value) in report.labels {
        writeln!(out, "  {}={}", key, value)?;
    }
    Ok(())
}
