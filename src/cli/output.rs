//! Output for skemi commands.
//!
//! Robot mode prints one JSON envelope per invocation on stdout; human mode
//! renders a [`Report`] built line by line.

use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct RobotError {
    pub code: &'static str,
    pub message: String,
}

/// JSON envelope shared by every command.
#[derive(Debug, Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub command: &'static str,
    pub generated_at: DateTime<Utc>,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RobotError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T> RobotResponse<T> {
    fn envelope(command: &'static str, status: RobotStatus) -> Self {
        Self {
            status,
            command,
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
            data: None,
            error: None,
            warnings: Vec::new(),
        }
    }

    /// Attach non-fatal problems (skipped corpus entries and the like).
    #[must_use]
    pub fn with_warnings<I, S>(mut self, warnings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.warnings
            .extend(warnings.into_iter().map(|w| w.to_string()));
        self
    }
}

pub fn robot_ok<T: Serialize>(command: &'static str, data: T) -> RobotResponse<T> {
    let mut response = RobotResponse::envelope(command, RobotStatus::Ok);
    response.data = Some(data);
    response
}

pub fn robot_error(
    command: &'static str,
    code: &'static str,
    message: impl Into<String>,
) -> RobotResponse<()> {
    let mut response = RobotResponse::envelope(command, RobotStatus::Error);
    response.error = Some(RobotError {
        code,
        message: message.into(),
    });
    response
}

pub fn emit_robot<T: Serialize>(response: &RobotResponse<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq)]
enum Line {
    Title(String),
    Section(String),
    Field(String, String),
    Item(String),
    Score(String, f64),
    Note(String),
    Blank,
}

/// Human-readable report. Field keys and score names are aligned when the
/// report is rendered, so lines can be added in any order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    lines: Vec<Line>,
}

impl Report {
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn title(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Title(text.into()));
        self
    }

    pub fn section(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Section(text.into()));
        self
    }

    pub fn field(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.lines.push(Line::Field(key.into(), value.to_string()));
        self
    }

    pub fn item(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Item(text.into()));
        self
    }

    /// A topic name with its similarity and a bar proportional to it.
    pub fn score(&mut self, name: impl Into<String>, score: f64) -> &mut Self {
        self.lines.push(Line::Score(name.into(), score));
        self
    }

    /// Dimmed free text, e.g. "no match".
    pub fn note(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Note(text.into()));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(Line::Blank);
        self
    }

    pub fn render(&self) -> String {
        let key_width = self.width_of(|line| match line {
            Line::Field(key, _) => Some(key.chars().count()),
            _ => None,
        });
        let name_width = self.width_of(|line| match line {
            Line::Score(name, _) => Some(name.chars().count()),
            _ => None,
        });

        let mut out = Vec::with_capacity(self.lines.len() + 1);
        for line in &self.lines {
            match line {
                Line::Title(text) => {
                    out.push(style(text).bold().underlined().to_string());
                    out.push(String::new());
                }
                Line::Section(text) => out.push(style(text).bold().to_string()),
                Line::Field(key, value) => {
                    let key = format!("{key:key_width$}");
                    out.push(format!("{} {value}", style(key).dim()));
                }
                Line::Item(text) => out.push(format!("  - {text}")),
                Line::Score(name, score) => {
                    let name = format!("{name:name_width$}");
                    out.push(format!(
                        "  {} {score:>7.4} {}",
                        style(name).cyan(),
                        style(score_bar(*score)).green()
                    ));
                }
                Line::Note(text) => out.push(format!("  {}", style(text).dim())),
                Line::Blank => out.push(String::new()),
            }
        }
        out.join("\n")
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }

    fn width_of(&self, measure: impl Fn(&Line) -> Option<usize>) -> usize {
        self.lines.iter().filter_map(measure).max().unwrap_or(0)
    }
}

/// Negative similarities draw an empty bar.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn score_bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
