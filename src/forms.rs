use serde::Deserialize;
use thiserror::Error;

pub const MIN_QUESTION_COUNT: u8 = 1;
pub const MAX_QUESTION_COUNT: u8 = 10;
pub const DEFAULT_QUESTION_COUNT: u8 = 3;

/// Which of the three tools a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    LessonPlan,
    Quiz,
    Concept,
}

impl ToolKind {
    /// Human-readable label used in log lines and warning messages.
    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::LessonPlan => "lesson plan",
            ToolKind::Quiz => "quiz",
            ToolKind::Concept => "concept explanation",
        }
    }
}

/// Raw field values as posted by the page. Every field is optional at this
/// layer; `collect` decides which ones the active tool actually needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInputs {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub grade_level: String,
    #[serde(default)]
    pub time_limit: String,
    #[serde(default)]
    pub source_text: String,
    #[serde(default)]
    pub question_count: Option<u8>,
    #[serde(default)]
    pub complex_topic: String,
    #[serde(default)]
    pub target_audience: String,
}

/// A fully validated request, ready for prompt rendering. Construction goes
/// through `collect`, so required fields are always non-empty and the
/// question count is always in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    LessonPlan {
        topic: String,
        grade_level: String,
        time_limit: String,
    },
    Quiz {
        source_text: String,
        question_count: u8,
    },
    Concept {
        complex_topic: String,
        target_audience: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

fn missing_fields(tool: ToolKind) -> ValidationError {
    ValidationError {
        message: format!(
            "Please fill in all the fields to generate a {}.",
            tool.label()
        ),
    }
}

fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Validate the raw field values for the active tool and produce a
/// `ToolRequest`, or a `ValidationError` with a user-facing message.
pub fn collect(tool: ToolKind, raw: &RawInputs) -> Result<ToolRequest, ValidationError> {
    match tool {
        ToolKind::LessonPlan => {
            let (Some(topic), Some(grade_level), Some(time_limit)) = (
                required(&raw.topic),
                required(&raw.grade_level),
                required(&raw.time_limit),
            ) else {
                return Err(missing_fields(tool));
            };
            Ok(ToolRequest::LessonPlan {
                topic,
                grade_level,
                time_limit,
            })
        }
        ToolKind::Quiz => {
            let Some(source_text) = required(&raw.source_text) else {
                return Err(missing_fields(tool));
            };
            let question_count = raw.question_count.unwrap_or(DEFAULT_QUESTION_COUNT);
            if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&question_count) {
                return Err(ValidationError {
                    message: format!(
                        "Question count must be between {MIN_QUESTION_COUNT} and {MAX_QUESTION_COUNT}."
                    ),
                });
            }
            Ok(ToolRequest::Quiz {
                source_text,
                question_count,
            })
        }
        ToolKind::Concept => {
            let (Some(complex_topic), Some(target_audience)) = (
                required(&raw.complex_topic),
                required(&raw.target_audience),
            ) else {
                return Err(missing_fields(tool));
            };
            Ok(ToolRequest::Concept {
                complex_topic,
                target_audience,
            })
        }
    }
}
