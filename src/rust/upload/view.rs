use std::fmt;

use super::form::{UploadForm, ViewState};
use super::prediction::{BadgeVariant, Prediction};
use crate::SelectedFile;

pub const CLASSIFY_CAPTION: &str = "Classify";
pub const ANALYZING_CAPTION: &str = "Analyzing…";

const TITLE: &str = "PDF Email Spam Classifier";
const HINT: &str = "Upload a PDF of an email. The model predicts whether it's SPAM or Non-SPAM.";

const RED: &str = "\x1b[1;37;41m";
const GREEN: &str = "\x1b[1;37;42m";
const RESET: &str = "\x1b[0m";

/// The submit button as it should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub caption: &'static str,
}

impl SubmitControl {
    pub fn for_state(state: &ViewState) -> Self {
        if state.is_loading() {
            Self {
                disabled: true,
                caption: ANALYZING_CAPTION,
            }
        } else {
            Self {
                disabled: false,
                caption: CLASSIFY_CAPTION,
            }
        }
    }
}

/// The result badge and its optional confidence line.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub badge: String,
    pub variant: BadgeVariant,
    pub confidence: Option<String>,
}

impl From<&Prediction> for ResultPanel {
    fn from(prediction: &Prediction) -> Self {
        Self {
            badge: prediction.label.clone(),
            variant: prediction.variant(),
            confidence: prediction.confidence_text(),
        }
    }
}

/// Everything the terminal shows for one form state.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub file_name: Option<String>,
    pub control: SubmitControl,
    pub error_panel: Option<String>,
    pub result_panel: Option<ResultPanel>,
    /// Whether badges are drawn with ANSI colours
    pub color: bool,
}

impl Screen {
    pub fn new(state: &ViewState, file: Option<&SelectedFile>) -> Self {
        Self {
            file_name: file.map(|f| f.name().to_string()),
            control: SubmitControl::for_state(state),
            error_panel: state.error().map(str::to_string),
            result_panel: state.result().map(ResultPanel::from),
            color: false,
        }
    }

    pub fn of(form: &UploadForm) -> Self {
        Self::new(&form.state(), form.selected_file())
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn badge(&self, panel: &ResultPanel) -> String {
        if !self.color {
            return format!("[{}]", panel.badge);
        }
        let paint = match panel.variant {
            BadgeVariant::Spam => RED,
            BadgeVariant::Ham => GREEN,
        };
        format!("{} {} {}", paint, panel.badge, RESET)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        writeln!(f, "{}", HINT)?;
        writeln!(f)?;
        writeln!(f, "File: {}", self.file_name.as_deref().unwrap_or("(none)"))?;
        if self.control.disabled {
            writeln!(f, "( {} )", self.control.caption)?;
        } else {
            writeln!(f, "[ {} ]", self.control.caption)?;
        }

        if let Some(error) = &self.error_panel {
            writeln!(f)?;
            writeln!(f, "Error: {}", error)?;
        }

        if let Some(panel) = &self.result_panel {
            writeln!(f)?;
            write!(f, "{}", self.badge(panel))?;
            if let Some(confidence) = &panel.confidence {
                write!(f, "  {}", confidence)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
