use serde::{Deserialize, Deserializer, Serialize};

/// The label the service uses for spam.
pub const SPAM_LABEL: &str = "SPAM";

/// A successful classification returned by the prediction service.
///
/// Only `label` and `prob` are kept; any other fields in the response body
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Categorical output, e.g. "SPAM" or "Non-SPAM"
    pub label: String,
    /// Probability of the predicted label in [0, 1], when the model reports one.
    /// Anything other than a JSON number (including `null`) reads as absent.
    #[serde(default, deserialize_with = "numeric_only", skip_serializing_if = "Option::is_none")]
    pub prob: Option<f64>,
}

/// Visual variant of the result badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Spam,
    Ham,
}

impl Prediction {
    pub fn new(label: impl Into<String>, prob: Option<f64>) -> Self {
        Self {
            label: label.into(),
            prob,
        }
    }

    pub fn is_spam(&self) -> bool {
        self.label == SPAM_LABEL
    }

    pub fn variant(&self) -> BadgeVariant {
        if self.is_spam() {
            BadgeVariant::Spam
        } else {
            BadgeVariant::Ham
        }
    }

    /// "Confidence: 87.3%" style text, or `None` when no probability was sent.
    pub fn confidence_text(&self) -> Option<String> {
        self.prob.map(|p| format!("Confidence: {}%", one_decimal(p * 100.0)))
    }
}

/// Formats to one decimal place, resolving exact halves upwards.
///
/// `{:.1}` rounds an exact tie such as 87.25 to even (87.2); the service's
/// web front-end shows 87.3. A double sits exactly between two tenths only
/// when its fractional part is .25 or .75, i.e. when `x * 4` (exact) is odd.
fn one_decimal(x: f64) -> String {
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}", (x * 10.0).ceil() / 10.0);
    }
    format!("{:.1}", x)
}

fn numeric_only<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}
