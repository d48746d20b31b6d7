//! The upload/predict/display flow: one form, one request per submission,
//! and a view that shows either an error panel or a result badge.

mod error;
mod form;
mod prediction;
mod view;

use std::future::Future;

use crate::SelectedFile;

pub use error::{PredictError, FALLBACK_MESSAGE, NO_FILE_MESSAGE};
pub use form::{UploadForm, ViewState};
pub use prediction::{BadgeVariant, Prediction, SPAM_LABEL};
pub use view::{ResultPanel, Screen, SubmitControl, ANALYZING_CAPTION, CLASSIFY_CAPTION};

/// Anything that can turn a selected file into a prediction.
///
/// [`PredictClient`](crate::PredictClient) is the HTTP implementation; tests
/// substitute their own.
pub trait PredictTransport: Send + Sync {
    /// Sends the file for classification and waits for the outcome.
    fn predict(&self, file: &SelectedFile) -> impl Future<Output = Result<Prediction, PredictError>> + Send;
}
