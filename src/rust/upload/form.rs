use log::{debug, error, info, warn};
use tokio::sync::watch;

use super::error::PredictError;
use super::prediction::Prediction;
use super::PredictTransport;
use crate::SelectedFile;

/// What the result area of the form currently shows.
///
/// A single variant holds either the result or the error, never both.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// Nothing submitted yet, or the last submission was abandoned
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The service classified the file
    Success(Prediction),
    /// The last submission failed; the text is shown verbatim
    Failed(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn result(&self) -> Option<&Prediction> {
        match self {
            ViewState::Success(prediction) => Some(prediction),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Owns the selected file and the view state, and drives submissions.
///
/// `submit` borrows the form mutably for the whole request, so a second
/// submission cannot start while one is in flight. Dropping the `submit`
/// future cancels the request and returns the form to [`ViewState::Idle`].
///
/// # Example
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use pdfspam::{ClientConfig, PredictClient, SelectedFile, UploadForm};
///
/// let client = PredictClient::new(ClientConfig::from_env()?)?;
/// let mut form = UploadForm::new();
/// form.select_file(SelectedFile::from_path("email.pdf")?);
///
/// let state = form.submit(&client).await;
/// if let Some(prediction) = state.result() {
///     println!("{}", prediction.label);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct UploadForm {
    file: Option<SelectedFile>,
    state: watch::Sender<ViewState>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadForm {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self { file: None, state }
    }

    /// Replaces the held file. Prior results and errors stay on screen.
    pub fn select_file(&mut self, file: SelectedFile) {
        if !file.looks_like_pdf() {
            warn!("{} does not look like a PDF; submitting it anyway", file.name());
        }
        self.file = Some(file);
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Read-only feed of state changes, for redrawing while a request runs.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Submits the selected file and returns the settled state.
    ///
    /// Failures of every kind end up in [`ViewState::Failed`]; nothing is
    /// returned as an error.
    pub async fn submit<T: PredictTransport>(&mut self, transport: &T) -> ViewState {
        // Only reachable when an earlier submission future was leaked
        // (e.g. `mem::forget`) instead of dropped, so its guard never ran.
        if self.is_loading() {
            debug!("Submit ignored while a prediction is in flight");
            return self.state();
        }

        self.state.send_replace(ViewState::Idle);

        let Some(file) = self.file.as_ref() else {
            info!("Submit without a selected file");
            self.state
                .send_replace(ViewState::Failed(PredictError::NoFileSelected.to_string()));
            return self.state();
        };

        info!("Submitting {} ({} bytes) for prediction", file.name(), file.len());
        debug!("Upload fingerprint: {}", file.fingerprint());

        let guard = LoadingGuard::engage(&self.state);
        let outcome = transport.predict(file).await;
        guard.settle(outcome);

        self.state()
    }
}

/// Holds the form in `Loading` and guarantees it leaves that state, either
/// through `settle` or, if the request is abandoned, on drop.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<ViewState>,
    settled: bool,
}

impl<'a> LoadingGuard<'a> {
    fn engage(state: &'a watch::Sender<ViewState>) -> Self {
        state.send_replace(ViewState::Loading);
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, outcome: Result<Prediction, PredictError>) {
        let next = match outcome {
            Ok(prediction) => {
                info!("Prediction: {} (prob: {:?})", prediction.label, prediction.prob);
                ViewState::Success(prediction)
            }
            Err(e) => {
                match &e {
                    PredictError::Api { status, message } => {
                        warn!("Prediction service returned {}: {}", status, message)
                    }
                    other => error!("Prediction request failed: {}", other),
                }
                ViewState::Failed(e.to_string())
            }
        };
        self.state.send_replace(next);
        self.settled = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Prediction abandoned before the service responded");
            self.state.send_replace(ViewState::Idle);
        }
    }
}
