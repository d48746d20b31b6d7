//! A client for a remote PDF email spam classifier.
//!
//! The user picks a PDF, submits it to the prediction service's
//! `/api/predict` endpoint, and sees either a "SPAM"/"Non-SPAM" badge with its
//! confidence or an error message.
//!
//! # Basic Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use pdfspam::{ClientConfig, PredictClient, Screen, SelectedFile, UploadForm};
//!
//! let client = PredictClient::new(ClientConfig::from_env()?)?;
//!
//! let mut form = UploadForm::new();
//! form.select_file(SelectedFile::from_path("suspicious-email.pdf")?);
//! form.submit(&client).await;
//!
//! print!("{}", Screen::of(&form));
//! # Ok(())
//! # }
//! ```
//!
//! # Testing without a server
//!
//! [`UploadForm::submit`] accepts any [`PredictTransport`], so the flow can be
//! driven by a stub:
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use pdfspam::{PredictError, PredictTransport, Prediction, SelectedFile, UploadForm, ViewState};
//!
//! struct AlwaysSpam;
//!
//! impl PredictTransport for AlwaysSpam {
//!     async fn predict(&self, _file: &SelectedFile) -> Result<Prediction, PredictError> {
//!         Ok(Prediction::new("SPAM", Some(0.99)))
//!     }
//! }
//!
//! let mut form = UploadForm::new();
//! form.select_file(SelectedFile::new("mail.pdf", b"%PDF-1.4".to_vec()));
//! let state = form.submit(&AlwaysSpam).await;
//! assert_eq!(state, ViewState::Success(Prediction::new("SPAM", Some(0.99))));
//! # }
//! ```

pub mod client;
pub mod config;
pub mod file;
pub mod upload;

pub use client::{HealthStatus, PredictClient};
pub use config::{ClientConfig, ConfigError};
pub use file::SelectedFile;
pub use upload::{
    BadgeVariant, PredictError, PredictTransport, Prediction, ResultPanel, Screen, SubmitControl, UploadForm,
    ViewState,
};

pub fn init_logger() {
    env_logger::init();
}
