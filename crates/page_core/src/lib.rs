//! Interactive state layer of the landing page: theme and menu toggles plus
//! the contact form submission workflow.

pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod state;
pub mod transport;
pub mod view;

pub use config::{load_settings, Settings, DEFAULT_INTAKE_URL};
pub use controller::{CompletedSubmission, PageController, PendingSubmission};
pub use error::{SessionClosed, SettingsError, TransportError};
pub use session::{PageEvent, PageSession};
pub use state::{SubmitGate, UiState, ValidationPolicy};
pub use transport::{HttpIntakeTransport, IntakeResponse, IntakeTransport, SubmissionOutcome};
pub use view::{status_line, PageView};
