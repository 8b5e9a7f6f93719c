//! # botica-terminal: Cashier Session Layer for Botica POS
//!
//! The orchestration layer between the UI boundary and the engine:
//!
//! - [`session::TerminalSession`] - one cashier session (scan, discount,
//!   hold/recall, checkout, void, returns)
//! - [`reports::ReportService`] - read-side report facade
//! - [`config`] - terminal configuration and the identity boundary
//! - [`error`] - the serializable boundary error type
//!
//! Everything here delegates: business math lives in `botica-core`, shared
//! state and its locking in `botica-store`. The session layer adds no rules
//! of its own beyond wiring and error translation, which is what keeps the
//! UI boundary thin and the engine testable end to end without a UI.

pub mod config;
pub mod error;
pub mod reports;
pub mod session;

pub use config::{IdentityProvider, StaticIdentity, TerminalConfig};
pub use error::{ErrorCode, TerminalError, TerminalResult};
pub use reports::ReportService;
pub use session::{CheckoutSummary, TerminalSession};
