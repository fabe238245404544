//! Error types for the request and session layers.
//!
//! All failures are caught at the component boundary and converted into one
//! of these types; nothing is fatal.
//!
//! | Type | Raised by | Meaning |
//! |------|-----------|---------|
//! | [`ValidationError`] | executor, session manager | malformed user input |
//! | [`OperationError`] | executor | uniform failure envelope, tagged by [`ErrorPhase`] |
//! | [`SessionError`] | session manager | lifecycle rejection or WebSocket failure |

mod operation;
mod phase;
mod session;
mod validation;

pub use operation::OperationError;
pub use phase::ErrorPhase;
pub use session::SessionError;
pub use validation::ValidationError;
