//! Client-side persisted state.
//!
//! The only state kept between runs is the current access token and the
//! active business unit, mirroring what the browser keeps in local storage.

mod path;
mod session;

pub use path::default_session_path;
pub use session::{SessionFile, SessionState, SessionStoreError};
