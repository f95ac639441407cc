//! Dossier Collab - the collaborator boundary
//!
//! External reasoning collaborators as typed seams:
//! - `Maker` drafts a section, `Checker` critiques it, `Renderer` persists
//!   the assembled deliverable
//! - Requests carry all cross-attempt context as explicit fields
//! - One validated decode step per boundary (`decode::artifact`,
//!   `decode::report`) turns untyped payloads into tagged results

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod decode;
pub mod error;
pub mod request;
pub mod traits;

// Re-exports for convenience
pub use error::{CollaboratorError, DecodeError, RenderError};
pub use request::{CheckerRequest, MakerRequest};
pub use traits::{Checker, Maker, Renderer};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
