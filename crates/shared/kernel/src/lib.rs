//! Kernel utilities shared by the Livepad crates: configuration loading, id
//! generation and (with the `server` feature) the Axum state and system routes.
//!
//! ```rust
//! # use lpad_kernel::safe_nanoid;
//! let id = safe_nanoid!();
//! assert_eq!(id.len(), 12);
//! ```

pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use lpad_domain as domain;
pub use nanoid::nanoid;

use lpad_domain::{DomainError, ProjectId};

/// `NanoID` alphabet without look-alike characters (`0 O 1 I l`).
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

#[macro_export]
macro_rules! safe_nanoid {
    () => {
        $crate::nanoid!(12, $crate::SAFE_ALPHABET)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}

/// Fresh server-side project id.
///
/// # Errors
/// Never in practice: the alphabet is a subset of the accepted id characters.
pub fn new_project_id() -> Result<ProjectId, DomainError> {
    ProjectId::parse(safe_nanoid!())
}
