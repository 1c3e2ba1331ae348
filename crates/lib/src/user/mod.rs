//! User system for comicstore
//!
//! Two fixed roles, Artist and Viewer, sharing one account shape. The
//! role round-trips through storage as a discriminant tag.

pub mod errors;
pub mod types;

pub use errors::UserError;
pub use types::*;
