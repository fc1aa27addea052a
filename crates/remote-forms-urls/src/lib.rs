//! URL handling for remote-forms
//!
//! - [`UrlReverser`] maps route names to paths.
//! - [`LazyUrl`] defers name resolution until first use and memoizes it.
//! - [`UrlRouter`] dispatches requests by exact path and feeds its named
//!   routes into a reverser.

pub mod lazy;
pub mod reverse;
pub mod router;

pub use lazy::LazyUrl;
pub use reverse::UrlReverser;
pub use router::UrlRouter;
