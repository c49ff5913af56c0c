//! Client-side routing: the screen table and the navigation guard.
//!
//! Navigation happens in-process (screen switches and startup deep links),
//! but the rules are the portal's: every attempt resolves against the route
//! table and passes through the guard before the current screen changes.

pub mod guard;
pub mod routes;

pub use guard::{check, NavigationTarget, Verdict};
pub use routes::{find, resolve, Route, AUTHENTICATED_LANDING, PUBLIC_LANDING, START_ROUTE};
