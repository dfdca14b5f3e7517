//! Wire types exchanged with the university analytics API.
//!
//! Everything here is plain serde data so it can be shared by the browser
//! application and by tests without pulling in any web dependencies.

pub mod dashboards;
pub mod shared;
pub mod system;
