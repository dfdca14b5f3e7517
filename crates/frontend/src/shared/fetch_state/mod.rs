//! Filter and fetch lifecycle shared by every analytics page.

pub mod container;
pub mod domain;
pub mod filters;
pub mod location;
pub mod reactive;
pub mod reducer;
pub mod state;

#[cfg(test)]
pub mod testing;

pub use container::{Clock, Collaborators, FetchContainer, Spawner, SystemClock};
pub use domain::AnalyticsDomain;
pub use filters::{FilterCriteria, FilterError, FilterKey};
pub use location::{BrowserLocation, PageLocation};
pub use reactive::ReactiveContainer;
pub use state::{ContainerState, FetchState, FetchStatus, LoadKind};
