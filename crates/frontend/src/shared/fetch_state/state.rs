use chrono::{DateTime, Utc};

use super::filters::FilterCriteria;
use crate::shared::errors::ErrorInfo;

/// Which placeholder a loading page should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// Nothing has been loaded yet: render a skeleton
    Initial,
    /// Previous data stays on screen: render an in-place spinner
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading(LoadKind),
    Success,
    Error,
}

impl FetchStatus {
    pub fn is_loading(self) -> bool {
        matches!(self, FetchStatus::Loading(_))
    }
}

/// Lifecycle of the page payload.
///
/// `data` always holds the last successful payload, or the empty default
/// before the first success. A failed refresh leaves it untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchState<P> {
    pub status: FetchStatus,
    pub data: P,
    pub error: Option<ErrorInfo>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl<P> FetchState<P> {
    pub fn has_loaded(&self) -> bool {
        self.last_updated.is_some()
    }

    /// Loading kind for the next fetch
    pub fn next_load_kind(&self) -> LoadKind {
        if self.has_loaded() {
            LoadKind::Refresh
        } else {
            LoadKind::Initial
        }
    }
}

/// Everything one page container owns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContainerState<P> {
    pub filters: FilterCriteria,
    pub fetch: FetchState<P>,
    /// Generation of the most recently issued fetch
    pub generation: u64,
    /// Generation whose result may still be committed
    pub in_flight: Option<u64>,
    pub mounted: bool,
}

impl<P: Default> ContainerState<P> {
    pub fn new(filters: FilterCriteria) -> Self {
        Self {
            filters,
            fetch: FetchState::default(),
            generation: 0,
            in_flight: None,
            mounted: false,
        }
    }
}

impl<P> ContainerState<P> {
    /// Whether a result of fetch `generation` may still be committed.
    pub fn accepts(&self, generation: u64) -> bool {
        self.mounted && self.in_flight == Some(generation)
    }

    pub fn status(&self) -> FetchStatus {
        self.fetch.status
    }

    pub fn data(&self) -> &P {
        &self.fetch.data
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.fetch.error.as_ref()
    }
}
