use leptos::prelude::*;

use super::container::{Collaborators, FetchContainer};
use super::domain::AnalyticsDomain;
use super::filters::{FilterCriteria, FilterError, FilterKey};
use super::state::ContainerState;

/// A [`FetchContainer`] bound to the component that owns the page.
///
/// State is mirrored into a signal; the initial fetch waits for
/// `session_loaded`; the container is unmounted with its owner.
pub struct ReactiveContainer<D: AnalyticsDomain> {
    state: RwSignal<ContainerState<D::Payload>>,
    container: StoredValue<FetchContainer<D>, LocalStorage>,
}

impl<D: AnalyticsDomain> Clone for ReactiveContainer<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: AnalyticsDomain> Copy for ReactiveContainer<D> {}

impl<D: AnalyticsDomain> ReactiveContainer<D> {
    pub fn new(domain: D, deps: Collaborators, session_loaded: Signal<bool>) -> Self {
        let container = FetchContainer::new(domain, deps);
        let state = RwSignal::new(container.state());
        container.subscribe(move |next| {
            // the owner may already be disposed when a late fetch settles
            let _ = state.try_set(next.clone());
        });
        container.mount();

        let container = StoredValue::new_local(container);
        Effect::new(move |_| {
            if session_loaded.get() {
                container.with_value(|c| c.identity_ready());
            }
        });
        on_cleanup(move || {
            let _ = container.try_with_value(|c| c.unmount());
        });

        Self { state, container }
    }

    pub fn state(&self) -> ReadSignal<ContainerState<D::Payload>> {
        self.state.read_only()
    }

    pub fn filter(&self, key: FilterKey) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.filters.get(key).map(str::to_string)))
    }

    pub fn filters(&self) -> FilterCriteria {
        self.state.with_untracked(|s| s.filters.clone())
    }

    /// Number of filters that differ from the page defaults.
    pub fn active_filter_count(&self) -> Signal<usize> {
        let state = self.state;
        let container = self.container;
        Signal::derive(move || {
            let defaults = container
                .try_with_value(|c| c.defaults())
                .unwrap_or_default();
            state.with(|s| {
                FilterKey::ALL
                    .iter()
                    .filter(|key| s.filters.get(**key) != defaults.get(**key))
                    .count()
            })
        })
    }

    pub fn set_filter(&self, key: FilterKey, value: Option<String>) -> Result<(), FilterError> {
        self.container.with_value(|c| c.set_filter(key, value))
    }

    /// Callback for a filter control bound to `key`.
    pub fn filter_setter(&self, key: FilterKey) -> Callback<Option<String>> {
        let this = *self;
        Callback::new(move |value: Option<String>| {
            if let Err(e) = this.set_filter(key, value) {
                log::warn!("{}", e);
            }
        })
    }

    pub fn reset_filters(&self) {
        self.container.with_value(|c| c.reset_filters());
    }

    pub fn retry(&self) {
        self.container.with_value(|c| c.retry());
    }

    pub fn refresh(&self) {
        self.container.with_value(|c| c.refresh());
    }

    pub fn clear_error(&self) {
        self.container.with_value(|c| c.clear_error());
    }
}
