use chrono::{DateTime, Local, NaiveDate, Utc};
use futures::future::LocalBoxFuture;
use std::cell::RefCell;
use std::rc::Rc;

use super::domain::AnalyticsDomain;
use super::filters::{self, FilterCriteria, FilterError, FilterKey};
use super::location::PageLocation;
use super::reducer::{reduce, Action};
use super::state::ContainerState;
use crate::shared::api_client::{AnalyticsTransport, QueryParam};
use crate::shared::errors::{classify, ErrorKind};
use crate::system::auth::identity::IdentityProvider;

/// Runs a fetch on the page's executor.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Everything a container talks to besides its own domain.
#[derive(Clone)]
pub struct Collaborators {
    pub transport: Rc<dyn AnalyticsTransport>,
    pub identity: Rc<dyn IdentityProvider>,
    pub location: Rc<dyn PageLocation>,
    pub clock: Rc<dyn Clock>,
    pub spawner: Spawner,
    /// Where users go once the session is gone
    pub entry_path: String,
}

type Listener<P> = Rc<dyn Fn(&ContainerState<P>)>;

struct Inner<P> {
    state: ContainerState<P>,
    defaults: FilterCriteria,
    listeners: Vec<Listener<P>>,
    /// Mounted while the session was still loading
    deferred: bool,
    signed_out: bool,
}

/// Filter and fetch lifecycle of one analytics page.
///
/// Every mutation goes through [`reduce`]. A filter change issues exactly one
/// fetch; only the result of the most recent fetch is committed.
pub struct FetchContainer<D: AnalyticsDomain> {
    domain: Rc<D>,
    deps: Collaborators,
    inner: Rc<RefCell<Inner<D::Payload>>>,
}

impl<D: AnalyticsDomain> Clone for FetchContainer<D> {
    fn clone(&self) -> Self {
        Self {
            domain: Rc::clone(&self.domain),
            deps: self.deps.clone(),
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D: AnalyticsDomain> FetchContainer<D> {
    pub fn new(domain: D, deps: Collaborators) -> Self {
        let defaults = domain.default_filters(deps.clock.today());
        Self {
            domain: Rc::new(domain),
            inner: Rc::new(RefCell::new(Inner {
                state: ContainerState::new(defaults.clone()),
                defaults,
                listeners: Vec::new(),
                deferred: false,
                signed_out: false,
            })),
            deps,
        }
    }

    pub fn state(&self) -> ContainerState<D::Payload> {
        self.inner.borrow().state.clone()
    }

    pub fn filters(&self) -> FilterCriteria {
        self.inner.borrow().state.filters.clone()
    }

    pub fn defaults(&self) -> FilterCriteria {
        self.inner.borrow().defaults.clone()
    }

    /// Called with the new state after every transition.
    pub fn subscribe(&self, listener: impl Fn(&ContainerState<D::Payload>) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Seed filters from the URL and issue the initial fetch.
    ///
    /// While the session is still loading the fetch is held back.
    pub fn mount(&self) {
        if self.inner.borrow().state.mounted {
            return;
        }

        if !D::URL_KEYS.is_empty() {
            let query = self.deps.location.read_query();
            let seeded = filters::decode_url_query(&query, &self.defaults(), D::URL_KEYS);
            self.dispatch(Action::FiltersSeeded(seeded));
        }
        self.dispatch(Action::Mounted);
        self.fetch();
    }

    /// Release a fetch held back while the session was loading.
    pub fn identity_ready(&self) {
        let deferred = {
            let mut inner = self.inner.borrow_mut();
            std::mem::replace(&mut inner.deferred, false) && inner.state.mounted
        };
        if deferred {
            self.fetch();
        }
    }

    pub fn unmount(&self) {
        self.dispatch(Action::Unmounted);
        let mut inner = self.inner.borrow_mut();
        inner.listeners.clear();
        inner.deferred = false;
    }

    /// Set one filter and refetch. `None` or a blank value clears it.
    ///
    /// Re-applying the current value does not refetch.
    pub fn set_filter(&self, key: FilterKey, value: Option<String>) -> Result<(), FilterError> {
        if !D::FILTER_KEYS.contains(&key) {
            return Err(FilterError::UnknownKey {
                page: D::NAME,
                key: key.query_name().to_string(),
            });
        }
        let value = filters::normalize(value);
        if let Some(value) = &value {
            key.validate(value)?;
        }

        let unchanged = self.inner.borrow().state.filters.get(key) == value.as_deref();
        if !unchanged {
            self.dispatch(Action::FilterChanged { key, value });
        }
        self.sync_url();
        if !unchanged {
            self.fetch();
        }
        Ok(())
    }

    /// [`FetchContainer::set_filter`] with a key given by name.
    pub fn set_filter_by_name(&self, name: &str, value: Option<String>) -> Result<(), FilterError> {
        let key = name.parse::<FilterKey>().map_err(|_| FilterError::UnknownKey {
            page: D::NAME,
            key: name.to_string(),
        })?;
        self.set_filter(key, value)
    }

    pub fn reset_filters(&self) {
        let defaults = self.domain.default_filters(self.deps.clock.today());
        self.inner.borrow_mut().defaults = defaults.clone();
        self.dispatch(Action::FiltersReset(defaults));
        self.sync_url();
        self.fetch();
    }

    /// Clear the error and re-issue the fetch with the current filters.
    ///
    /// Does nothing after an `auth` failure: the session is already gone.
    pub fn retry(&self) {
        let auth_failed = self
            .inner
            .borrow()
            .state
            .error()
            .is_some_and(|e| e.kind == ErrorKind::Auth);
        if auth_failed {
            log::debug!("[{}] retry ignored after auth failure", D::NAME);
            return;
        }
        self.dispatch(Action::ErrorCleared);
        self.fetch();
    }

    pub fn refresh(&self) {
        self.fetch();
    }

    pub fn clear_error(&self) {
        self.dispatch(Action::ErrorCleared);
    }

    fn dispatch(&self, action: Action<D::Payload>) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let state = std::mem::take(&mut inner.state);
            inner.state = reduce(state, action);
            (inner.state.clone(), inner.listeners.clone())
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn sync_url(&self) {
        if D::URL_KEYS.is_empty() {
            return;
        }
        let query = {
            let inner = self.inner.borrow();
            filters::encode_url_query(&inner.state.filters, &inner.defaults, D::URL_KEYS)
        };
        self.deps.location.replace_query(&query);
    }

    /// Issue a fetch with the current filters, or hold it back until
    /// [`FetchContainer::identity_ready`] while the session is loading.
    fn fetch(&self) {
        let (generation, query) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.state.mounted {
                return;
            }
            if !self.deps.identity.is_loaded() {
                log::debug!("[{}] session not loaded yet, deferring fetch", D::NAME);
                inner.deferred = true;
                return;
            }
            (
                inner.state.generation + 1,
                self.domain.query(&inner.state.filters),
            )
        };
        self.dispatch(Action::FetchStarted { generation });
        log::debug!("[{}] fetch #{} issued: {:?}", D::NAME, generation, query);

        let this = self.clone();
        (self.deps.spawner)(Box::pin(async move {
            this.run_fetch(generation, query).await;
        }));
    }

    async fn run_fetch(self, generation: u64, query: Vec<QueryParam>) {
        let token = self.deps.identity.get_token().await;
        let result = self
            .domain
            .fetch(self.deps.transport.as_ref(), &query, token.as_deref())
            .await;

        match result {
            Ok(payload) => {
                let at = self.deps.clock.now();
                self.commit(
                    generation,
                    Action::FetchSucceeded {
                        generation,
                        payload,
                        at,
                    },
                );
            }
            Err(failure) => {
                let error = classify(&failure);
                log::warn!(
                    "[{}] fetch #{} failed ({}): {}",
                    D::NAME,
                    generation,
                    error.kind.as_str(),
                    failure
                );
                let is_auth = error.kind == ErrorKind::Auth;
                self.commit(generation, Action::FetchFailed { generation, error });
                if is_auth {
                    self.end_session().await;
                }
            }
        }
    }

    fn commit(&self, generation: u64, action: Action<D::Payload>) -> bool {
        let (accepted, mounted) = {
            let inner = self.inner.borrow();
            (inner.state.accepts(generation), inner.state.mounted)
        };
        if !accepted {
            if mounted {
                log::debug!("[{}] fetch #{} discarded as stale", D::NAME, generation);
            } else {
                log::debug!("[{}] fetch #{} discarded after unmount", D::NAME, generation);
            }
            return false;
        }
        self.dispatch(action);
        log::debug!("[{}] fetch #{} committed", D::NAME, generation);
        true
    }

    /// Sign out and leave the page, once per container.
    async fn end_session(&self) {
        let first = !std::mem::replace(&mut self.inner.borrow_mut().signed_out, true);
        if !first {
            return;
        }
        log::info!("[{}] session rejected, signing out", D::NAME);
        self.deps.identity.sign_out().await;
        self.deps.location.redirect(&self.deps.entry_path);
    }
}
