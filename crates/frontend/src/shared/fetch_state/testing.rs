//! In-memory collaborators for container tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use super::container::{Clock, Collaborators, Spawner};
use super::location::PageLocation;
use crate::shared::api_client::{AnalyticsTransport, ApiFailure, QueryParam};
use crate::system::auth::identity::IdentityProvider;

pub type Reply = Result<serde_json::Value, ApiFailure>;

enum Scripted {
    Ready(Reply),
    Pending(oneshot::Receiver<Reply>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub path: String,
    pub query: Vec<QueryParam>,
    pub token: Option<String>,
}

/// Answers GETs in order from a script; unscripted calls fail as network errors.
#[derive(Default)]
pub struct FakeTransport {
    script: RefCell<VecDeque<Scripted>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeTransport {
    pub fn reply(&self, reply: Reply) {
        self.script.borrow_mut().push_back(Scripted::Ready(reply));
    }

    pub fn reply_json(&self, value: serde_json::Value) {
        self.reply(Ok(value));
    }

    /// Queue a reply that resolves when the returned sender fires.
    pub fn reply_later(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.script.borrow_mut().push_back(Scripted::Pending(rx));
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl AnalyticsTransport for FakeTransport {
    async fn get(
        &self,
        path: &str,
        query: &[QueryParam],
        token: Option<&str>,
    ) -> Result<serde_json::Value, ApiFailure> {
        self.calls.borrow_mut().push(Call {
            path: path.to_string(),
            query: query.to_vec(),
            token: token.map(str::to_string),
        });
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Pending(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiFailure::Network("reply dropped".into()))),
            None => Err(ApiFailure::Network(format!("unscripted call to {}", path))),
        }
    }
}

pub struct FakeIdentity {
    pub loaded: Cell<bool>,
    pub token: RefCell<Option<String>>,
    pub sign_outs: Cell<u32>,
}

impl Default for FakeIdentity {
    fn default() -> Self {
        Self {
            loaded: Cell::new(true),
            token: RefCell::new(Some("token-1".to_string())),
            sign_outs: Cell::new(0),
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FakeIdentity {
    fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    fn is_signed_in(&self) -> bool {
        self.token.borrow().is_some()
    }

    async fn get_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    async fn sign_out(&self) {
        self.sign_outs.set(self.sign_outs.get() + 1);
        self.token.replace(None);
    }
}

#[derive(Default)]
pub struct FakeLocation {
    pub query: RefCell<String>,
    pub replaced: RefCell<Vec<String>>,
    pub redirects: RefCell<Vec<String>>,
}

impl PageLocation for FakeLocation {
    fn read_query(&self) -> String {
        self.query.borrow().clone()
    }

    fn replace_query(&self, query: &str) {
        self.query.replace(query.to_string());
        self.replaced.borrow_mut().push(query.to_string());
    }

    fn redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_string());
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

/// A local executor plus fakes wired into [`Collaborators`].
pub struct Harness {
    pub pool: LocalPool,
    pub transport: Rc<FakeTransport>,
    pub identity: Rc<FakeIdentity>,
    pub location: Rc<FakeLocation>,
    pub deps: Collaborators,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_query("")
    }

    /// Start with `query` already in the page URL.
    pub fn with_query(query: &str) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        let transport = Rc::new(FakeTransport::default());
        let identity = Rc::new(FakeIdentity::default());
        let location = Rc::new(FakeLocation::default());
        location.query.replace(query.to_string());

        let spawn: Spawner = Rc::new(move |future| {
            spawner.spawn_local(future).expect("spawn on test pool");
        });
        let deps = Collaborators {
            transport: transport.clone(),
            identity: identity.clone(),
            location: location.clone(),
            clock: Rc::new(FixedClock(fixed_now())),
            spawner: spawn,
            entry_path: "/sign-in".to_string(),
        };

        Self {
            pool,
            transport,
            identity,
            location,
            deps,
        }
    }

    pub fn run(&mut self) {
        self.pool.run_until_stalled();
    }
}

/// 2024-06-15 09:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
}

pub fn query_value<'a>(call: &'a Call, name: &str) -> Option<&'a str> {
    call.query
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.as_str())
}
