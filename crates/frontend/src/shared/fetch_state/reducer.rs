use chrono::{DateTime, Utc};

use super::filters::{FilterCriteria, FilterKey};
use super::state::{ContainerState, FetchStatus, LoadKind};
use crate::shared::errors::ErrorInfo;

#[derive(Debug, Clone, PartialEq)]
pub enum Action<P> {
    /// The page was mounted; no fetch has been issued yet
    Mounted,
    /// Filters read from the page URL at mount
    FiltersSeeded(FilterCriteria),
    FilterChanged { key: FilterKey, value: Option<String> },
    FiltersReset(FilterCriteria),
    FetchStarted { generation: u64 },
    FetchSucceeded {
        generation: u64,
        payload: P,
        at: DateTime<Utc>,
    },
    FetchFailed { generation: u64, error: ErrorInfo },
    ErrorCleared,
    Unmounted,
}

/// Transition function of every page container.
///
/// Results of a fetch other than the latest one, or arriving after the page
/// was unmounted, leave the state unchanged.
pub fn reduce<P>(mut state: ContainerState<P>, action: Action<P>) -> ContainerState<P> {
    match action {
        Action::Mounted => {
            state.mounted = true;
            if state.fetch.status == FetchStatus::Idle {
                state.fetch.status = FetchStatus::Loading(LoadKind::Initial);
            }
        }
        Action::FiltersSeeded(filters) | Action::FiltersReset(filters) => {
            state.filters = filters;
        }
        Action::FilterChanged { key, value } => {
            state.filters.set(key, value);
        }
        Action::FetchStarted { generation } => {
            if !state.mounted || generation <= state.generation {
                return state;
            }
            state.generation = generation;
            state.in_flight = Some(generation);
            state.fetch.status = FetchStatus::Loading(state.fetch.next_load_kind());
            state.fetch.error = None;
        }
        Action::FetchSucceeded {
            generation,
            payload,
            at,
        } => {
            if !state.accepts(generation) {
                return state;
            }
            state.in_flight = None;
            state.fetch.status = FetchStatus::Success;
            state.fetch.data = payload;
            state.fetch.error = None;
            state.fetch.last_updated = Some(at);
        }
        Action::FetchFailed { generation, error } => {
            if !state.accepts(generation) {
                return state;
            }
            state.in_flight = None;
            state.fetch.status = FetchStatus::Error;
            state.fetch.error = Some(error);
        }
        Action::ErrorCleared => {
            state.fetch.error = None;
            if state.fetch.status == FetchStatus::Error {
                state.fetch.status = if state.fetch.has_loaded() {
                    FetchStatus::Success
                } else {
                    FetchStatus::Idle
                };
            }
        }
        Action::Unmounted => {
            state.mounted = false;
            state.in_flight = None;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::ErrorKind;
    use chrono::TimeZone;

    type State = ContainerState<Vec<i32>>;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
    }

    fn mounted() -> State {
        reduce(State::new(FilterCriteria::new()), Action::Mounted)
    }

    fn run(state: State, actions: Vec<Action<Vec<i32>>>) -> State {
        actions.into_iter().fold(state, reduce)
    }

    #[test]
    fn test_mount_enters_initial_loading() {
        let state = mounted();
        assert!(state.mounted);
        assert_eq!(state.status(), FetchStatus::Loading(LoadKind::Initial));
    }

    #[test]
    fn test_success_then_refresh_keeps_data() {
        let state = run(
            mounted(),
            vec![
                Action::FetchStarted { generation: 1 },
                Action::FetchSucceeded {
                    generation: 1,
                    payload: vec![1, 2],
                    at: at(),
                },
                Action::FetchStarted { generation: 2 },
            ],
        );
        assert_eq!(state.status(), FetchStatus::Loading(LoadKind::Refresh));
        assert_eq!(state.data(), &vec![1, 2]);
        assert_eq!(state.in_flight, Some(2));
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let state = run(
            mounted(),
            vec![
                Action::FetchStarted { generation: 1 },
                Action::FetchStarted { generation: 2 },
                Action::FetchSucceeded {
                    generation: 2,
                    payload: vec![2],
                    at: at(),
                },
                Action::FetchSucceeded {
                    generation: 1,
                    payload: vec![1],
                    at: at(),
                },
            ],
        );
        assert_eq!(state.data(), &vec![2]);
        assert_eq!(state.status(), FetchStatus::Success);
    }

    #[test]
    fn test_failure_keeps_previous_payload() {
        let error = ErrorInfo::new(ErrorKind::Server, "boom");
        let state = run(
            mounted(),
            vec![
                Action::FetchStarted { generation: 1 },
                Action::FetchSucceeded {
                    generation: 1,
                    payload: vec![7],
                    at: at(),
                },
                Action::FetchStarted { generation: 2 },
                Action::FetchFailed {
                    generation: 2,
                    error: error.clone(),
                },
            ],
        );
        assert_eq!(state.status(), FetchStatus::Error);
        assert_eq!(state.error(), Some(&error));
        assert_eq!(state.data(), &vec![7]);

        let cleared = reduce(state, Action::ErrorCleared);
        assert_eq!(cleared.status(), FetchStatus::Success);
        assert_eq!(cleared.error(), None);
    }

    #[test]
    fn test_refetch_after_initial_failure_is_initial() {
        let state = run(
            mounted(),
            vec![
                Action::FetchStarted { generation: 1 },
                Action::FetchFailed {
                    generation: 1,
                    error: ErrorInfo::new(ErrorKind::Network, "offline"),
                },
                Action::FetchStarted { generation: 2 },
            ],
        );
        assert_eq!(state.status(), FetchStatus::Loading(LoadKind::Initial));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_nothing_commits_after_unmount() {
        let state = run(
            mounted(),
            vec![
                Action::FetchStarted { generation: 1 },
                Action::Unmounted,
                Action::FetchSucceeded {
                    generation: 1,
                    payload: vec![1],
                    at: at(),
                },
                Action::FetchStarted { generation: 2 },
            ],
        );
        assert!(state.data().is_empty());
        assert_eq!(state.in_flight, None);
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn test_filter_actions() {
        let defaults = FilterCriteria::new().with(FilterKey::Year, "2024");
        let state = run(
            mounted(),
            vec![
                Action::FiltersSeeded(defaults.clone()),
                Action::FilterChanged {
                    key: FilterKey::Department,
                    value: Some("CS".into()),
                },
            ],
        );
        assert_eq!(state.filters.get(FilterKey::Department), Some("CS"));
        let reset = reduce(state, Action::FiltersReset(defaults.clone()));
        assert_eq!(reset.filters, defaults);
    }
}
