//! Navigation sidebar with one entry per analytics page.

use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[derive(Clone, Copy, Debug, PartialEq)]
struct MenuItem {
    path: &'static str,
    label: &'static str,
    icon: &'static str,
    admin_only: bool,
}

const fn item(path: &'static str, label: &'static str, icon: &'static str) -> MenuItem {
    MenuItem {
        path,
        label,
        icon,
        admin_only: false,
    }
}

fn menu_items() -> Vec<MenuItem> {
    vec![
        item("/", "Dashboard", "dashboard"),
        item("/performance", "Performance", "performance"),
        item("/papers", "Papers", "papers"),
        item("/students", "Students", "students"),
        item("/budget", "Budget", "budget"),
        MenuItem {
            admin_only: true,
            ..item("/upload", "Data upload", "upload")
        },
    ]
}

fn is_active(item_path: &str, current: &str) -> bool {
    let current = current.trim_end_matches('/');
    match item_path {
        "/" => current.is_empty(),
        path => current == path || current.starts_with(&format!("{}/", path)),
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let pathname = use_location().pathname;

    view! {
        <nav class="app-sidebar__content">
            {menu_items()
                .into_iter()
                .map(|entry| {
                    let visible = move || !entry.admin_only || auth_state.with(|s| s.is_admin());
                    let active = move || pathname.with(|p| is_active(entry.path, p));
                    view! {
                        <Show when=visible>
                            <A href=entry.path attr:class="app-sidebar__link">
                                <div
                                    class="app-sidebar__item"
                                    class:app-sidebar__item--active=active
                                >
                                    <div class="app-sidebar__item-content">
                                        {icon(entry.icon)}
                                        <span>{entry.label}</span>
                                    </div>
                                </div>
                            </A>
                        </Show>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_item_matching() {
        assert!(is_active("/", "/"));
        assert!(is_active("/", ""));
        assert!(!is_active("/", "/papers"));
        assert!(is_active("/papers", "/papers"));
        assert!(is_active("/papers", "/papers/"));
        assert!(!is_active("/papers", "/papersx"));
    }

    #[test]
    fn test_only_upload_is_admin_only() {
        let admin_only: Vec<&str> = menu_items()
            .iter()
            .filter(|i| i.admin_only)
            .map(|i| i.path)
            .collect();
        assert_eq!(admin_only, vec!["/upload"]);
    }
}
