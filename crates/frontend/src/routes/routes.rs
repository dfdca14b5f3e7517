use crate::dashboards::{
    BudgetDashboard, OverviewDashboard, PapersDashboard, PerformanceDashboard, StudentsDashboard,
};
use crate::layout::Shell;
use crate::system::auth::guard::{RequireAdmin, RequireAuth};
use crate::system::pages::login::LoginPage;
use crate::system::upload::UploadPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

/// Signed-in page inside the application shell.
#[component]
fn Protected(children: ChildrenFn) -> impl IntoView {
    view! {
        <RequireAuth>
            {
                let children = children.clone();
                view! { <Shell>{children()}</Shell> }
            }
        </RequireAuth>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="not-found">"Page not found."</div> }>
                <Route path=path!("/sign-in") view=LoginPage />
                <Route path=path!("/") view=|| view! { <Protected><OverviewDashboard /></Protected> } />
                <Route path=path!("/performance") view=|| view! { <Protected><PerformanceDashboard /></Protected> } />
                <Route path=path!("/papers") view=|| view! { <Protected><PapersDashboard /></Protected> } />
                <Route path=path!("/students") view=|| view! { <Protected><StudentsDashboard /></Protected> } />
                <Route path=path!("/budget") view=|| view! { <Protected><BudgetDashboard /></Protected> } />
                <Route
                    path=path!("/upload")
                    view=|| view! {
                        <Protected>
                            <RequireAdmin>
                                <UploadPage />
                            </RequireAdmin>
                        </Protected>
                    }
                />
            </Routes>
        </Router>
    }
}
