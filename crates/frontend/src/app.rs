use crate::routes::routes::AppRoutes;
use crate::shared::config::{load_config, AppConfig};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context::<AppConfig>(load_config());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
