use leptos::prelude::*;

/// Title row of an analytics page with the data timestamp and actions.
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,

    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// Already formatted time of the last successful load
    #[prop(optional, into)]
    last_updated: Signal<Option<String>>,

    /// Action buttons
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__content">
                <div class="page-header__text">
                    <h1 class="page-header__title">{title}</h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                    {move || last_updated.get().map(|at| view! {
                        <div class="page-header__timestamp">"Last updated: " {at}</div>
                    })}
                </div>
            </div>
            {children.map(|c| view! {
                <div class="page-header__actions">{c()}</div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_are_optional() {
        let props = PageHeaderProps::builder().title("Data upload").build();
        assert_eq!(props.title, "Data upload");
        assert!(props.children.is_none());
    }
}
