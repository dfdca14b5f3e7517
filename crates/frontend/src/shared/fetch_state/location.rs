use std::rc::Rc;

/// The navigable address of the current page.
pub trait PageLocation {
    /// Current query string, without the leading `?`
    fn read_query(&self) -> String;
    /// Replace the query string without adding a history entry.
    fn replace_query(&self, query: &str);
    fn redirect(&self, path: &str);
}

/// `window.location` and `window.history`, with an optional in-app navigator.
#[derive(Clone, Default)]
pub struct BrowserLocation {
    navigate: Option<Rc<dyn Fn(&str)>>,
}

impl BrowserLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the router for redirects instead of a full page load.
    pub fn with_navigator(navigate: impl Fn(&str) + 'static) -> Self {
        Self {
            navigate: Some(Rc::new(navigate)),
        }
    }
}

impl PageLocation for BrowserLocation {
    fn read_query(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .map(|s| s.trim_start_matches('?').to_string())
            .unwrap_or_default()
    }

    fn replace_query(&self, query: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let path = location.pathname().unwrap_or_default();
        let url = if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        };

        let current = format!(
            "{}{}",
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default()
        );
        if current == url {
            return;
        }
        if let Ok(history) = window.history() {
            if let Err(e) =
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
            {
                log::warn!("Failed to update the page URL: {:?}", e);
            }
        }
    }

    fn redirect(&self, path: &str) {
        if let Some(navigate) = &self.navigate {
            navigate(path);
            return;
        }
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                log::error!("Failed to redirect to {}: {:?}", path, e);
            }
        }
    }
}
