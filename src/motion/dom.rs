use log::debug;
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{HtmlElement, Window};
use yew::NodeRef;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("element `{0}` is not mounted")]
    NotMounted(&'static str),
    #[error("{call} failed: {detail}")]
    Js { call: &'static str, detail: String },
}

impl DomError {
    pub fn js(call: &'static str, err: JsValue) -> Self {
        DomError::Js {
            call,
            detail: format!("{:?}", err),
        }
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn element(node: &NodeRef, name: &'static str) -> Result<HtmlElement, DomError> {
    node.cast::<HtmlElement>().ok_or(DomError::NotMounted(name))
}

pub fn scroll_y() -> f64 {
    window().ok().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn viewport_height() -> Option<f64> {
    window().ok()?.inner_height().ok()?.as_f64()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<(), DomError> {
    element
        .style()
        .set_property(property, value)
        .map_err(|e| DomError::js("style.setProperty", e))
}

/// Adds or removes a class on `<body>`.
pub fn set_body_class(class: &str, on: bool) -> Result<(), DomError> {
    let body = window()?
        .document()
        .and_then(|d| d.body())
        .ok_or(DomError::NotMounted("body"))?;
    let classes = body.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    result.map_err(|e| DomError::js("classList", e))
}

pub fn viewport_width() -> Option<f64> {
    window().ok()?.inner_width().ok()?.as_f64()
}

/// Logs a failed call the page can live without and drops the error.
pub fn log_failure<T>(result: Result<T, DomError>) -> Option<T> {
    result.map_err(|e| debug!("{}", e)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_dropped_after_logging() {
        assert_eq!(log_failure(Err::<(), _>(DomError::NoWindow)), None);
        assert_eq!(log_failure(Ok::<_, DomError>(7)), Some(7));
    }

    #[test]
    fn errors_name_the_failing_call() {
        let err = DomError::Js {
            call: "sessionStorage.setItem",
            detail: "QuotaExceededError".to_string(),
        };
        assert_eq!(err.to_string(), "sessionStorage.setItem failed: QuotaExceededError");
    }
}
