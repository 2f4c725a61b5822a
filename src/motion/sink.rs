use std::rc::Rc;

use log::debug;
use yew::NodeRef;

use super::dom::{self, DomError};
use super::mapper::VisualProps;

/// Somewhere computed visual state can be written to.
pub trait VisualSink {
    fn apply(&self, props: &VisualProps);
    fn set_text(&self, text: &str);
}

impl<T: VisualSink + ?Sized> VisualSink for Rc<T> {
    fn apply(&self, props: &VisualProps) {
        (**self).apply(props)
    }

    fn set_text(&self, text: &str) {
        (**self).set_text(text)
    }
}

/// Writes inline `transform`/`opacity` styles on a rendered element.
/// Updates are dropped while the element is not mounted.
#[derive(Clone)]
pub struct ElementSink {
    node: NodeRef,
    name: &'static str,
}

impl ElementSink {
    pub fn new(node: NodeRef, name: &'static str) -> Self {
        Self { node, name }
    }

    fn try_apply(&self, props: &VisualProps) -> Result<(), DomError> {
        let element = dom::element(&self.node, self.name)?;
        dom::set_style(&element, "transform", &props.transform_css())?;
        dom::set_style(&element, "opacity", &props.opacity.to_string())
    }

    /// Removes every inline style this sink writes.
    pub fn clear(&self) {
        let Ok(element) = dom::element(&self.node, self.name) else {
            return;
        };
        let style = element.style();
        for property in ["transform", "opacity"] {
            if let Err(e) = style.remove_property(property) {
                debug!("{}: {}", self.name, DomError::js("style.removeProperty", e));
            }
        }
    }
}

impl VisualSink for ElementSink {
    fn apply(&self, props: &VisualProps) {
        if let Err(e) = self.try_apply(props) {
            debug!("skipping visual update: {}", e);
        }
    }

    fn set_text(&self, text: &str) {
        match dom::element(&self.node, self.name) {
            Ok(element) => element.set_text_content(Some(text)),
            Err(e) => debug!("skipping text update: {}", e),
        }
    }
}
