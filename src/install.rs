use gloo::events::{EventListener, EventListenerOptions};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Event;

use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

impl InstallOutcome {
    /// Anything other than `"accepted"` counts as dismissed.
    pub fn parse(outcome: &str) -> Self {
        if outcome == "accepted" {
            InstallOutcome::Accepted
        } else {
            InstallOutcome::Dismissed
        }
    }
}

/// A held `beforeinstallprompt` event, good for one `prompt()` call.
#[derive(Clone, Debug)]
pub struct DeferredInstallPrompt(Event);

impl PartialEq for DeferredInstallPrompt {
    fn eq(&self, other: &Self) -> bool {
        let a: &JsValue = self.0.as_ref();
        let b: &JsValue = other.0.as_ref();
        a == b
    }
}

impl DeferredInstallPrompt {
    /// Shows the platform install dialog and waits for the user's choice.
    pub async fn prompt(self) -> Result<InstallOutcome, AppError> {
        let event: &JsValue = self.0.as_ref();

        let prompt: Function = Reflect::get(event, &JsValue::from_str("prompt"))
            .ok()
            .and_then(|f| f.dyn_into().ok())
            .ok_or_else(|| AppError::InstallPrompt("event has no prompt()".into()))?;
        prompt
            .call0(event)
            .map_err(|e| AppError::InstallPrompt(format!("{e:?}")))?;

        let choice: Promise = Reflect::get(event, &JsValue::from_str("userChoice"))
            .ok()
            .and_then(|p| p.dyn_into().ok())
            .ok_or_else(|| AppError::InstallPrompt("event has no userChoice".into()))?;
        let choice = JsFuture::from(choice)
            .await
            .map_err(|e| AppError::InstallPrompt(format!("{e:?}")))?;

        let outcome = Reflect::get(&choice, &JsValue::from_str("outcome"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        Ok(InstallOutcome::parse(&outcome))
    }
}

/// Suppresses the browser's own install banner and hands the event to
/// `on_available`. Dropping the listener stops listening.
pub fn listen_for_install_prompt(
    on_available: impl Fn(DeferredInstallPrompt) + 'static,
) -> Option<EventListener> {
    let window = web_sys::window()?;
    Some(EventListener::new_with_options(
        &window,
        "beforeinstallprompt",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            event.prevent_default();
            gloo::console::log!("install prompt available");
            on_available(DeferredInstallPrompt(event.clone()));
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_parsing() {
        assert_eq!(InstallOutcome::parse("accepted"), InstallOutcome::Accepted);
        assert_eq!(InstallOutcome::parse("dismissed"), InstallOutcome::Dismissed);
        assert_eq!(InstallOutcome::parse(""), InstallOutcome::Dismissed);
    }
}
