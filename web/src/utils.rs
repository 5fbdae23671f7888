use gloo::storage::{LocalStorage, Storage};
use twelvedays_core::{KeyValueStore, LogicalSize, Result, ScratchError};
use yew::prelude::*;

/// `window.localStorage` behind the store seam used by the core crate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LocalStore;

impl LocalStore {
    /// `LocalStorage::raw()` throws when storage is blocked, so it is only reached after this check.
    fn storage() -> Result<web_sys::Storage> {
        match gloo::utils::window().local_storage() {
            Ok(Some(_)) => Ok(LocalStorage::raw()),
            Ok(None) => Err(ScratchError::StorageUnavailable),
            Err(err) => {
                log::warn!("localStorage is not accessible: {:?}", err);
                Err(ScratchError::StorageUnavailable)
            }
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| ScratchError::StorageUnavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| ScratchError::StorageWrite(format!("{:?}", err)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| ScratchError::StorageWrite(format!("{:?}", err)))
    }
}

pub(crate) fn device_pixel_ratio() -> f64 {
    gloo::utils::window().device_pixel_ratio()
}

/// Rendered size of an element in CSS pixels, `None` if the ref is not mounted.
pub(crate) fn element_size(node: &NodeRef) -> Option<LogicalSize> {
    let element = node.cast::<web_sys::Element>()?;
    Some(LogicalSize::new(
        f64::from(element.client_width()),
        f64::from(element.client_height()),
    ))
}

pub(crate) fn reload_page() {
    if let Err(err) = gloo::utils::window().location().reload() {
        log::error!("reload failed: {:?}", err);
    }
}

pub(crate) fn navigate_to(href: &str) {
    if let Err(err) = gloo::utils::window().location().set_href(href) {
        log::error!("navigation to {} failed: {:?}", href, err);
    }
}

/// True when the click landed on the element carrying the handler, not on a child.
pub(crate) fn is_backdrop_click(e: &MouseEvent) -> bool {
    match (e.target(), e.current_target()) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attach the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use twelvedays_core::{PERSISTED_KEYS, ProgressKind, reset_progress};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_store_writes_and_resets() {
        let store = LocalStore;
        let key = ProgressKind::Scratched.key();

        store.set(key, r#"{"1":true}"#).unwrap();
        assert_eq!(store.get(key).unwrap().as_deref(), Some(r#"{"1":true}"#));

        reset_progress(&store).unwrap();
        for key in PERSISTED_KEYS {
            assert_eq!(store.get(key).unwrap(), None);
        }
    }
}
