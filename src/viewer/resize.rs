use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, ResizeObserver};

/// Live `ResizeObserver` subscription on one element. Disconnects on drop,
/// so holding it in an effect's cleanup ties it to the component lifetime.
pub struct ResizeObservation {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut()>,
}

impl ResizeObservation {
    pub fn observe(element: &Element, on_resize: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(on_resize) as Box<dyn FnMut()>);
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(element);
        Ok(Self { observer, _callback: callback })
    }
}

impl Drop for ResizeObservation {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
