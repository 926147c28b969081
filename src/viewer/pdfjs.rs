//! [`DocumentRenderer`] backed by the `pdfjsLib` global that index.html loads.

use gloo_net::http::Request;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys::{self, Object, Reflect, Uint8Array};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::{describe_js_error, ViewerError};
use super::layout::backing_width;
use super::renderer::{
    DocumentHandle, DocumentRenderer, LoadFuture, LoadedDocument, RenderFuture, RenderedPage,
};
use crate::config;

#[wasm_bindgen]
extern "C" {
    type PdfLoadingTask;

    #[wasm_bindgen(method, getter)]
    fn promise(this: &PdfLoadingTask) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = pdfjsLib, js_name = getDocument, catch)]
    fn get_document(source: &JsValue) -> Result<PdfLoadingTask, JsValue>;

    #[derive(Clone)]
    type PdfDocumentProxy;

    #[wasm_bindgen(method, getter, js_name = numPages)]
    fn num_pages(this: &PdfDocumentProxy) -> u32;

    #[wasm_bindgen(method, js_name = getPage)]
    fn get_page(this: &PdfDocumentProxy, page_number: u32) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    fn destroy(this: &PdfDocumentProxy) -> js_sys::Promise;

    type PdfPageProxy;

    #[wasm_bindgen(method, js_name = getViewport)]
    fn get_viewport(this: &PdfPageProxy, params: &JsValue) -> PdfViewport;

    #[wasm_bindgen(method, catch)]
    fn render(this: &PdfPageProxy, params: &JsValue) -> Result<PdfRenderTask, JsValue>;

    type PdfViewport;

    #[wasm_bindgen(method, getter)]
    fn width(this: &PdfViewport) -> f64;

    #[wasm_bindgen(method, getter)]
    fn height(this: &PdfViewport) -> f64;

    type PdfRenderTask;

    #[wasm_bindgen(method, getter)]
    fn promise(this: &PdfRenderTask) -> js_sys::Promise;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentOptions {
    is_eval_supported: bool,
    disable_auto_fetch: bool,
}

#[derive(Serialize)]
struct ViewportOptions {
    scale: f64,
}

#[derive(Default)]
pub struct PdfJsRenderer;

impl PdfJsRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for PdfJsRenderer {
    fn load(&self, src: &str) -> LoadFuture {
        let src = src.to_string();
        Box::pin(async move {
            configure_worker()?;
            let bytes = fetch_document(&src).await?;
            let proxy = open_document(&bytes).await?;
            let page_count = proxy.num_pages();
            log::info!("Loaded {} ({} pages)", src, page_count);
            Ok(DocumentHandle::new(PdfJsDocument { proxy, page_count }))
        })
    }
}

/// Points the engine at the worker build of the same version as the library.
fn configure_worker() -> Result<(), ViewerError> {
    let library = Reflect::get(&js_sys::global(), &JsValue::from_str("pdfjsLib"))
        .ok()
        .filter(|value| !value.is_undefined())
        .ok_or(ViewerError::EngineUnavailable)?;
    let options = Reflect::get(&library, &JsValue::from_str("GlobalWorkerOptions"))
        .map_err(|_| ViewerError::EngineUnavailable)?;
    Reflect::set(
        &options,
        &JsValue::from_str("workerSrc"),
        &JsValue::from_str(&config::get_pdfjs_worker_url()),
    )
    .map_err(|_| ViewerError::EngineUnavailable)?;
    Ok(())
}

async fn fetch_document(src: &str) -> Result<Vec<u8>, ViewerError> {
    let response = Request::get(src)
        .send()
        .await
        .map_err(|err| ViewerError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(ViewerError::Fetch(response.status()));
    }
    response
        .binary()
        .await
        .map_err(|err| ViewerError::Network(err.to_string()))
}

async fn open_document(bytes: &[u8]) -> Result<PdfDocumentProxy, ViewerError> {
    let options = DocumentOptions { is_eval_supported: false, disable_auto_fetch: true };
    let source = serde_wasm_bindgen::to_value(&options)
        .map_err(|err| ViewerError::Parse(err.to_string()))?;
    Reflect::set(&source, &JsValue::from_str("data"), &Uint8Array::from(bytes))
        .map_err(|err| ViewerError::Parse(describe_js_error(&err)))?;

    let task = get_document(&source).map_err(|err| ViewerError::Parse(describe_js_error(&err)))?;
    let proxy = JsFuture::from(task.promise())
        .await
        .map_err(|err| ViewerError::Parse(describe_js_error(&err)))?;
    Ok(proxy.unchecked_into())
}

struct PdfJsDocument {
    proxy: PdfDocumentProxy,
    page_count: u32,
}

impl LoadedDocument for PdfJsDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn render_page(&self, page_number: u32, target_width: u32) -> RenderFuture {
        let proxy = self.proxy.clone();
        Box::pin(async move {
            let canvas = draw_page(&proxy, page_number, target_width)
                .await
                .map_err(|reason| ViewerError::Render { page: page_number, reason })?;
            Ok(RenderedPage::canvas(page_number, canvas))
        })
    }
}

impl Drop for PdfJsDocument {
    fn drop(&mut self) {
        // Frees the worker-side copy of the document.
        let destroyed = JsFuture::from(self.proxy.destroy());
        spawn_local(async move {
            if let Err(err) = destroyed.await {
                log::debug!("pdf.js document teardown failed: {}", describe_js_error(&err));
            }
        });
    }
}

async fn draw_page(
    proxy: &PdfDocumentProxy,
    page_number: u32,
    target_width: u32,
) -> Result<HtmlCanvasElement, String> {
    let window = window().ok_or("no window")?;
    let page: PdfPageProxy = JsFuture::from(proxy.get_page(page_number))
        .await
        .map_err(|err| describe_js_error(&err))?
        .unchecked_into();

    let natural = page.get_viewport(&viewport_options(1.0)?);
    if natural.width() <= 0.0 {
        return Err("page has no width".to_string());
    }
    let pixel_width = backing_width(target_width, window.device_pixel_ratio());
    let viewport = page.get_viewport(&viewport_options(f64::from(pixel_width) / natural.width())?);

    let canvas: HtmlCanvasElement = window
        .document()
        .ok_or("no document")?
        .create_element("canvas")
        .map_err(|err| describe_js_error(&err))?
        .unchecked_into();
    canvas.set_width(viewport.width().ceil() as u32);
    canvas.set_height(viewport.height().ceil() as u32);
    let css_height = (viewport.height() * f64::from(target_width) / viewport.width()).round();
    canvas
        .set_attribute(
            "style",
            &format!("display: block; width: {}px; height: {}px;", target_width, css_height),
        )
        .map_err(|err| describe_js_error(&err))?;

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|err| describe_js_error(&err))?
        .ok_or("2d context unavailable")?
        .unchecked_into();

    let params = Object::new();
    Reflect::set(&params, &JsValue::from_str("canvasContext"), &context)
        .map_err(|err| describe_js_error(&err))?;
    Reflect::set(&params, &JsValue::from_str("viewport"), &viewport)
        .map_err(|err| describe_js_error(&err))?;

    let task = page.render(&params).map_err(|err| describe_js_error(&err))?;
    JsFuture::from(task.promise())
        .await
        .map_err(|err| describe_js_error(&err))?;
    Ok(canvas)
}

fn viewport_options(scale: f64) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(&ViewportOptions { scale }).map_err(|err| err.to_string())
}
