//! Seam between the viewer and whatever engine actually rasterizes pages.
//!
//! The viewer only ever talks to [`DocumentRenderer`] and [`LoadedDocument`],
//! so the production pdf.js engine can be swapped for a double that reports
//! a fixed page count and renders nothing.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use web_sys::HtmlCanvasElement;

use super::error::ViewerError;

pub type LoadFuture = Pin<Box<dyn Future<Output = Result<DocumentHandle, ViewerError>>>>;
pub type RenderFuture = Pin<Box<dyn Future<Output = Result<RenderedPage, ViewerError>>>>;

pub trait DocumentRenderer {
    /// Fetches and parses the document at `src`.
    fn load(&self, src: &str) -> LoadFuture;
}

pub trait LoadedDocument {
    fn page_count(&self) -> u32;

    /// Rasterizes a 1-based page so it is `target_width` CSS pixels wide.
    fn render_page(&self, page_number: u32, target_width: u32) -> RenderFuture;
}

/// Output of one page render.
pub struct RenderedPage {
    pub page_number: u32,
    surface: Option<HtmlCanvasElement>,
}

impl RenderedPage {
    pub fn canvas(page_number: u32, canvas: HtmlCanvasElement) -> Self {
        Self { page_number, surface: Some(canvas) }
    }

    /// A page with nothing to show, used by engines that do not draw.
    pub fn blank(page_number: u32) -> Self {
        Self { page_number, surface: None }
    }

    pub fn into_surface(self) -> Option<HtmlCanvasElement> {
        self.surface
    }
}

/// Shared handle to an injected renderer; equal when it is the same instance.
#[derive(Clone)]
pub struct RendererHandle(Rc<dyn DocumentRenderer>);

impl RendererHandle {
    pub fn new(renderer: impl DocumentRenderer + 'static) -> Self {
        Self(Rc::new(renderer))
    }

    pub fn load(&self, src: &str) -> LoadFuture {
        self.0.load(src)
    }
}

impl PartialEq for RendererHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RendererHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RendererHandle")
    }
}

/// Shared handle to a loaded document. Dropping the last clone releases
/// whatever the engine holds for it.
#[derive(Clone)]
pub struct DocumentHandle(Rc<dyn LoadedDocument>);

impl DocumentHandle {
    pub fn new(document: impl LoadedDocument + 'static) -> Self {
        Self(Rc::new(document))
    }

    pub fn page_count(&self) -> u32 {
        self.0.page_count()
    }

    pub fn render_page(&self, page_number: u32, target_width: u32) -> RenderFuture {
        self.0.render_page(page_number, target_width)
    }
}

impl PartialEq for DocumentHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentHandle")
            .field("page_count", &self.page_count())
            .finish()
    }
}
