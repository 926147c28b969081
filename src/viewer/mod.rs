//! Embedded presentation viewer: toolbar, page area and the state that
//! drives them. Rasterization is delegated to a [`DocumentRenderer`].

mod component;
mod error;
mod layout;
mod page;
mod pdfjs;
mod renderer;
mod resize;
mod state;
mod toolbar;

pub use component::{PdfViewer, PdfViewerProps};
pub use error::ViewerError;
pub use pdfjs::PdfJsRenderer;
pub use renderer::{
    DocumentHandle, DocumentRenderer, LoadFuture, LoadedDocument, RenderFuture, RenderedPage,
    RendererHandle,
};
pub use state::{BodyContent, DisplayMode, LoadStatus, PageRequest, ViewerAction, ViewerState, ZoomFactor};
