/// Document shown by the landing page viewer.
pub const PRESENTATION_SRC: &str = "/apresentacao.pdf";

pub const DEFAULT_ZOOM: f64 = 1.0;
pub const MIN_ZOOM: f64 = 0.6;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Pages are never rendered narrower than this, whatever the container or zoom.
pub const MIN_RENDER_WIDTH: i32 = 320;
pub const MAX_CONTAINER_WIDTH: i32 = 1100;
/// Horizontal padding subtracted from the observed element width.
pub const CONTAINER_INSET: i32 = 24;
pub const DEFAULT_CONTAINER_WIDTH: i32 = 800;

/// Quiet period before a burst of resize notifications is applied.
pub const RESIZE_SETTLE_MS: u32 = 80;

/// Must match the `pdf.js` build loaded by index.html, otherwise the
/// engine refuses to talk to its worker.
pub const PDFJS_VERSION: &str = "3.11.174";

#[cfg(debug_assertions)]
pub fn get_pdfjs_worker_url() -> String {
    format!("https://cdn.jsdelivr.net/npm/pdfjs-dist@{}/build/pdf.worker.js", PDFJS_VERSION)
}

#[cfg(not(debug_assertions))]
pub fn get_pdfjs_worker_url() -> String {
    format!("https://cdn.jsdelivr.net/npm/pdfjs-dist@{}/build/pdf.worker.min.js", PDFJS_VERSION)
}
