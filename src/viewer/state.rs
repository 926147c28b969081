use std::rc::Rc;

use yew::Reducible;

use super::error::ViewerError;
use super::layout::effective_render_width;
use super::renderer::DocumentHandle;
use crate::config::{DEFAULT_CONTAINER_WIDTH, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// Zoom multiplier, guaranteed to stay within `MIN_ZOOM..=MAX_ZOOM` and
/// rounded to two decimals so repeated steps do not drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f64);

impl ZoomFactor {
    pub fn new(value: f64) -> Self {
        let rounded = (value * 100.0).round() / 100.0;
        Self(rounded.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whole percentage for the toolbar label.
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + ZOOM_STEP)
    }

    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - ZOOM_STEP)
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Every page stacked vertically.
    #[default]
    Continuous,
    /// One page at a time with navigation controls.
    Paged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(ViewerError),
}

/// A page the viewer wants on screen, and how wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u32,
    pub width: u32,
}

/// What the area below the toolbar shows.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyContent {
    Loading,
    Failed,
    Pages {
        document: DocumentHandle,
        pages: Vec<PageRequest>,
        stacked: bool,
    },
}

#[derive(Debug)]
pub enum ViewerAction {
    /// Starts a load. Every request carries a fresh ticket, even for the
    /// same `src`, and only results holding the current ticket are applied.
    DocumentRequested { src: String, ticket: u64 },
    DocumentLoaded { ticket: u64, document: DocumentHandle },
    DocumentFailed { ticket: u64, error: ViewerError },
    ZoomIn,
    ZoomOut,
    SetDisplayMode(DisplayMode),
    PreviousPage,
    NextPage,
    ContainerResized(i32),
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    src: String,
    load_ticket: u64,
    status: LoadStatus,
    document: Option<DocumentHandle>,
    page_count: u32,
    current_page: u32,
    zoom: ZoomFactor,
    display_mode: DisplayMode,
    container_width: i32,
}

impl ViewerState {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            load_ticket: 0,
            status: LoadStatus::Loading,
            document: None,
            page_count: 0,
            current_page: 1,
            zoom: ZoomFactor::default(),
            display_mode: DisplayMode::default(),
            container_width: DEFAULT_CONTAINER_WIDTH,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn document(&self) -> Option<&DocumentHandle> {
        self.document.as_ref()
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn zoom(&self) -> ZoomFactor {
        self.zoom
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn render_width(&self) -> u32 {
        effective_render_width(self.container_width, self.zoom.value())
    }

    /// Pages to hand to the renderer right now, in display order.
    pub fn visible_pages(&self) -> Vec<PageRequest> {
        if self.status != LoadStatus::Ready || self.page_count == 0 {
            return Vec::new();
        }

        let width = self.render_width();
        match self.display_mode {
            DisplayMode::Continuous => (1..=self.page_count)
                .map(|page_number| PageRequest { page_number, width })
                .collect(),
            DisplayMode::Paged => vec![PageRequest { page_number: self.current_page, width }],
        }
    }

    pub fn body(&self) -> BodyContent {
        match (&self.status, &self.document) {
            (LoadStatus::Failed(_), _) => BodyContent::Failed,
            (LoadStatus::Ready, Some(document)) => BodyContent::Pages {
                document: document.clone(),
                pages: self.visible_pages(),
                stacked: self.display_mode == DisplayMode::Continuous,
            },
            _ => BodyContent::Loading,
        }
    }

    /// Applies an action, returning whether anything changed.
    pub fn apply(&mut self, action: ViewerAction) -> bool {
        match action {
            ViewerAction::DocumentRequested { src, ticket } => self.request_document(src, ticket),
            ViewerAction::DocumentLoaded { ticket, document } => {
                self.document_loaded(ticket, document)
            }
            ViewerAction::DocumentFailed { ticket, error } => self.document_failed(ticket, error),
            ViewerAction::ZoomIn => self.set_zoom(self.zoom.zoom_in()),
            ViewerAction::ZoomOut => self.set_zoom(self.zoom.zoom_out()),
            ViewerAction::SetDisplayMode(mode) => self.set_display_mode(mode),
            ViewerAction::PreviousPage => self.set_current_page(self.current_page.saturating_sub(1)),
            ViewerAction::NextPage => self.set_current_page(self.current_page.saturating_add(1)),
            ViewerAction::ContainerResized(width) => self.container_resized(width),
        }
    }

    fn request_document(&mut self, src: String, ticket: u64) -> bool {
        self.load_ticket = ticket;
        self.src = src;
        self.status = LoadStatus::Loading;
        self.document = None;
        self.page_count = 0;
        self.current_page = 1;
        true
    }

    fn is_pending(&self, ticket: u64) -> bool {
        ticket == self.load_ticket && self.status == LoadStatus::Loading
    }

    fn document_loaded(&mut self, ticket: u64, document: DocumentHandle) -> bool {
        if !self.is_pending(ticket) {
            log::debug!("Ignoring superseded load of {}", self.src);
            return false;
        }
        self.page_count = document.page_count();
        self.current_page = self.current_page.clamp(1, self.page_count.max(1));
        self.document = Some(document);
        self.status = LoadStatus::Ready;
        true
    }

    fn document_failed(&mut self, ticket: u64, error: ViewerError) -> bool {
        if !self.is_pending(ticket) {
            return false;
        }
        self.document = None;
        self.page_count = 0;
        self.status = LoadStatus::Failed(error);
        true
    }

    fn set_zoom(&mut self, zoom: ZoomFactor) -> bool {
        if zoom == self.zoom {
            return false;
        }
        self.zoom = zoom;
        true
    }

    fn set_display_mode(&mut self, mode: DisplayMode) -> bool {
        if mode == self.display_mode {
            return false;
        }
        self.display_mode = mode;
        true
    }

    fn set_current_page(&mut self, page: u32) -> bool {
        if self.page_count == 0 {
            return false;
        }
        let page = page.clamp(1, self.page_count);
        if page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    fn container_resized(&mut self, width: i32) -> bool {
        if width == self.container_width {
            return false;
        }
        self.container_width = width;
        true
    }
}

impl Reducible for ViewerState {
    type Action = ViewerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::viewer::renderer::fixtures::FixedRenderer;
    use crate::viewer::renderer::DocumentRenderer;

    const SRC: &str = "/apresentacao.pdf";

    fn loaded(page_count: u32) -> ViewerState {
        let mut state = ViewerState::new(SRC);
        let document = block_on(FixedRenderer::new(page_count).load(SRC)).expect("fixture load");
        assert!(state.apply(ViewerAction::DocumentLoaded { ticket: 0, document }));
        state
    }

    fn fixture_document(page_count: u32) -> DocumentHandle {
        block_on(FixedRenderer::new(page_count).load(SRC)).expect("fixture load")
    }

    fn is_tenth(value: f64) -> bool {
        ((value * 10.0).round() - value * 10.0).abs() < 1e-9
    }

    #[test]
    fn starts_with_documented_defaults() {
        let state = ViewerState::new(SRC);
        assert_eq!(state.page_count(), 0);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.zoom().value(), 1.0);
        assert_eq!(state.display_mode(), DisplayMode::Continuous);
        assert_eq!(state.status(), &LoadStatus::Loading);
        assert!(state.visible_pages().is_empty());
    }

    #[test]
    fn zoom_in_clamps_after_ten_steps() {
        let mut state = loaded(1);
        for call in 1..=15 {
            let changed = state.apply(ViewerAction::ZoomIn);
            assert_eq!(changed, call <= 10, "call {}", call);
        }
        assert_eq!(state.zoom().value(), 2.0);
        assert_eq!(state.zoom().percent(), 200);
    }

    #[test]
    fn zoom_out_stops_at_minimum() {
        let mut state = loaded(1);
        for _ in 0..10 {
            state.apply(ViewerAction::ZoomOut);
        }
        assert_eq!(state.zoom().value(), 0.6);
        assert!(!state.apply(ViewerAction::ZoomOut));
    }

    #[test]
    fn zoom_stays_on_tenths_for_mixed_sequences() {
        let mut state = loaded(1);
        let pattern = [true, true, false, true, false, false, false, false, false, true];
        for round in 0..30 {
            for (step, zoom_in) in pattern.iter().enumerate() {
                let action = if *zoom_in ^ (round % 3 == step % 3) {
                    ViewerAction::ZoomIn
                } else {
                    ViewerAction::ZoomOut
                };
                state.apply(action);
                let zoom = state.zoom().value();
                assert!((0.6..=2.0).contains(&zoom));
                assert!(is_tenth(zoom), "zoom drifted to {}", zoom);
            }
        }
    }

    #[test]
    fn paging_stays_within_bounds() {
        let mut state = loaded(5);
        state.apply(ViewerAction::SetDisplayMode(DisplayMode::Paged));

        assert!(!state.apply(ViewerAction::PreviousPage));
        assert_eq!(state.current_page(), 1);

        for _ in 0..10 {
            state.apply(ViewerAction::NextPage);
            assert!((1..=5).contains(&state.current_page()));
        }
        assert_eq!(state.current_page(), 5);

        assert!(!state.apply(ViewerAction::NextPage));
        assert_eq!(state.current_page(), 5);
        assert_eq!(
            state.visible_pages(),
            vec![PageRequest { page_number: 5, width: 800 }]
        );
    }

    #[test]
    fn paging_is_a_no_op_without_pages() {
        let mut state = ViewerState::new(SRC);
        assert!(!state.apply(ViewerAction::NextPage));
        assert!(!state.apply(ViewerAction::PreviousPage));
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn mode_switch_keeps_page_and_zoom() {
        let mut state = loaded(8);
        state.apply(ViewerAction::SetDisplayMode(DisplayMode::Paged));
        state.apply(ViewerAction::NextPage);
        state.apply(ViewerAction::NextPage);
        state.apply(ViewerAction::ZoomIn);

        state.apply(ViewerAction::SetDisplayMode(DisplayMode::Continuous));
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.zoom().value(), 1.1);

        state.apply(ViewerAction::SetDisplayMode(DisplayMode::Paged));
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.zoom().value(), 1.1);
        assert!(!state.apply(ViewerAction::SetDisplayMode(DisplayMode::Paged)));
    }

    #[test]
    fn continuous_mode_requests_every_page() {
        let state = loaded(12);
        let pages = state.visible_pages();
        assert_eq!(pages.len(), 12);
        for (index, page) in pages.iter().enumerate() {
            assert_eq!(page.page_number, index as u32 + 1);
            assert_eq!(page.width, 800);
        }
    }

    #[test]
    fn resize_changes_render_width() {
        let mut state = loaded(2);
        assert!(state.apply(ViewerAction::ContainerResized(500)));
        assert!(!state.apply(ViewerAction::ContainerResized(500)));
        state.apply(ViewerAction::ZoomIn);
        assert_eq!(state.render_width(), 550);

        state.apply(ViewerAction::ContainerResized(0));
        assert_eq!(state.render_width(), 320);
    }

    #[test]
    fn failed_load_renders_nothing_but_controls_still_work() {
        let mut state = ViewerState::new(SRC);
        assert!(state.apply(ViewerAction::DocumentFailed {
            ticket: 0,
            error: ViewerError::Fetch(404),
        }));
        assert_eq!(state.status(), &LoadStatus::Failed(ViewerError::Fetch(404)));

        assert!(state.apply(ViewerAction::ZoomIn));
        assert!(state.apply(ViewerAction::SetDisplayMode(DisplayMode::Paged)));
        assert!(state.visible_pages().is_empty());
        assert_eq!(state.page_count(), 0);
    }

    #[test]
    fn results_of_superseded_requests_are_ignored() {
        let mut state = ViewerState::new("/old.pdf");
        state.apply(ViewerAction::DocumentRequested { src: "/new.pdf".into(), ticket: 1 });

        let document = fixture_document(4);
        assert!(!state.apply(ViewerAction::DocumentLoaded { ticket: 0, document }));
        assert!(!state.apply(ViewerAction::DocumentFailed {
            ticket: 0,
            error: ViewerError::Fetch(500),
        }));
        assert_eq!(state.status(), &LoadStatus::Loading);
        assert_eq!(state.page_count(), 0);
    }

    #[test]
    fn re_requesting_the_same_src_supersedes_the_pending_load() {
        // Same document, new engine: the first engine may answer last or first.
        let mut state = ViewerState::new("/a.pdf");
        assert!(state.apply(ViewerAction::DocumentRequested { src: "/a.pdf".into(), ticket: 1 }));
        assert!(state.apply(ViewerAction::DocumentRequested { src: "/a.pdf".into(), ticket: 2 }));

        let old_engine = fixture_document(3);
        let new_engine = fixture_document(7);
        assert!(!state.apply(ViewerAction::DocumentLoaded { ticket: 1, document: old_engine }));
        assert!(state.apply(ViewerAction::DocumentLoaded { ticket: 2, document: new_engine }));
        assert_eq!(state.page_count(), 7);
        assert_eq!(state.status(), &LoadStatus::Ready);
    }

    #[test]
    fn late_result_after_completion_is_ignored() {
        let mut state = ViewerState::new(SRC);
        state.apply(ViewerAction::DocumentRequested { src: SRC.into(), ticket: 1 });
        assert!(state.apply(ViewerAction::DocumentLoaded { ticket: 1, document: fixture_document(2) }));
        assert!(!state.apply(ViewerAction::DocumentLoaded { ticket: 1, document: fixture_document(9) }));
        assert_eq!(state.page_count(), 2);
    }

    #[test]
    fn new_document_resets_page_count() {
        let mut state = loaded(6);
        state.apply(ViewerAction::SetDisplayMode(DisplayMode::Paged));
        state.apply(ViewerAction::NextPage);

        assert!(state.apply(ViewerAction::DocumentRequested { src: "/other.pdf".into(), ticket: 1 }));
        assert_eq!(state.page_count(), 0);
        assert_eq!(state.current_page(), 1);
        assert!(state.document().is_none());
        assert_eq!(state.display_mode(), DisplayMode::Paged);
    }

    #[test]
    fn body_shows_placeholder_while_loading() {
        let state = ViewerState::new(SRC);
        assert_eq!(state.body(), BodyContent::Loading);
    }

    #[test]
    fn body_shows_error_and_no_pages_after_failure() {
        let mut state = ViewerState::new(SRC);
        state.apply(ViewerAction::DocumentFailed { ticket: 0, error: ViewerError::Fetch(404) });
        state.apply(ViewerAction::SetDisplayMode(DisplayMode::Paged));
        assert_eq!(state.body(), BodyContent::Failed);
    }

    #[test]
    fn body_lists_pages_once_ready() {
        let mut state = loaded(3);
        let BodyContent::Pages { pages, stacked, .. } = state.body() else {
            panic!("expected pages");
        };
        assert!(stacked);
        assert_eq!(pages.len(), 3);

        state.apply(ViewerAction::SetDisplayMode(DisplayMode::Paged));
        let BodyContent::Pages { pages, stacked, .. } = state.body() else {
            panic!("expected pages");
        };
        assert!(!stacked);
        assert_eq!(pages, vec![PageRequest { page_number: 1, width: 800 }]);
    }

    #[test]
    fn reducer_keeps_identity_for_no_ops() {
        let state = Rc::new(loaded(3));
        let same = Rc::clone(&state).reduce(ViewerAction::PreviousPage);
        assert!(Rc::ptr_eq(&state, &same));

        let zoomed = Rc::clone(&state).reduce(ViewerAction::ZoomIn);
        assert!(!Rc::ptr_eq(&state, &zoomed));
        assert_eq!(zoomed.zoom().value(), 1.1);
    }
}
