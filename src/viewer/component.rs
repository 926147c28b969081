use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use super::error::describe_js_error;
use super::layout::container_width_for;
use super::page::PdfPage;
use super::pdfjs::PdfJsRenderer;
use super::renderer::RendererHandle;
use super::resize::ResizeObservation;
use super::state::{BodyContent, ViewerAction, ViewerState};
use super::toolbar::Toolbar;
use crate::config::RESIZE_SETTLE_MS;

#[derive(Properties, PartialEq)]
pub struct PdfViewerProps {
    /// URL of the document; also the target of the open/download links.
    pub src: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    /// Rendering engine. Defaults to the page's pdf.js.
    #[prop_or_default]
    pub renderer: Option<RendererHandle>,
}

#[function_component(PdfViewer)]
pub fn pdf_viewer(props: &PdfViewerProps) -> Html {
    let viewer = {
        let src = props.src.to_string();
        use_reducer(move || ViewerState::new(src))
    };
    let container_ref = use_node_ref();
    let renderer = use_memo(
        |renderer| {
            renderer
                .clone()
                .unwrap_or_else(|| RendererHandle::new(PdfJsRenderer::new()))
        },
        props.renderer.clone(),
    );

    let load_tickets = use_mut_ref(|| 0u64);

    // (Re)load whenever the document or the engine changes.
    {
        let dispatcher = viewer.dispatcher();
        use_effect_with_deps(
            move |(src, renderer)| {
                let ticket = {
                    let mut issued = load_tickets.borrow_mut();
                    *issued += 1;
                    *issued
                };
                let src = src.to_string();
                let load = renderer.load(&src);
                dispatcher.dispatch(ViewerAction::DocumentRequested { src: src.clone(), ticket });
                spawn_local(async move {
                    match load.await {
                        Ok(document) => {
                            dispatcher.dispatch(ViewerAction::DocumentLoaded { ticket, document });
                        }
                        Err(error) => {
                            log::warn!("PDF error loading {}: {}", src, error);
                            dispatcher.dispatch(ViewerAction::DocumentFailed { ticket, error });
                        }
                    }
                });
                || ()
            },
            (props.src.clone(), (*renderer).clone()),
        );
    }

    // Track the container width for as long as the viewer is mounted.
    {
        let container_ref = container_ref.clone();
        let dispatcher = viewer.dispatcher();
        use_effect_with_deps(
            move |_| {
                let observation = container_ref.cast::<Element>().and_then(|container| {
                    dispatcher.dispatch(ViewerAction::ContainerResized(container_width_for(
                        container.client_width(),
                    )));

                    let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
                    let observed = container.clone();
                    ResizeObservation::observe(&container, move || {
                        let dispatcher = dispatcher.clone();
                        let observed = observed.clone();
                        // Replacing the timeout cancels the previous one.
                        *pending.borrow_mut() = Some(Timeout::new(RESIZE_SETTLE_MS, move || {
                            dispatcher.dispatch(ViewerAction::ContainerResized(
                                container_width_for(observed.client_width()),
                            ));
                        }));
                    })
                    .map_err(|err| {
                        log::warn!("Resize observation unavailable: {}", describe_js_error(&err));
                    })
                    .ok()
                });

                move || drop(observation)
            },
            (),
        );
    }

    let on_action = {
        let dispatcher = viewer.dispatcher();
        Callback::from(move |action: ViewerAction| dispatcher.dispatch(action))
    };

    let body = match viewer.body() {
        BodyContent::Loading => html! {
            <div class="pdf-viewer-status">{"Carregando apresentação…"}</div>
        },
        BodyContent::Failed => html! {
            <div class="pdf-viewer-status pdf-viewer-error">{"Não foi possível carregar o PDF."}</div>
        },
        BodyContent::Pages { document, pages, stacked } => html! {
            <div class={classes!("pdf-viewer-pages", stacked.then(|| "stacked"))}>
                { for pages.into_iter().map(|request| html! {
                    <PdfPage
                        key={request.page_number}
                        document={document.clone()}
                        page_number={request.page_number}
                        width={request.width}
                    />
                }) }
            </div>
        },
    };

    html! {
        <div ref={container_ref} class={classes!("pdf-viewer", props.class.clone())}>
            <style>{VIEWER_STYLES}</style>
            <Toolbar
                src={props.src.clone()}
                zoom={viewer.zoom()}
                display_mode={viewer.display_mode()}
                current_page={viewer.current_page()}
                page_count={viewer.page_count()}
                {on_action}
            />
            <div class="pdf-viewer-body">
                {body}
            </div>
        </div>
    }
}

const VIEWER_STYLES: &str = r#"
    .pdf-viewer {
        border: 1px solid #f0e2e4;
        border-radius: 16px;
        background: #fff;
        box-shadow: 0 1px 2px rgba(0, 0, 0, 0.05);
        overflow: hidden;
    }
    .pdf-viewer-toolbar {
        display: flex;
        flex-wrap: wrap;
        align-items: center;
        justify-content: space-between;
        gap: 8px;
        padding: 8px 12px;
        border-bottom: 1px solid #f0e2e4;
        background: #fffafc;
    }
    .pdf-viewer-controls,
    .pdf-viewer-links {
        display: flex;
        align-items: center;
        gap: 8px;
    }
    .pdf-viewer-button {
        border: 1px solid #e9d5d7;
        border-radius: 8px;
        padding: 8px 12px;
        font-size: 14px;
        background: transparent;
        cursor: pointer;
        transition: background 0.2s;
    }
    .pdf-viewer-button:hover,
    .pdf-viewer-button.active {
        background: #f7e8ea;
    }
    .pdf-viewer-readout {
        font-size: 14px;
        font-variant-numeric: tabular-nums;
    }
    .pdf-viewer-divider {
        width: 1px;
        height: 20px;
        margin: 0 8px;
        background: #e9d5d7;
    }
    .pdf-viewer-link {
        border-radius: 12px;
        padding: 8px 12px;
        font-size: 14px;
        font-weight: 500;
        text-decoration: none;
    }
    .pdf-viewer-link.open {
        background: #1f1f1f;
        color: #fff;
    }
    .pdf-viewer-link.download {
        background: #f3dcdc;
        color: #1f1f1f;
    }
    .pdf-viewer-body {
        padding: 12px;
    }
    .pdf-viewer-status {
        font-size: 14px;
        color: #6b6b6b;
    }
    .pdf-viewer-error {
        color: #dc2626;
    }
    .pdf-viewer-pages {
        display: flex;
        flex-direction: column;
        align-items: center;
    }
    .pdf-viewer-pages.stacked {
        gap: 24px;
    }
"#;
