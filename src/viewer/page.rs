use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use super::renderer::DocumentHandle;

#[derive(Properties, PartialEq)]
pub struct PdfPageProps {
    pub document: DocumentHandle,
    pub page_number: u32,
    pub width: u32,
}

/// One page slot. Every change of document, page or width starts a new
/// render; a render that finishes after a newer one started is dropped.
#[function_component(PdfPage)]
pub fn pdf_page(props: &PdfPageProps) -> Html {
    let host_ref = use_node_ref();
    let generation = use_mut_ref(|| 0u64);

    {
        let host_ref = host_ref.clone();
        let generation = generation.clone();
        use_effect_with_deps(
            move |(document, page_number, width)| {
                let ticket = {
                    let mut current = generation.borrow_mut();
                    *current += 1;
                    *current
                };
                let render = document.render_page(*page_number, *width);
                let latest = generation.clone();
                spawn_local(async move {
                    let page = match render.await {
                        Ok(page) => page,
                        Err(err) => {
                            log::warn!("{}", err);
                            return;
                        }
                    };
                    if *latest.borrow() != ticket {
                        return;
                    }
                    let Some(host) = host_ref.cast::<Element>() else {
                        return;
                    };
                    let page_number = page.page_number;
                    if let Some(canvas) = page.into_surface() {
                        host.set_inner_html("");
                        if host.append_child(&canvas).is_err() {
                            log::warn!("Could not attach page {}", page_number);
                        }
                    }
                });

                move || {
                    *generation.borrow_mut() += 1;
                }
            },
            (props.document.clone(), props.page_number, props.width),
        );
    }

    html! {
        <div
            ref={host_ref}
            class="pdf-page"
            data-page={props.page_number.to_string()}
            style={format!("max-width: {}px;", props.width)}
        />
    }
}
