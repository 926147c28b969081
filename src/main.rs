use log::{info, Level};
use yew::prelude::*;

use presentation_viewer::config;
use presentation_viewer::viewer::PdfViewer;

#[function_component]
fn App() -> Html {
    html! {
        <main class="presentation">
            <section id="apresentacao">
                <PdfViewer src={config::PRESENTATION_SRC} />
            </section>
        </main>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting presentation viewer");
    yew::Renderer::<App>::new().render();
}
