use yew::prelude::*;

use super::state::{DisplayMode, ViewerAction, ZoomFactor};

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
    pub src: AttrValue,
    pub zoom: ZoomFactor,
    pub display_mode: DisplayMode,
    pub current_page: u32,
    pub page_count: u32,
    pub on_action: Callback<ViewerAction>,
}

pub fn page_indicator(current_page: u32, page_count: u32) -> String {
    if page_count == 0 {
        format!("{} / –", current_page)
    } else {
        format!("{} / {}", current_page, page_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarControl {
    ZoomOut,
    ZoomReadout,
    ZoomIn,
    Continuous,
    Paged,
    PreviousPage,
    PageIndicator,
    NextPage,
}

/// Controls shown left of the links, in order. Pagination only exists in
/// paged mode.
pub fn toolbar_controls(display_mode: DisplayMode) -> Vec<ToolbarControl> {
    use ToolbarControl::*;

    let mut controls = vec![ZoomOut, ZoomReadout, ZoomIn, Continuous, Paged];
    if display_mode == DisplayMode::Paged {
        controls.extend([PreviousPage, PageIndicator, NextPage]);
    }
    controls
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let is_paged = props.display_mode == DisplayMode::Paged;

    let control = |control: ToolbarControl| -> Html {
        let on_action = &props.on_action;
        match control {
            ToolbarControl::ZoomOut => html! {
                <button
                    class="pdf-viewer-button"
                    onclick={on_action.reform(|_: MouseEvent| ViewerAction::ZoomOut)}
                    aria-label="Diminuir zoom"
                >
                    {"–"}
                </button>
            },
            ToolbarControl::ZoomReadout => html! {
                <span class="pdf-viewer-readout">{format!("{}%", props.zoom.percent())}</span>
            },
            ToolbarControl::ZoomIn => html! {
                <button
                    class="pdf-viewer-button"
                    onclick={on_action.reform(|_: MouseEvent| ViewerAction::ZoomIn)}
                    aria-label="Aumentar zoom"
                >
                    {"+"}
                </button>
            },
            ToolbarControl::Continuous => html! {
                <>
                    <div class="pdf-viewer-divider" />
                    <button
                        class={classes!("pdf-viewer-button", (!is_paged).then(|| "active"))}
                        onclick={on_action.reform(|_: MouseEvent| {
                            ViewerAction::SetDisplayMode(DisplayMode::Continuous)
                        })}
                    >
                        {"Rolagem"}
                    </button>
                </>
            },
            ToolbarControl::Paged => html! {
                <button
                    class={classes!("pdf-viewer-button", is_paged.then(|| "active"))}
                    onclick={on_action.reform(|_: MouseEvent| {
                        ViewerAction::SetDisplayMode(DisplayMode::Paged)
                    })}
                >
                    {"Página única"}
                </button>
            },
            ToolbarControl::PreviousPage => html! {
                <>
                    <div class="pdf-viewer-divider" />
                    <button
                        class="pdf-viewer-button"
                        onclick={on_action.reform(|_: MouseEvent| ViewerAction::PreviousPage)}
                    >
                        {"‹ Anterior"}
                    </button>
                </>
            },
            ToolbarControl::PageIndicator => html! {
                <span class="pdf-viewer-readout">
                    {page_indicator(props.current_page, props.page_count)}
                </span>
            },
            ToolbarControl::NextPage => html! {
                <button
                    class="pdf-viewer-button"
                    onclick={on_action.reform(|_: MouseEvent| ViewerAction::NextPage)}
                >
                    {"Próxima ›"}
                </button>
            },
        }
    };

    html! {
        <div class="pdf-viewer-toolbar">
            <div class="pdf-viewer-controls">
                { for toolbar_controls(props.display_mode).into_iter().map(control) }
            </div>

            <div class="pdf-viewer-links">
                <a
                    href={props.src.clone()}
                    target="_blank"
                    rel="noopener noreferrer"
                    class="pdf-viewer-link open"
                >
                    {"Abrir em nova aba"}
                </a>
                <a href={props.src.clone()} download="" class="pdf-viewer-link download">
                    {"Baixar PDF"}
                </a>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_controls_only_in_paged_mode() {
        let continuous = toolbar_controls(DisplayMode::Continuous);
        assert!(!continuous.contains(&ToolbarControl::PreviousPage));
        assert!(!continuous.contains(&ToolbarControl::PageIndicator));
        assert!(!continuous.contains(&ToolbarControl::NextPage));

        let paged = toolbar_controls(DisplayMode::Paged);
        assert_eq!(
            &paged[paged.len() - 3..],
            &[
                ToolbarControl::PreviousPage,
                ToolbarControl::PageIndicator,
                ToolbarControl::NextPage,
            ]
        );
    }

    #[test]
    fn zoom_and_mode_controls_are_always_present() {
        for mode in [DisplayMode::Continuous, DisplayMode::Paged] {
            let controls = toolbar_controls(mode);
            assert_eq!(
                &controls[..5],
                &[
                    ToolbarControl::ZoomOut,
                    ToolbarControl::ZoomReadout,
                    ToolbarControl::ZoomIn,
                    ToolbarControl::Continuous,
                    ToolbarControl::Paged,
                ]
            );
        }
    }

    #[test]
    fn indicator_shows_dash_until_pages_are_known() {
        assert_eq!(page_indicator(1, 0), "1 / –");
        assert_eq!(page_indicator(3, 12), "3 / 12");
    }
}
