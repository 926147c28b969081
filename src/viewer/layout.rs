use crate::config::{CONTAINER_INSET, MAX_CONTAINER_WIDTH, MIN_RENDER_WIDTH};

/// Usable width for pages inside an element of the given client width.
pub fn container_width_for(client_width: i32) -> i32 {
    client_width
        .saturating_sub(CONTAINER_INSET)
        .min(MAX_CONTAINER_WIDTH)
}

/// Width in CSS pixels handed to the rendering engine for every visible page.
pub fn effective_render_width(container_width: i32, zoom: f64) -> u32 {
    let scaled = (f64::from(container_width) * zoom).floor();
    // Negative or tiny containers fall through to the floor.
    if scaled < f64::from(MIN_RENDER_WIDTH) {
        return MIN_RENDER_WIDTH as u32;
    }
    scaled as u32
}

/// Backing-store width for a canvas shown at `css_width` on a display with
/// the given device pixel ratio.
pub fn backing_width(css_width: u32, device_pixel_ratio: f64) -> u32 {
    let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    (f64::from(css_width) * ratio).round() as u32
}
