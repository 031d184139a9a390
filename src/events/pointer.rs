use glam::DVec2;
use web_sys as web;

/// Map a client-space point into canvas backing-store pixels.
///
/// `rect_origin`/`rect_size` are the canvas bounding rect in CSS pixels.
/// Returns `None` for a collapsed rect, where no mapping exists.
#[inline]
pub fn client_to_canvas_px(
    client: DVec2,
    rect_origin: DVec2,
    rect_size: DVec2,
    canvas_size: DVec2,
) -> Option<DVec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    Some((client - rect_origin) / rect_size * canvas_size)
}

#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<DVec2> {
    let rect = canvas.get_bounding_client_rect();
    client_to_canvas_px(
        DVec2::new(ev.client_x() as f64, ev.client_y() as f64),
        DVec2::new(rect.left(), rect.top()),
        DVec2::new(rect.width(), rect.height()),
        DVec2::new(canvas.width() as f64, canvas.height() as f64),
    )
}
