/// Scrollable container a [`Carousel`](super::Carousel) is attached to.
///
/// Implemented by the host UI layer over the real scroll container. All
/// lengths are CSS pixels in the container's scroll coordinates.
pub trait Viewport {
    /// Current horizontal scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Visible width of the container.
    fn client_width(&self) -> f64;

    /// Total scrollable width of the content.
    fn scroll_width(&self) -> f64;

    /// Measured left edge of every item, adjusted by the container's own
    /// position and scroll offset. `None` when layout cannot be measured.
    fn item_offsets(&self) -> Option<Vec<f64>> {
        None
    }

    /// Width of a single item, used when offsets cannot be measured.
    fn item_width(&self) -> f64;

    /// Raw computed `column-gap` of the container, e.g. `"16px"` or `"normal"`.
    fn computed_gap(&self) -> Option<String> {
        None
    }

    /// Whether the container honours native smooth scrolling.
    fn supports_smooth_scroll(&self) -> bool {
        false
    }

    /// Move the scroll offset, natively animated when `smooth` is set.
    fn scroll_to(&mut self, offset: f64, smooth: bool);

    /// Toggle the container's `scroll-behavior: smooth` style.
    fn set_smooth_behavior(&mut self, _enabled: bool) {}
}

/// Parse a computed CSS gap. Returns `None` for anything non-numeric.
pub fn parse_gap(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let number = raw.strip_suffix("px").unwrap_or(raw).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|gap| gap.is_finite() && *gap >= 0.0)
}

/// Gap between items: the computed one when readable, otherwise `fallback`.
pub fn resolve_gap(computed: Option<&str>, fallback: f64) -> f64 {
    computed.and_then(parse_gap).unwrap_or(fallback)
}

pub fn max_scroll_offset<V: Viewport + ?Sized>(viewport: &V) -> f64 {
    (viewport.scroll_width() - viewport.client_width()).max(0.0)
}

/// Left edge of each of the first `item_count` items.
pub(crate) fn item_positions<V: Viewport + ?Sized>(
    viewport: &V,
    item_count: usize,
    fallback_gap: f64,
) -> Vec<f64> {
    if let Some(mut measured) = viewport.item_offsets() {
        if measured.len() >= item_count && measured.iter().all(|p| p.is_finite()) {
            measured.truncate(item_count);
            return measured;
        }
    }

    let gap = resolve_gap(viewport.computed_gap().as_deref(), fallback_gap);
    let stride = viewport.item_width().max(0.0) + gap;
    (0..item_count).map(|i| i as f64 * stride).collect()
}
