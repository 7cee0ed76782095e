//! Equal-slot horizontal layout for image rows.

use ratatui::layout::Rect;

/// Splits `width` into `slots` horizontal cells of equal size.
///
/// Returns `(x, width)` pairs covering the full width in order. When the
/// width does not divide evenly, the leftmost slots take the extra cell,
/// matching how ratatui's `Layout` resolves equal ratios.
pub fn partition_row(width: u16, slots: usize) -> Vec<(u16, u16)> {
    let Ok(slots) = u16::try_from(slots) else {
        return Vec::new();
    };
    if slots == 0 {
        return Vec::new();
    }

    let base = width / slots;
    let rem = width % slots;
    let mut x = 0u16;
    (0..slots)
        .map(|i| {
            let w = base + u16::from(i < rem);
            let slot = (x, w);
            x += w;
            slot
        })
        .collect()
}

/// Rect flavor of [`partition_row`] for the interactive viewer.
pub fn image_row_areas(area: Rect, slots: usize) -> Vec<Rect> {
    partition_row(area.width, slots)
        .into_iter()
        .map(|(dx, w)| Rect::new(area.x + dx, area.y, w, area.height))
        .collect()
}
