/// Scroll-depth thresholds, in percent of the article scrolled.
pub const MILESTONES: [u8; 4] = [25, 50, 75, 100];

/// Scroll position as a percentage of the scrollable range, rounded and
/// clamped to [0, 100]. Returns `None` when the content does not extend past
/// the viewport; milestone tracking is skipped for such a view rather than
/// fabricating a 100% depth.
pub fn scroll_percentage(scroll_top: f64, content_height: f64, viewport_height: f64) -> Option<u8> {
    let scrollable = content_height - viewport_height;
    if scrollable <= 0.0 {
        return None;
    }

    let percentage = (scroll_top / scrollable * 100.0).round();
    Some(percentage.clamp(0.0, 100.0) as u8)
}

/// First milestone newly crossed at `percentage`, walking the fixed set in
/// ascending order. A jump past several thresholds still yields one
/// milestone per signal; later signals catch the rest.
pub fn next_milestone(percentage: u8, last_milestone: u8) -> Option<u8> {
    MILESTONES
        .iter()
        .copied()
        .find(|&milestone| percentage >= milestone && last_milestone < milestone)
}
