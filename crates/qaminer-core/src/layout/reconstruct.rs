use crate::extraction::TextFragment;

/// Number of decimals kept when banding fragments by their `y` origin.
pub const Y_PRECISION_DECIMALS: i32 = 2;

/// Rebuild human reading order for one page.
///
/// Fragments are banded by their rounded `y` origin, bands are read from the
/// top of the page down, and fragments within a band from left to right.
/// Each payload is split on embedded newlines, so a payload ending in `\n`
/// contributes a trailing blank line.
pub fn reconstruct(fragments: &[TextFragment]) -> Vec<String> {
    if fragments.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<(i64, &TextFragment)> =
        fragments.iter().map(|f| (band_key(f.y), f)).collect();

    // Stable sort: fragments sharing both band and x keep their input order.
    ordered.sort_by(|(band_a, a), (band_b, b)| band_b.cmp(band_a).then(a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    for band in ordered.chunk_by(|(a, _), (b, _)| a == b) {
        log::trace!(
            "band y={:.2}: {} fragment(s)",
            band[0].1.y,
            band.len()
        );
        for (_, fragment) in band {
            lines.extend(fragment.text.split('\n').map(str::to_string));
        }
    }

    lines
}

/// Integer band key: `y` rounded to [`Y_PRECISION_DECIMALS`] decimals.
fn band_key(y: f32) -> i64 {
    let scale = 10f64.powi(Y_PRECISION_DECIMALS);
    (f64::from(y) * scale).round() as i64
}
