//! Random comment sampling for the cluster detail page.
//!
//! Every call draws anew; nothing is cached between requests.

use complaint_map_analytics_models::{SampleBounds, SliderRange};
use rand::Rng;
use rand::seq::index;

/// Upper limit of the sample-size slider.
pub const MAX_SAMPLES: u32 = 10;

/// Slider bounds for a cluster with `available` comments.
///
/// The upper bound is `min(10, max(2, available))`: a cluster with a
/// single comment still offers a slider up to 2, and the draw is capped at
/// what exists.
#[must_use]
pub fn sample_bounds(available: usize) -> SampleBounds {
    let shown = u32::try_from(available).unwrap_or(u32::MAX).max(2);
    SampleBounds {
        slider: SliderRange {
            min: 1,
            max: shown.min(MAX_SAMPLES),
            default: 1,
        },
        available,
    }
}

/// Number of comments that a request for `requested` actually draws.
#[must_use]
pub fn draw_size(requested: Option<u32>, bounds: SampleBounds) -> usize {
    let k = bounds.slider.resolve(requested) as usize;
    k.min(bounds.available)
}

/// Draws `k` distinct comments uniformly at random without replacement.
///
/// `k` is capped at `comments.len()`. The result order is random.
pub fn sample_comments<'a, R: Rng + ?Sized>(
    comments: &'a [String],
    k: usize,
    rng: &mut R,
) -> Vec<&'a str> {
    let k = k.min(comments.len());
    index::sample(rng, comments.len(), k)
        .into_iter()
        .map(|i| comments[i].as_str())
        .collect()
}
