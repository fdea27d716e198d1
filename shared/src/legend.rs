use crate::style::{BUCKET_COUNT, bucket_colors};

/// One legend row. `label` may contain inline emphasis markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

const BUCKET_LABELS: [&str; BUCKET_COUNT] = [
    "0-45,000",
    "45,000-<b>65,829</b> < Toronto Median Income",
    "65,830-100,000",
    "100,000-150,000",
    ">150,000",
];

/// Legend rows in classification order, lowest bucket first.
///
/// Colors come from the same table the fill `step` expression is built
/// from, so the legend cannot drift from the map.
pub fn legend_entries() -> [LegendEntry; BUCKET_COUNT] {
    let colors = bucket_colors();
    std::array::from_fn(|i| LegendEntry {
        label: BUCKET_LABELS[i],
        color: colors[i],
    })
}
