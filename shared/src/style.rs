use serde_json::{Value, json};

/// Feature attribute holding the tract's median household income.
pub const INCOME_ATTRIBUTE: &str = "COL2";
/// Feature attribute holding the census tract identifier.
pub const IDENTIFIER_ATTRIBUTE: &str = "CTUID";

/// Color for incomes below the first breakpoint.
pub const BASE_COLOR: &str = "#eaeaea";

/// Step breakpoints as (lower bound, color). Each bound is inclusive.
pub const INCOME_BREAKS: [(f64, &str); 4] = [
    (45000.0, "#c7e9c0"),
    (65829.0, "#74c476"),
    (100000.0, "#238b45"),
    (150000.0, "#00441b"),
];

pub const OUTLINE_COLOR: &str = "white";

pub const OPACITY_BASE: f64 = 1.25;
pub const OPACITY_STOPS: [(f64, f64); 2] = [(10.0, 0.6), (11.0, 1.0)];

/// Number of color buckets produced by the step function.
pub const BUCKET_COUNT: usize = INCOME_BREAKS.len() + 1;

/// Colors of every bucket, lowest first.
pub fn bucket_colors() -> [&'static str; BUCKET_COUNT] {
    let mut colors = [BASE_COLOR; BUCKET_COUNT];
    for (slot, (_, color)) in colors.iter_mut().skip(1).zip(INCOME_BREAKS.iter()) {
        *slot = *color;
    }
    colors
}

/// Index of the bucket an income falls into. NaN lands in the base bucket.
pub fn bucket_index(income: f64) -> usize {
    INCOME_BREAKS
        .iter()
        .take_while(|(threshold, _)| income >= *threshold)
        .count()
}

/// Fill color for an income, matching the engine's `step` expression.
pub fn classify_income(income: f64) -> &'static str {
    bucket_colors()[bucket_index(income)]
}

/// `["step", ["get", "COL2"], base, t1, c1, ...]`
pub fn fill_color_expression() -> Value {
    let mut expr = vec![
        json!("step"),
        json!(["get", INCOME_ATTRIBUTE]),
        json!(BASE_COLOR),
    ];
    for (threshold, color) in INCOME_BREAKS {
        expr.push(json!(threshold as u64));
        expr.push(json!(color));
    }
    Value::Array(expr)
}

/// Zoom-driven opacity ramp, exponential with base 1.25.
pub fn fill_opacity_expression() -> Value {
    let mut expr = vec![
        json!("interpolate"),
        json!(["exponential", OPACITY_BASE]),
        json!(["zoom"]),
    ];
    for (zoom, opacity) in OPACITY_STOPS {
        expr.push(json!(zoom));
        expr.push(json!(opacity));
    }
    Value::Array(expr)
}

/// Paint block used when the layer is first added, before the zoom ramp.
pub fn initial_fill_paint() -> Value {
    json!({
        "fill-color": fill_color_expression(),
        "fill-opacity": 1,
        "fill-outline-color": OUTLINE_COLOR,
    })
}

/// Evaluates the opacity ramp at `zoom`, flat outside the outer stops.
pub fn fill_opacity_at(zoom: f64) -> f64 {
    let (lower_zoom, lower_opacity) = OPACITY_STOPS[0];
    let (upper_zoom, upper_opacity) = OPACITY_STOPS[OPACITY_STOPS.len() - 1];
    if zoom <= lower_zoom {
        return lower_opacity;
    }
    if zoom >= upper_zoom {
        return upper_opacity;
    }
    let t = exponential_progress(zoom, lower_zoom, upper_zoom, OPACITY_BASE);
    lower_opacity + (upper_opacity - lower_opacity) * t
}

fn exponential_progress(input: f64, lower: f64, upper: f64, base: f64) -> f64 {
    let span = upper - lower;
    let progress = input - lower;
    if span == 0.0 {
        return 0.0;
    }
    if (base - 1.0).abs() < f64::EPSILON {
        progress / span
    } else {
        (base.powf(progress) - 1.0) / (base.powf(span) - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    #[test]
    fn breakpoints_strictly_increase() {
        for pair in INCOME_BREAKS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{pair:?} out of order");
        }
    }

    #[test]
    fn classify_income_bucket_boundaries() {
        assert_eq!(classify_income(0.0), "#eaeaea");
        assert_eq!(classify_income(44999.99), "#eaeaea");
        assert_eq!(classify_income(45000.0), "#c7e9c0");
        assert_eq!(classify_income(65828.0), "#c7e9c0");
        assert_eq!(classify_income(65829.0), "#74c476");
        assert_eq!(classify_income(99999.0), "#74c476");
        assert_eq!(classify_income(100000.0), "#238b45");
        assert_eq!(classify_income(149999.0), "#238b45");
        assert_eq!(classify_income(150000.0), "#00441b");
        assert_eq!(classify_income(2_000_000.0), "#00441b");
    }

    #[test]
    fn negative_and_nan_incomes_use_base_color() {
        assert_eq!(classify_income(-1.0), BASE_COLOR);
        assert_eq!(classify_income(f64::NAN), BASE_COLOR);
    }

    #[test]
    fn fill_color_expression_matches_step_layout() {
        let expected = json!([
            "step",
            ["get", "COL2"],
            "#eaeaea",
            45000,
            "#c7e9c0",
            65829,
            "#74c476",
            100000,
            "#238b45",
            150000,
            "#00441b"
        ]);
        assert_eq!(fill_color_expression(), expected);
    }

    #[test]
    fn fill_opacity_expression_matches_interpolate_layout() {
        let expected = json!([
            "interpolate",
            ["exponential", 1.25],
            ["zoom"],
            10.0,
            0.6,
            11.0,
            1.0
        ]);
        assert_eq!(fill_opacity_expression(), expected);
    }

    #[test]
    fn initial_paint_has_outline_and_full_opacity() {
        let paint = initial_fill_paint();
        assert_eq!(paint["fill-outline-color"], "white");
        assert_eq!(paint["fill-opacity"], 1);
        assert_eq!(paint["fill-color"], fill_color_expression());
    }

    #[test]
    fn opacity_hits_stops_exactly() {
        assert_close(fill_opacity_at(10.0), 0.6);
        assert_close(fill_opacity_at(11.0), 1.0);
    }

    #[test]
    fn opacity_is_flat_outside_stops() {
        assert_close(fill_opacity_at(9.5), 0.6);
        assert_close(fill_opacity_at(0.0), 0.6);
        assert_close(fill_opacity_at(12.5), 1.0);
    }

    #[test]
    fn opacity_is_monotonic_between_stops() {
        let mut previous = fill_opacity_at(10.0);
        for step in 1..=100 {
            let zoom = 10.0 + step as f64 / 100.0;
            let current = fill_opacity_at(zoom);
            assert!(
                current >= previous,
                "opacity dropped at zoom {zoom}: {previous} -> {current}"
            );
            previous = current;
        }
    }

    #[test]
    fn opacity_midpoint_follows_exponential_curve() {
        let t = (1.25f64.powf(0.5) - 1.0) / (1.25 - 1.0);
        assert_close(fill_opacity_at(10.5), 0.6 + 0.4 * t);
        assert!(fill_opacity_at(10.5) < 0.8);
    }
}
