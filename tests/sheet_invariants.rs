//! Property sweep over generated item sets.
//!
//! A fixed-seed LCG builds a few hundred item lists; every layout and fit
//! result is checked against the geometric guarantees below. Failures are
//! collected so one run reports every broken case.

use zensheet::*;

// ---- Deterministic generator ----

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next() % u64::from(hi - lo + 1)) as u32
    }
}

/// 1..=40 items, each side 1..=3000 px.
fn items_for_seed(seed: u64) -> Vec<SheetItem> {
    let mut rng = Lcg(seed);
    let n = rng.range(1, 40);
    (0..n)
        .map(|i| {
            let w = rng.range(1, 3000);
            let h = rng.range(1, 3000);
            SheetItem::new(format!("img{i}.png"), w, h).unwrap()
        })
        .collect()
}

const SEEDS: u64 = 500;
const SCALES: [f64; 3] = [1.0, 0.75, 0.5];

// ---- Per-layout checks ----

fn check_layout(
    name: &str,
    items: &[SheetItem],
    config: &SheetConfig,
    sheet: &SheetLayout,
    failures: &mut Vec<String>,
) {
    let m = config.margin;

    if sheet.placements.len() != items.len() {
        failures.push(format!(
            "{name}: {} placements for {} items",
            sheet.placements.len(),
            items.len()
        ));
        return;
    }

    // Order preservation: placement i is item i, reading order is input order.
    for (i, pair) in sheet.placements.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let same_row_forward = a.row == b.row && b.x > a.x && b.y == a.y;
        let next_row = b.row == a.row + 1 && b.y > a.y && b.x == m;
        if !(same_row_forward || next_row) {
            failures.push(format!("{name}: placement {} out of reading order: {a:?} -> {b:?}", i + 1));
        }
    }
    for (i, p) in sheet.placements.iter().enumerate() {
        if p.index != i {
            failures.push(format!("{name}: placement {i} refers to item {}", p.index));
        }
    }

    // Boxes stay inside the margins.
    for p in &sheet.placements {
        let b = p.box_rect(config.label_band);
        if b.x < m || b.y < m || b.right() + m > sheet.width || b.bottom() + m > sheet.height {
            failures.push(format!("{name}: box {b:?} crosses margin of {}x{}", sheet.width, sheet.height));
        }
    }

    // Width bound: only a lone oversized row-start box may pass the ceiling.
    let widest = sheet.placements.iter().map(|p| p.width).max().unwrap_or(0);
    let bound = config.max_row_width.max(widest + 2 * m);
    if sheet.width > bound {
        failures.push(format!("{name}: width {} > bound {bound}", sheet.width));
    }
    for p in &sheet.placements {
        if !sheet.is_row_start(p.index) && p.x + p.width + m > config.max_row_width {
            failures.push(format!("{name}: non-start box {} crosses ceiling", p.index));
        }
    }

    // Row non-overlap, and rows contain their boxes.
    for pair in sheet.rows.windows(2) {
        if pair[0].bottom() > pair[1].y {
            failures.push(format!("{name}: rows overlap: {:?} / {:?}", pair[0], pair[1]));
        }
    }
    for (r, row) in sheet.rows.iter().enumerate() {
        for p in sheet.row_placements(r) {
            if p.row != r || p.y != row.y || p.height + config.label_band > row.height {
                failures.push(format!("{name}: placement {p:?} outside row {r} {row:?}"));
            }
        }
    }

    // No two boxes share a pixel.
    for (i, a) in sheet.placements.iter().enumerate() {
        let ra = a.box_rect(config.label_band);
        for b in &sheet.placements[i + 1..] {
            if ra.intersects(&b.box_rect(config.label_band)) {
                failures.push(format!("{name}: boxes {} and {} intersect", a.index, b.index));
            }
        }
    }
}

#[test]
fn layout_invariants_sweep() {
    let configs = [
        ("default", SheetConfig::default()),
        ("narrow", SheetConfig::default().max_row_width(3500)),
        ("tight", SheetConfig::default().gap(0).margin(0).label_band(0)),
    ];
    let mut failures = vec![];
    let mut total = 0;

    for seed in 0..SEEDS {
        let items = items_for_seed(seed);
        for (label, config) in &configs {
            for scale in SCALES {
                let name = format!("seed {seed} {label} @{scale}");
                let sheet = config.layout(&items, scale);
                check_layout(&name, &items, config, &sheet, &mut failures);

                if config.layout(&items, scale) != sheet {
                    failures.push(format!("{name}: second run differs"));
                }
                total += 1;
            }
        }
    }

    eprintln!("{total} layouts checked, {} failures", failures.len());
    assert!(
        failures.is_empty(),
        "Invariant failures:\n{}",
        failures.join("\n")
    );
}

#[test]
fn height_shrinks_with_scale() {
    let config = SheetConfig::default();
    let mut failures = vec![];

    for seed in 0..SEEDS {
        let items = items_for_seed(seed);
        let heights: Vec<u32> = SCALES.iter().map(|&s| config.layout(&items, s).height).collect();
        if !(heights[2] <= heights[1] && heights[1] <= heights[0]) {
            failures.push(format!("seed {seed}: heights {heights:?}"));
        }
    }

    assert!(failures.is_empty(), "Non-monotonic heights:\n{}", failures.join("\n"));
}

// ---- Fit loop ----

#[test]
fn fit_picks_largest_fitting_step() {
    let mut failures = vec![];

    for seed in 0..SEEDS {
        let items = items_for_seed(seed);
        let fit = Fit::new(6000);
        let outcome = fit.run(&items);
        let name = format!("seed {seed}");

        // Every earlier step must have been too tall.
        let steps = fit.ladder.steps();
        for &earlier in &steps[..outcome.attempts() - 1] {
            let h = fit.config.layout(&items, earlier).height;
            if h <= fit.max_height {
                failures.push(format!("{name}: skipped fitting scale {earlier} ({h})"));
            }
        }

        // Result equals a direct layout at the chosen scale.
        let direct = fit.config.layout(&items, outcome.scale());
        if &direct != outcome.layout() {
            failures.push(format!("{name}: fit layout differs from direct layout"));
        }

        match &outcome {
            FitOutcome::Fitted { layout, .. } if layout.height > fit.max_height => {
                failures.push(format!("{name}: fitted but {} tall", layout.height));
            }
            FitOutcome::Unfittable { layout, attempts, .. } => {
                if *attempts != steps.len() || layout.scale != fit.ladder.last() {
                    failures.push(format!("{name}: gave up early at {}", layout.scale));
                }
                if layout.height <= fit.max_height {
                    failures.push(format!("{name}: unfittable but {} tall", layout.height));
                }
            }
            _ => {}
        }
    }

    assert!(failures.is_empty(), "Fit failures:\n{}", failures.join("\n"));
}

// ---- Scenarios ----

#[test]
fn scenario_single_row() {
    let items = [
        SheetItem::new("1.png", 100, 50).unwrap(),
        SheetItem::new("2.png", 100, 50).unwrap(),
    ];
    let outcome = fit(&items, 8000, &ScaleLadder::default(), &SheetConfig::default());

    assert!(outcome.is_fitted());
    assert_eq!(outcome.attempts(), 1);
    assert_eq!(outcome.layout().size(), Size::new(245, 100));
}

#[test]
fn scenario_forced_wrap() {
    let items = [
        SheetItem::new("a", 5000, 100).unwrap(),
        SheetItem::new("b", 5000, 100).unwrap(),
    ];
    let sheet = layout(&items, 1.0, &SheetConfig::default());

    assert_eq!(sheet.placements[1].x, 15);
    assert_eq!(sheet.placements[1].y, 150);
}

#[test]
fn scenario_tall_column_steps_down() {
    // Narrow ceiling forces one box per row.
    let items: Vec<SheetItem> = (0..30)
        .map(|i| SheetItem::new(format!("{i}"), 200, 300).unwrap())
        .collect();
    let config = SheetConfig::default().max_row_width(300);
    let outcome = Fit::new(8000).config(config).run(&items);

    // Scale 1: 30 * (320 + 15) - 15 + 30 = 10065 > 8000.
    // Scale 0.75: 30 * (245 + 15) - 15 + 30 = 7815.
    assert!(outcome.is_fitted());
    assert_eq!(outcome.scale(), 0.75);
    assert_eq!(outcome.layout().height, 7815);
    assert_eq!(outcome.layout().row_count(), 30);
}
