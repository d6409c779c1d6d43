//! CHUNITHM single-chart rating.
//!
//! The curve is piecewise linear in the achieved score with its offsets given
//! in hundredths relative to `internal level * 100`. Results are floored to two
//! decimals, never rounded, so they line up with the published rating tables.

pub const MAX_SCORE: u32 = 1_010_000;

/// Score breakpoints, highest first. 1009000 and 1010000 share an offset.
const BREAKPOINTS: [u32; 11] = [
    1_010_000, 1_009_000, 1_007_500, 1_005_000, 1_000_000, 975_000, 925_000, 900_000, 800_000,
    500_000, 0,
];

fn offsets(c: f64) -> [f64; 11] {
    [
        c + 215.0,
        c + 215.0,
        c + 200.0,
        c + 150.0,
        c + 100.0,
        c,
        c - 300.0,
        c - 500.0,
        (c - 500.0) / 2.0,
        0.0,
        0.0,
    ]
}

/// Rating in hundredths (`1550` for 15.50).
pub fn rating_hundredths(level: f64, score: u32) -> u32 {
    let c = level * 100.0;
    let points = offsets(c);

    // first breakpoint the score strictly exceeds, scanning from the top
    let Some(p) = BREAKPOINTS.iter().position(|&bp| score > bp) else {
        return 0;
    };

    let ret = if p == 0 {
        points[0]
    } else {
        let (prev_x, prev_y) = (f64::from(BREAKPOINTS[p - 1]), points[p - 1]);
        let (cur_x, cur_y) = (f64::from(BREAKPOINTS[p]), points[p]);
        cur_y + (prev_y - cur_y) / (prev_x - cur_x) * (f64::from(score) - cur_x)
    };

    let floored = ret.max(0.0).floor();
    if floored.is_finite() {
        floored as u32
    } else {
        0
    }
}

pub fn rating(level: f64, score: u32) -> f64 {
    f64::from(rating_hundredths(level, score)) / 100.0
}

/// Two fixed decimals, e.g. `15.50`.
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_offsets() {
        assert_eq!(rating_hundredths(12.0, 800_000), 350);
        assert_eq!(rating_hundredths(12.0, 900_000), 700);
        assert_eq!(rating_hundredths(12.0, 925_000), 900);
        assert_eq!(rating_hundredths(12.0, 975_000), 1200);
        assert_eq!(rating_hundredths(12.5, 1_000_000), 1350);
        assert_eq!(rating_hundredths(13.2, 1_005_000), 1470);
    }

    #[test]
    fn interpolates_between_breakpoints() {
        assert_eq!(rating_hundredths(12.0, 850_000), 525);
        assert_eq!(rating_hundredths(12.5, 990_000), 1310);
        assert_eq!(rating_hundredths(14.4, 1_008_000), 1645);
        assert_eq!(rating_hundredths(14.1, 1_007_400), 1608);
    }

    #[test]
    fn above_max_score_is_clamped() {
        assert_eq!(rating_hundredths(13.5, 1_012_000), 1565);
        assert_eq!(rating_hundredths(13.5, u32::MAX), 1565);
    }

    #[test]
    fn low_levels_never_go_negative() {
        assert_eq!(rating_hundredths(1.0, 850_000), 0);
        assert_eq!(rating_hundredths(1.0, 950_000), 0);
        assert_eq!(rating_hundredths(0.0, 0), 0);
    }

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_rating(15.5), "15.50");
        assert_eq!(format_rating(11.1), "11.10");
        assert_eq!(format_rating(0.0), "0.00");
    }
}
