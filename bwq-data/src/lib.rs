//! Data processing for the forecast chart.
//!
//! This crate turns the valid forecast series into the cumulative
//! animation frames and the axis/band configuration the D3 chart draws.

/// Cumulative animation frames over a series.
pub mod frames {
    use bwq_core::forecast::SeriesPoint;
    use serde::Serialize;
    use std::num::NonZeroUsize;

    /// Number of points revealed per animation frame.
    pub const DEFAULT_FRAME_STEP: NonZeroUsize = match NonZeroUsize::new(3) {
        Some(step) => step,
        None => panic!("frame step must be non-zero"),
    };

    /// Slider label format of a frame's reveal time.
    pub const FRAME_LABEL_FORMAT: &str = "%m-%d %H:%M";

    /// One animation frame: the prefix of the series visible at `index`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Frame<'a, T> {
        pub index: usize,
        pub points: &'a [T],
    }

    /// A series point tagged with the frame it is drawn in.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct FrameRow {
        pub frame: usize,
        pub timestamp: chrono::NaiveDateTime,
        pub value: f64,
    }

    /// Positions at which a new frame starts: `0, step, 2*step, ...` below `n`.
    fn reveal_positions(n: usize, step: NonZeroUsize) -> impl Iterator<Item = usize> {
        (0..n).step_by(step.get())
    }

    /// Split a series into cumulative frames.
    ///
    /// Frame `k` holds `series[0..=k*step]`, so there are `ceil(n / step)`
    /// frames. An empty or single-point series yields exactly one frame.
    pub fn build_frames<T>(series: &[T], step: NonZeroUsize) -> Vec<Frame<'_, T>> {
        if series.len() <= 1 {
            return vec![Frame {
                index: 0,
                points: series,
            }];
        }
        reveal_positions(series.len(), step)
            .enumerate()
            .map(|(index, end)| Frame {
                index,
                points: &series[..=end],
            })
            .collect()
    }

    /// Flatten frames into rows, each tagged with its frame index.
    pub fn frame_rows(frames: &[Frame<'_, SeriesPoint>]) -> Vec<FrameRow> {
        frames
            .iter()
            .flat_map(|frame| {
                frame.points.iter().map(move |p| FrameRow {
                    frame: frame.index,
                    timestamp: p.timestamp,
                    value: p.value,
                })
            })
            .collect()
    }

    /// Slider label of every frame: the time of the point it reveals.
    /// Empty for an empty series.
    pub fn frame_labels(series: &[SeriesPoint], step: NonZeroUsize) -> Vec<String> {
        reveal_positions(series.len(), step)
            .map(|i| series[i].timestamp.format(FRAME_LABEL_FORMAT).to_string())
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        fn step(n: usize) -> NonZeroUsize {
            NonZeroUsize::new(n).unwrap()
        }

        fn series(n: usize) -> Vec<SeriesPoint> {
            let start = NaiveDate::from_ymd_opt(2024, 11, 4)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            (0..n)
                .map(|i| SeriesPoint {
                    timestamp: start + chrono::Duration::minutes(10 * i as i64),
                    value: i as f64,
                })
                .collect()
        }

        #[test]
        fn seven_points_step_three() {
            let s = series(7);
            let frames = build_frames(&s, step(3));
            let lens: Vec<usize> = frames.iter().map(|f| f.points.len()).collect();
            assert_eq!(lens, vec![1, 4, 7]);
            assert_eq!(frames[1].points, &s[0..=3]);
            assert_eq!(frames[2].index, 2);
        }

        #[test]
        fn trailing_points_past_the_last_step_are_not_revealed() {
            let s = series(8);
            let frames = build_frames(&s, step(3));
            assert_eq!(frames.len(), 3);
            assert_eq!(frames[2].points, &s[0..=6]);
        }

        #[test]
        fn frame_count_is_ceiling_of_n_over_step() {
            for n in 2..20 {
                for k in 1..6 {
                    let s = series(n);
                    assert_eq!(build_frames(&s, step(k)).len(), (n + k - 1) / k);
                }
            }
        }

        #[test]
        fn empty_and_single_point_give_one_frame() {
            let empty: Vec<SeriesPoint> = Vec::new();
            let frames = build_frames(&empty, DEFAULT_FRAME_STEP);
            assert_eq!(frames.len(), 1);
            assert!(frames[0].points.is_empty());

            let one = series(1);
            let frames = build_frames(&one, DEFAULT_FRAME_STEP);
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].points.len(), 1);
        }

        #[test]
        fn frames_are_growing_prefixes() {
            let s = series(11);
            let frames = build_frames(&s, step(4));
            for pair in frames.windows(2) {
                assert!(pair[0].points.len() < pair[1].points.len());
                assert_eq!(pair[0].points, &pair[1].points[..pair[0].points.len()]);
            }
        }

        #[test]
        fn rows_are_tagged_with_their_frame() {
            let s = series(7);
            let frames = build_frames(&s, step(3));
            let rows = frame_rows(&frames);
            assert_eq!(rows.len(), 1 + 4 + 7);
            assert!(rows[..1].iter().all(|r| r.frame == 0));
            assert!(rows[1..5].iter().all(|r| r.frame == 1));
            assert!(rows[5..].iter().all(|r| r.frame == 2));
            assert_eq!(rows.last().unwrap().value, 6.0);
        }

        #[test]
        fn labels_follow_reveal_positions() {
            let s = series(7);
            let labels = frame_labels(&s, step(3));
            assert_eq!(labels, vec!["11-04 00:00", "11-04 00:30", "11-04 01:00"]);
            assert!(frame_labels(&[], step(3)).is_empty());
        }

        #[test]
        fn step_one_reveals_one_point_per_frame() {
            let s = series(5);
            let frames = build_frames(&s, step(1));
            assert_eq!(frames.len(), 5);
            assert!(frames.iter().all(|f| f.points.len() == f.index + 1));
        }
    }
}

/// Axis ranges and risk bands of the forecast chart.
pub mod chart {
    use crate::frames::{build_frames, frame_labels, frame_rows, FrameRow};
    use bwq_core::forecast::SeriesPoint;
    use bwq_core::risk::{legend, RiskTier};
    use chrono::NaiveDateTime;
    use serde::Serialize;
    use std::num::NonZeroUsize;

    /// The y-axis always reaches at least this far, so the danger band is
    /// visible even on a calm week.
    pub const MIN_Y_MAX: f64 = 10.0;

    /// A horizontal background band for one risk tier.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Band {
        pub tier: RiskTier,
        pub lower: f64,
        pub upper: f64,
        pub color: &'static str,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct ChartConfig {
        pub x_start: Option<NaiveDateTime>,
        pub x_end: Option<NaiveDateTime>,
        pub y_max: f64,
        pub bands: Vec<Band>,
        /// Tier boundaries drawn as dashed lines.
        pub thresholds: Vec<f64>,
    }

    impl ChartConfig {
        pub fn for_series(series: &[SeriesPoint]) -> Self {
            let series_max = series
                .iter()
                .map(|p| p.value)
                .fold(f64::NEG_INFINITY, f64::max);
            let y_max = series_max.max(MIN_Y_MAX);

            let entries = legend();
            let bands = entries
                .iter()
                .filter(|e| e.lower < y_max)
                .map(|e| Band {
                    tier: e.tier,
                    lower: e.lower,
                    upper: e.upper.map_or(y_max, |u| u.min(y_max)),
                    color: e.tier.band_color(),
                })
                .collect();
            let thresholds = entries
                .iter()
                .filter_map(|e| e.upper)
                .filter(|u| *u < y_max)
                .collect();

            Self {
                x_start: series.first().map(|p| p.timestamp),
                x_end: series.last().map(|p| p.timestamp),
                y_max,
                bands,
                thresholds,
            }
        }
    }

    /// Everything the animated chart needs, ready for JSON.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct AnimationPayload {
        pub frame_count: usize,
        pub rows: Vec<FrameRow>,
        pub labels: Vec<String>,
        pub config: ChartConfig,
    }

    impl AnimationPayload {
        pub fn new(series: &[SeriesPoint], step: NonZeroUsize) -> Self {
            let frames = build_frames(series, step);
            let payload = Self {
                frame_count: frames.len(),
                rows: frame_rows(&frames),
                labels: frame_labels(series, step),
                config: ChartConfig::for_series(series),
            };
            log::info!(
                "[BWQ] frames: {} points -> {} frames ({} rows)",
                series.len(),
                payload.frame_count,
                payload.rows.len()
            );
            payload
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::frames::DEFAULT_FRAME_STEP;
        use chrono::NaiveDate;

        fn series(values: &[f64]) -> Vec<SeriesPoint> {
            let start = NaiveDate::from_ymd_opt(2024, 11, 4)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            values
                .iter()
                .enumerate()
                .map(|(i, v)| SeriesPoint {
                    timestamp: start + chrono::Duration::hours(i as i64),
                    value: *v,
                })
                .collect()
        }

        #[test]
        fn y_axis_has_a_floor_of_ten() {
            let config = ChartConfig::for_series(&series(&[3.0, 9.0, 5.0]));
            assert_eq!(config.y_max, 10.0);
            let config = ChartConfig::for_series(&series(&[3.0, 12.5]));
            assert_eq!(config.y_max, 12.5);
        }

        #[test]
        fn bands_cover_the_axis_by_tier() {
            let config = ChartConfig::for_series(&series(&[3.0, 12.5]));
            let spans: Vec<(RiskTier, f64, f64)> = config
                .bands
                .iter()
                .map(|b| (b.tier, b.lower, b.upper))
                .collect();
            assert_eq!(
                spans,
                vec![
                    (RiskTier::Good, 0.0, 4.0),
                    (RiskTier::Caution, 4.0, 8.0),
                    (RiskTier::Danger, 8.0, 12.5),
                ]
            );
            assert_eq!(config.bands[0].color, "#d0f0c0");
            assert_eq!(config.bands[2].color, "#ffc9c9");
            assert_eq!(config.thresholds, vec![4.0, 8.0]);
        }

        #[test]
        fn x_range_spans_the_series() {
            let s = series(&[1.0, 2.0, 3.0]);
            let config = ChartConfig::for_series(&s);
            assert_eq!(config.x_start, Some(s[0].timestamp));
            assert_eq!(config.x_end, Some(s[2].timestamp));
        }

        #[test]
        fn empty_series_still_has_axes() {
            let config = ChartConfig::for_series(&[]);
            assert_eq!(config.x_start, None);
            assert_eq!(config.y_max, MIN_Y_MAX);
            assert_eq!(config.bands.len(), 3);
        }

        #[test]
        fn payload_combines_frames_labels_and_config() {
            let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
            let payload = AnimationPayload::new(&s, DEFAULT_FRAME_STEP);
            assert_eq!(payload.frame_count, 3);
            assert_eq!(payload.labels.len(), 3);
            assert_eq!(payload.rows.len(), 12);
            assert_eq!(payload.config.y_max, 10.0);
        }
    }
}
