//! Pure timeline planning.
//!
//! Turns the sparse interval-based slide events into an ordered list of
//! segment plans with concrete frame ranges. All the boundary arithmetic
//! lives here, away from any subprocess or filesystem concern, so it can
//! be tested exhaustively.

use replaymux_parser::SlideEvent;

/// What a segment is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentSource {
    /// A still slide image, copied once per frame. Path is the image href
    /// relative to the session root.
    Still(String),
    /// A sub-range of the screen-share stream.
    Deskshare,
}

/// One planned segment of the slide video.
///
/// Frame indices are global (session-relative); `frame_end` is exclusive.
/// The second interval `[start_secs, end_secs)` is only meaningful for
/// deskshare segments, where extraction is done in the time domain.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPlan {
    /// Event label; the segment file is named after it.
    pub label: String,
    pub source: SegmentSource,
    pub frame_start: u64,
    pub frame_end: u64,
    pub start_secs: f64,
    pub end_secs: f64,
}

impl SegmentPlan {
    /// Number of frames this segment covers.
    pub fn frame_count(&self) -> u64 {
        self.frame_end - self.frame_start
    }
}

/// Plan the segment list for a session.
///
/// Per event: `frame_start = round(in × rate)`, `frame_end =
/// min(round(out × rate), ceil(duration × rate))`. An event starting at or
/// beyond the session duration, or left empty by clamping, contributes
/// nothing. Deskshare events are clamped in the time domain instead, since
/// they are extracted by seconds, not frame copies.
///
/// Gaps in frame coverage between consecutive segments are closed by
/// extending the earlier segment (hold-last-slide policy).
pub fn plan(events: &[SlideEvent], duration_secs: f64, frame_rate: u32) -> Vec<SegmentPlan> {
    let rate = f64::from(frame_rate);
    let duration_frames = (duration_secs * rate).ceil() as u64;

    let mut plans: Vec<SegmentPlan> = Vec::with_capacity(events.len());

    for event in events {
        let frame_start = (event.in_secs * rate).round() as u64;
        let frame_end = ((event.out_secs * rate).round() as u64).min(duration_frames);

        if event.is_deskshare() {
            let start_secs = event.in_secs.round();
            let end_secs = event.out_secs.round().min(duration_secs.ceil());
            if end_secs <= start_secs {
                tracing::debug!(label = %event.id, "deskshare event outside session, dropped");
                continue;
            }
            plans.push(SegmentPlan {
                label: event.id.clone(),
                source: SegmentSource::Deskshare,
                frame_start,
                frame_end,
                start_secs,
                end_secs,
            });
            continue;
        }

        if frame_start >= duration_frames {
            tracing::debug!(
                label = %event.id,
                frame_start,
                duration_frames,
                "event starts past session end, dropped"
            );
            continue;
        }
        if frame_end <= frame_start {
            tracing::debug!(label = %event.id, "event covers zero frames, dropped");
            continue;
        }

        plans.push(SegmentPlan {
            label: event.id.clone(),
            source: SegmentSource::Still(event.href.clone()),
            frame_start,
            frame_end,
            start_secs: event.in_secs,
            end_secs: event.out_secs,
        });
    }

    close_gaps(&mut plans, rate);

    plans
}

/// Hold-last-slide: extend each segment up to its successor's start so the
/// concatenated video has no missing stretches.
fn close_gaps(plans: &mut [SegmentPlan], rate: f64) {
    for i in 1..plans.len() {
        let next_start = plans[i].frame_start;
        let prev = &mut plans[i - 1];
        if next_start > prev.frame_end {
            let extra_frames = next_start - prev.frame_end;
            tracing::debug!(
                label = %prev.label,
                extra_frames,
                "extending segment over uncovered gap"
            );
            prev.frame_end = next_start;
            prev.end_secs += extra_frames as f64 / rate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, href: &str, in_secs: f64, out_secs: f64) -> SlideEvent {
        SlideEvent {
            id: id.to_string(),
            href: href.to_string(),
            in_secs,
            out_secs,
        }
    }

    fn slide(id: &str, in_secs: f64, out_secs: f64) -> SlideEvent {
        event(id, "presentation/d/slide-1.png", in_secs, out_secs)
    }

    #[test]
    fn test_frame_ranges_are_monotone_and_clamped() {
        let events = vec![slide("image1", 0.0, 4.2), slide("image2", 4.2, 99.0)];
        let plans = plan(&events, 10.0, 1);

        assert_eq!(plans.len(), 2);
        for p in &plans {
            assert!(p.frame_start <= p.frame_end);
            assert!(p.frame_end <= 10);
        }
        assert_eq!(plans[0].frame_start, 0);
        assert_eq!(plans[0].frame_end, 4);
        assert_eq!(plans[1].frame_end, 10);
    }

    #[test]
    fn test_event_past_session_end_is_dropped() {
        // duration=10s, rate=1, event in=15,out=20 => no segment.
        let plans = plan(&[slide("image1", 15.0, 20.0)], 10.0, 1);
        assert!(plans.is_empty());
    }

    #[test]
    fn test_zero_frame_event_is_dropped() {
        let plans = plan(&[slide("image1", 3.1, 3.2)], 10.0, 1);
        assert!(plans.is_empty());
    }

    #[test]
    fn test_frame_math_scales_with_rate() {
        let plans = plan(&[slide("image1", 1.5, 2.5)], 10.0, 24);
        assert_eq!(plans[0].frame_start, 36);
        assert_eq!(plans[0].frame_end, 60);
        assert_eq!(plans[0].frame_count(), 24);
    }

    #[test]
    fn test_deskshare_event_becomes_stream_extract() {
        let events = vec![event(
            "image2",
            "presentation/deskshare/deskshare.png",
            5.0,
            12.0,
        )];
        let plans = plan(&events, 30.0, 1);

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].source, SegmentSource::Deskshare);
        assert_eq!(plans[0].start_secs, 5.0);
        assert_eq!(plans[0].end_secs, 12.0);
    }

    #[test]
    fn test_deskshare_end_clamped_to_duration() {
        let events = vec![event("image2", "x/deskshare.png", 5.0, 40.0)];
        let plans = plan(&events, 30.0, 1);
        assert_eq!(plans[0].end_secs, 30.0);
    }

    #[test]
    fn test_deskshare_fully_past_end_is_dropped() {
        let events = vec![event("image2", "x/deskshare.png", 35.0, 40.0)];
        assert!(plan(&events, 30.0, 1).is_empty());
    }

    #[test]
    fn test_gap_extends_previous_segment() {
        let events = vec![slide("image1", 0.0, 3.0), slide("image2", 7.0, 10.0)];
        let plans = plan(&events, 10.0, 1);

        assert_eq!(plans[0].frame_end, 7);
        assert_eq!(plans[0].end_secs, 7.0);
        assert_eq!(plans[1].frame_start, 7);
    }

    #[test]
    fn test_contiguous_segments_untouched() {
        let events = vec![slide("image1", 0.0, 5.0), slide("image2", 5.0, 10.0)];
        let plans = plan(&events, 10.0, 1);
        assert_eq!(plans[0].frame_end, 5);
        assert_eq!(plans[0].end_secs, 5.0);
    }
}
