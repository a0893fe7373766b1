//! Drive a session from an event source

use anyhow::Result;
use log::warn;

use crate::event_source::EventSource;
use crate::session::{Effect, ViewerSession};
use crate::sink::RegionSink;

/// Counters for one replay run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    /// Events dropped because no page was loaded yet
    pub skipped: usize,
    pub saved: usize,
}

/// Feed every event from `source` into `session`, in order.
///
/// Geometry errors are logged and the event is dropped; source and sink
/// errors abort the run.
pub fn replay(
    source: &mut dyn EventSource,
    session: &mut ViewerSession,
    sink: &mut dyn RegionSink,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    while let Some(event) = source.next_event()? {
        let effects = match session.apply(event.clone()) {
            Ok(effects) => effects,
            Err(e) => {
                warn!("Ignoring {event:?}: {e}");
                summary.skipped += 1;
                continue;
            }
        };
        summary.applied += 1;

        for effect in effects {
            if let Effect::RegionSaved(region) = effect {
                sink.save(session.current_page(), &region)?;
                summary.saved += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::NormalizedRegion;
    use crate::test_utils::test_helpers::TestScenarioBuilder;

    #[test]
    fn gestures_before_load_are_skipped() {
        let mut source = TestScenarioBuilder::new()
            .layout(400.0, 800.0)
            .drag((1.0, 1.0), &[(2.0, 2.0)])
            .save()
            .load_page(400.0, 800.0)
            .drag((100.0, 200.0), &[(300.0, 600.0)])
            .save()
            .build();
        let mut session = ViewerSession::new();
        let mut saved: Vec<NormalizedRegion> = Vec::new();

        let summary = replay(&mut source, &mut session, &mut saved).unwrap();

        // start and save fail before the load; the stray move and release are no-ops
        assert_eq!(
            summary,
            ReplaySummary {
                applied: 8,
                skipped: 2,
                saved: 1,
            }
        );
        assert_eq!(
            saved,
            vec![NormalizedRegion {
                x: 0.25,
                y: 0.25,
                width: 0.5,
                height: 0.5,
            }]
        );
    }
}
