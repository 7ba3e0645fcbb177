use std::collections::HashMap;
use std::time::{Duration, Instant};

use courier_app_core::{RenderSink, RenderUpdate};

const GLOW: Duration = Duration::from_millis(700);

/// Remembers when each sink was last repainted so the dashboard can pulse
/// whatever the latest event touched.
#[derive(Default)]
pub struct PulseSurface {
    touched: HashMap<String, Instant>,
}

impl PulseSurface {
    /// 1.0 right after a repaint, fading to 0.0.
    pub fn glow(&self, sink: &str) -> f32 {
        self.touched
            .get(sink)
            .map(|at| 1.0 - (at.elapsed().as_secs_f32() / GLOW.as_secs_f32()).min(1.0))
            .unwrap_or(0.0)
    }

    pub fn is_animating(&self) -> bool {
        self.touched.values().any(|at| at.elapsed() < GLOW)
    }

    fn touch(&mut self, sink: &str) {
        self.touched.insert(sink.to_string(), Instant::now());
    }
}

impl RenderSink for PulseSurface {
    fn paint(&mut self, update: &RenderUpdate) {
        match update {
            RenderUpdate::Cleared => self.touched.clear(),
            RenderUpdate::Node { sink, .. } => self.touch(sink),
            RenderUpdate::Queue {
                count_sink,
                bar_sink,
                ..
            } => {
                self.touch(count_sink);
                self.touch(bar_sink);
            }
            RenderUpdate::Dlq { sink, .. } => self.touch(sink),
            RenderUpdate::AuditAppended { sink, .. } => self.touch(sink),
        }
    }
}
