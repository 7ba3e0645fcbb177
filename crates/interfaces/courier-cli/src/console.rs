use courier_app_core::{RenderSink, RenderUpdate};
use indicatif::ProgressBar;

/// Paints render updates onto the terminal: audit lines scroll above the
/// spinner, node transitions replace its message.
pub struct ConsoleSink {
    pb: ProgressBar,
    lines: Vec<String>,
}

impl ConsoleSink {
    pub fn new(pb: ProgressBar) -> Self {
        Self {
            pb,
            lines: Vec::new(),
        }
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl RenderSink for ConsoleSink {
    fn paint(&mut self, update: &RenderUpdate) {
        match update {
            RenderUpdate::Cleared => self.lines.clear(),
            RenderUpdate::Node {
                sink,
                status,
                label,
            } => {
                let node = sink.trim_start_matches("node-");
                match label {
                    Some(label) => self.pb.set_message(format!("{node}: {label}")),
                    None => self.pb.set_message(format!("{node}: {status}")),
                }
            }
            RenderUpdate::Queue {
                count_sink, depth, ..
            } => {
                tracing::debug!(sink = %count_sink, depth, "queue depth");
            }
            RenderUpdate::Dlq { count, .. } => {
                tracing::debug!(count, "dead letters");
            }
            RenderUpdate::AuditAppended { entry, .. } => {
                let line = entry.display_line();
                self.pb.println(&line);
                self.lines.push(line);
            }
        }
    }
}
