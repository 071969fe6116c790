//! Progress and prompt callbacks used by long-running workspace operations.
//!
//! The engine only depends on [`ProgressSink`]; whichever front-end is in use
//! supplies the implementation. [`LogProgress`] forwards everything to the `log`
//! facade and is what the CLI uses.

/// Capability interface the scanner reports busy state through
pub trait ProgressSink {
    fn begin_process(&mut self, text: &str);

    /// Called periodically while a process runs. Front-ends use it to keep their
    /// event loop alive and to flip the cancellation flag.
    fn update_process(&mut self, text: &str);

    fn end_process(&mut self);

    /// Ask the user a yes/no question. Non-interactive sinks answer with `default`.
    fn query(&mut self, _title: &str, _question: &str, default: bool) -> bool {
        default
    }
}

/// Sink that writes process state to the log
#[derive(Debug, Default)]
pub struct LogProgress {
    current: Option<String>,
    updates: usize,
}

impl ProgressSink for LogProgress {
    fn begin_process(&mut self, text: &str) {
        log::info!("{text}");
        self.current = Some(text.to_string());
        self.updates = 0;
    }

    fn update_process(&mut self, text: &str) {
        self.updates += 1;
        log::debug!("{text}");
    }

    fn end_process(&mut self) {
        if let Some(text) = self.current.take() {
            log::debug!("Finished '{}' after {} updates", text, self.updates);
        }
    }
}

/// Sink that ignores everything
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn begin_process(&mut self, _text: &str) {}
    fn update_process(&mut self, _text: &str) {}
    fn end_process(&mut self) {}
}
