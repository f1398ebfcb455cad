//! Callbacks fired by the decoder.

use std::io::{self, Write};

use console::style;

use super::events::ProgressEvent;

/// Receiver of decoded stream events.
pub trait StreamHandler {
    /// Incremental answer text.
    fn on_delta(&mut self, delta: &str);

    /// The answer is complete (`message_complete` or `outputs`).
    fn on_complete(&mut self);

    /// Verbose progress report. Only called when verbose mode is on.
    fn on_progress(&mut self, _event: &ProgressEvent) {}
}

/// Adapts a pair of closures into a [`StreamHandler`].
pub struct CallbackHandler<D, C>
where
    D: FnMut(&str),
    C: FnMut(),
{
    on_delta: D,
    on_complete: C,
}

impl<D, C> CallbackHandler<D, C>
where
    D: FnMut(&str),
    C: FnMut(),
{
    pub const fn new(on_delta: D, on_complete: C) -> Self {
        Self {
            on_delta,
            on_complete,
        }
    }
}

impl<D, C> StreamHandler for CallbackHandler<D, C>
where
    D: FnMut(&str),
    C: FnMut(),
{
    fn on_delta(&mut self, delta: &str) {
        (self.on_delta)(delta);
    }

    fn on_complete(&mut self) {
        (self.on_complete)();
    }
}

/// Prints answer text to one writer and progress lines to another.
pub struct TerminalRenderer<O: Write, P: Write> {
    out: O,
    progress: P,
    /// Whether anything has been written to `out` since the last completion.
    pending_line: bool,
}

impl TerminalRenderer<io::Stdout, io::Stderr> {
    /// Answer on stdout, progress on stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, P: Write> TerminalRenderer<O, P> {
    pub const fn new(out: O, progress: P) -> Self {
        Self {
            out,
            progress,
            pending_line: false,
        }
    }

    /// Terminate a dangling answer line, e.g. after a stream that ended without completion.
    pub fn finish(&mut self) {
        if self.pending_line {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.pending_line = false;
        }
    }

    pub fn into_inner(self) -> (O, P) {
        (self.out, self.progress)
    }
}

impl<O: Write, P: Write> StreamHandler for TerminalRenderer<O, P> {
    fn on_delta(&mut self, delta: &str) {
        // Terminal output is best effort; a closed pipe must not abort decoding.
        let _ = self.out.write_all(delta.as_bytes());
        let _ = self.out.flush();
        self.pending_line = true;
    }

    fn on_complete(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
        self.pending_line = false;
    }

    fn on_progress(&mut self, event: &ProgressEvent) {
        if event.opens_block() {
            let _ = writeln!(self.progress);
        }
        let _ = writeln!(self.progress, "  {}", style(event).dim());
    }
}
