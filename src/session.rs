use std::collections::VecDeque;
use std::time::Duration;

use color_eyre::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::Instant;

use crate::app::App;
use crate::config::Config;
use crate::event::InputEvent;
use crate::system::kill::{SignalTerminator, Terminator};
use crate::system::logical_cores;
use crate::system::process::{ProcessSampler, ProcessSource};
use crate::system::snapshot::{Collector, Sample};
use crate::system::sources::source_from_config;
use crate::ui;
use crate::ui::render::render;
use crate::ui::theme::Theme;

/// The refresh loop. Runs on one thread: input is drained without blocking
/// between frames and after every wait slice.
pub struct Session {
    app: App,
    collector: Collector<Box<dyn ProcessSource>>,
    terminator: Box<dyn Terminator>,
    theme: Theme,
    refresh: Duration,
    slice: Duration,
    last_sample: Option<Sample>,
    pending: VecDeque<String>,
    input_closed: bool,
    frames_rendered: usize,
}

impl Session {
    pub fn new(
        app: App,
        collector: Collector<Box<dyn ProcessSource>>,
        terminator: Box<dyn Terminator>,
        theme: Theme,
        refresh: Duration,
        slice: Duration,
    ) -> Self {
        Session {
            app,
            collector,
            terminator,
            theme,
            refresh,
            slice: slice.min(refresh).max(Duration::from_millis(1)),
            last_sample: None,
            pending: VecDeque::new(),
            input_closed: false,
            frames_rendered: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let sampler = ProcessSampler::new(
            source_from_config(&config.sampler.provider),
            logical_cores(),
            config.sampler.min_candidates,
        );
        let collector = Collector::new(config.sources.counter_sources(), sampler);
        Session::new(
            App::new(config),
            collector,
            Box::new(SignalTerminator),
            Theme::from_config(&config.colors),
            config.general.refresh_interval(),
            config.general.poll_slice(),
        )
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    pub async fn run<B>(
        &mut self,
        terminal: &mut Terminal<B>,
        input: &mut UnboundedReceiver<InputEvent>,
    ) -> Result<()>
    where
        B: Backend,
        B::Error: std::error::Error + Send + Sync + 'static,
    {
        tracing::info!(
            refresh_ms = self.refresh.as_millis() as u64,
            slice_ms = self.slice.as_millis() as u64,
            "session started"
        );

        while self.app.running {
            self.app.clear_status();
            self.collect_input(input);
            self.apply_pending();
            if !self.app.running {
                break;
            }

            self.last_sample = Some(self.collector.sample(self.app.top_n));
            self.draw(terminal)?;
            self.frames_rendered += 1;

            self.wait(terminal, input).await?;
        }

        tracing::info!(frames = self.frames_rendered, "session ended");
        Ok(())
    }

    /// Sleeps out the refresh interval in slices. Returns early once a
    /// complete line is waiting so it is applied on the next frame.
    async fn wait<B>(
        &mut self,
        terminal: &mut Terminal<B>,
        input: &mut UnboundedReceiver<InputEvent>,
    ) -> Result<()>
    where
        B: Backend,
        B::Error: std::error::Error + Send + Sync + 'static,
    {
        let deadline = Instant::now() + self.refresh;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            tokio::time::sleep(self.slice.min(deadline - now)).await;

            if self.collect_input(input) {
                self.draw(terminal)?;
            }
            if !self.pending.is_empty() {
                return Ok(());
            }
        }
    }

    /// Drains everything received so far. Returns whether the screen needs
    /// a redraw for edits or a resize.
    fn collect_input(&mut self, input: &mut UnboundedReceiver<InputEvent>) -> bool {
        let mut redraw = false;
        loop {
            match input.try_recv() {
                Ok(InputEvent::Line(line)) => {
                    self.app.input_line.clear();
                    self.pending.push_back(line);
                }
                Ok(InputEvent::Edit(text)) => {
                    self.app.input_line = text;
                    redraw = true;
                }
                Ok(InputEvent::Resize) => redraw = true,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.input_closed {
                        tracing::warn!("input channel closed, commands will no longer arrive");
                        self.input_closed = true;
                    }
                    break;
                }
            }
        }
        redraw
    }

    /// Applies queued lines in arrival order. Anything after a quit is dropped.
    fn apply_pending(&mut self) {
        while let Some(line) = self.pending.pop_front() {
            self.app.interpret(&line, &mut *self.terminator);
            if !self.app.running {
                self.pending.clear();
                break;
            }
        }
    }

    fn draw<B>(&self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B: Backend,
        B::Error: std::error::Error + Send + Sync + 'static,
    {
        let Some(sample) = &self.last_sample else {
            return Ok(());
        };
        let text = render(&self.app, sample, &self.theme);
        terminal.draw(|frame| ui::draw(frame, text))?;
        Ok(())
    }
}
