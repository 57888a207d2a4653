use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use rand::Rng;
use tracing::debug;
use tracing::info;

use crate::engine::Engine;
use crate::events::AppEvent;
use crate::events::EngineEvent;
use crate::events::Event;
use crate::io;
use crate::render::Render;

/// Cancellation token shared between the driver loop and whoever wants it to stop.
///
/// The driver only looks at it between generations, so a stop never interrupts a step.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Somewhere events come from
pub trait EventSource {
    /// Wait at most `timeout` for the next event. `Ok(None)` means nothing relevant happened.
    fn next_event(&mut self, timeout: Duration) -> anyhow::Result<Option<Event>>;
}

/// Pumps frames: draw the current generation, wait one interval, step.
pub struct Driver<G> {
    /// Time between frames
    interval: Duration,

    /// Stop after this many steps
    generation_limit: Option<u64>,

    paused: bool,

    /// Used to reseed the engine on request
    rng: G,
}

impl<G: Rng> Driver<G> {
    pub fn new(interval: Duration, rng: G) -> Self {
        Self {
            interval,
            generation_limit: None,
            paused: false,
            rng,
        }
    }

    pub fn with_generation_limit(mut self, limit: Option<u64>) -> Self {
        self.generation_limit = limit;
        self
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Run until `stop` is tripped or the generation limit is reached. Returns the number of
    /// steps taken.
    ///
    /// Once a stop is observed, the engine is never stepped again.
    pub fn run<R, E, W>(
        &mut self,
        engine: &mut Engine,
        renderer: &mut R,
        events: &mut E,
        out: &mut W,
        stop: &StopToken,
    ) -> anyhow::Result<u64>
    where
        R: Render + ?Sized,
        E: EventSource + ?Sized,
        W: Write,
    {
        let mut stepped = 0;

        loop {
            if stop.is_stopped() {
                break;
            }

            let status = self.status_line(engine);
            let frame = renderer.render(engine.current());
            io::draw_frame(out, frame, &status).context("Failed to draw frame")?;

            if self.generation_limit.is_some_and(|limit| stepped >= limit) {
                info!(stepped, "generation limit reached");
                break;
            }

            self.wait(engine, events, stop)
                .context("Failed to wait for the next frame")?;

            if stop.is_stopped() {
                break;
            }

            if self.paused {
                continue;
            }

            engine.step();
            stepped += 1;
        }

        Ok(stepped)
    }

    /// Sit out one interval, handling any events that arrive in the meantime. Events are
    /// polled at least once, even with a zero interval.
    fn wait<E>(&mut self, engine: &mut Engine, events: &mut E, stop: &StopToken) -> anyhow::Result<()>
    where
        E: EventSource + ?Sized,
    {
        let deadline = Instant::now() + self.interval;

        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());

            if let Some(event) = events.next_event(timeout)? {
                self.handle(event, engine, stop);
            }

            if stop.is_stopped() || Instant::now() >= deadline {
                return Ok(());
            }
        }
    }

    fn handle(&mut self, event: Event, engine: &mut Engine, stop: &StopToken) {
        match event {
            Event::AppEvent(AppEvent::Exit) => {
                info!(generation = engine.generation(), "exit requested");
                stop.stop();
            }
            Event::AppEvent(AppEvent::TogglePause) => {
                self.paused = !self.paused;
                info!(paused = self.paused, "toggled pause");
            }
            Event::AppEvent(AppEvent::Resize { cols, rows }) => {
                debug!(cols, rows, "terminal resized");
            }
            Event::EngineEvent(EngineEvent::Reseed) => {
                engine.reseed(&mut self.rng);
                info!(population = engine.current().population(), "reseeded");
            }
        }
    }

    fn status_line(&self, engine: &Engine) -> String {
        let paused = if self.paused { " | paused" } else { "" };

        format!(
            "generation {} | population {} | {}{paused} | p pause, r reseed, q or Ctrl-C quit",
            engine.generation(),
            engine.current().population(),
            engine.rule(),
        )
    }
}
