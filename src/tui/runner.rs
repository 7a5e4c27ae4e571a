//! TUI main loop
//!
//! Owns the terminal, the event stream, and the background generation
//! tasks. Generation runs in spawned tokio tasks that report back over a
//! channel; each result carries the generation number it was issued with
//! so stale responses are discarded instead of overwriting newer ones.

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::events::{Event, EventHandler};
use super::{App, Tui, views};
use crate::itinerary::DateRequest;
use crate::llm::PlannerClient;
use crate::planner::{self, PlanOutcome};

/// Tick rate for the spinner animation
const TICK_RATE: Duration = Duration::from_millis(100);

/// Result of a background generation task
#[derive(Debug)]
pub struct PlanTaskResult {
    /// Generation number the request was issued with
    pub generation: u64,
    /// The outcome (always renderable - fallback on any failure)
    pub outcome: PlanOutcome,
}

/// TUI runner - owns the main loop
pub struct TuiRunner {
    terminal: Tui,
    app: App,
    events: EventHandler,
    client: Arc<dyn PlannerClient>,
    result_tx: mpsc::Sender<PlanTaskResult>,
    result_rx: mpsc::Receiver<PlanTaskResult>,
    spinner_frame: usize,
}

impl TuiRunner {
    /// Create a new runner with the given terminal and planner client
    pub fn new(terminal: Tui, client: Arc<dyn PlannerClient>) -> Self {
        debug!("TuiRunner::new: called");
        let (result_tx, result_rx) = mpsc::channel(8);
        Self {
            terminal,
            app: App::new(),
            events: EventHandler::new(TICK_RATE),
            client,
            result_tx,
            result_rx,
            spinner_frame: 0,
        }
    }

    /// Run the main loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        info!("TuiRunner::run: starting main loop");
        loop {
            self.draw()?;

            tokio::select! {
                event = self.events.next() => {
                    let Some(event) = event else {
                        debug!("TuiRunner::run: event channel closed");
                        break;
                    };
                    match event {
                        Event::Key(key) => {
                            if self.app.handle_key(key) {
                                debug!("TuiRunner::run: force quit from key handler");
                                break;
                            }
                        }
                        Event::Tick => {
                            self.spinner_frame = self.spinner_frame.wrapping_add(1);
                        }
                        Event::Resize(_, _) => {}
                    }
                }
                Some(result) = self.result_rx.recv() => {
                    debug!(generation = result.generation, "TuiRunner::run: plan result received");
                    self.app.state_mut().apply_outcome(result.generation, result.outcome);
                }
            }

            // Pick up any request queued by key handling
            if let Some(request) = self.app.state_mut().pending_request.take() {
                self.start_generation(request);
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: quit requested");
                break;
            }
        }

        info!("TuiRunner::run: main loop exited");
        Ok(())
    }

    /// Spawn a background generation task for the given request
    ///
    /// Bumps the generation counter first; an older in-flight request keeps
    /// running but its result will be dropped as stale.
    fn start_generation(&mut self, request: DateRequest) {
        let generation = self.app.state_mut().next_generation();
        info!(generation, location = %request.location, "TuiRunner::start_generation: spawning");

        let client = Arc::clone(&self.client);
        let result_tx = self.result_tx.clone();
        tokio::spawn(async move {
            let outcome = planner::generate(client, &request).await;
            // Receiver gone means the TUI is shutting down
            let _ = result_tx.send(PlanTaskResult { generation, outcome }).await;
        });
    }

    fn draw(&mut self) -> Result<()> {
        let state = self.app.state_mut();
        let spinner_frame = self.spinner_frame;
        self.terminal.draw(|frame| views::render(state, frame, spinner_frame))?;
        Ok(())
    }
}
