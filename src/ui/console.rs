use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info};
use crate::handlers::events::UiEvent;
use crate::handlers::location_flow::{FlowOutcome, LocationFlow};
use crate::handlers::permission_gate::PermissionPlatform;
use crate::models::error::SyncResult;
use crate::ui::screen::{Input, Screen};

/// Foreground loop. Owns user input and the screen; the flow and its
/// submissions run as separate tasks and report back through `events`.
pub struct Console<P, R, W: Write> {
    flow: Arc<LocationFlow<P>>,
    events: mpsc::Receiver<UiEvent>,
    input: R,
    screen: Screen<W>,
}

impl<P, R, W> Console<P, R, W>
where
    P: PermissionPlatform + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(flow: Arc<LocationFlow<P>>, events: mpsc::Receiver<UiEvent>, input: R, out: W) -> Self {
        Self { flow, events, input, screen: Screen::new(out) }
    }

    /// Interactive mode: every "get location" spawns one flow. Once the user
    /// quits or input ends, flows still in flight are awaited and their
    /// results rendered before returning.
    pub async fn run(mut self) -> SyncResult<Screen<W>> {
        self.screen.banner()?;
        let mut flows = JoinSet::new();
        let mut lines = (&mut self.input).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match self.screen.input(&line) {
                        Input::GetLocation => {
                            let flow = self.flow.clone();
                            flows.spawn(async move {
                                if let FlowOutcome::Submitted(submission) = flow.trigger().await {
                                    submission.await.ok();
                                }
                            });
                        }
                        Input::Quit => break,
                        Input::Answered => {}
                        Input::Unknown => self.screen.help()?,
                    }
                }
                Some(event) = self.events.recv() => self.screen.render(event)?,
                Some(_) = flows.join_next() => {}
            }
        }

        if !flows.is_empty() {
            debug!("Waiting for {} pending action(s)", flows.len());
        }
        self.settle(&mut flows).await?;

        info!("Console closed");
        Ok(self.screen)
    }

    /// Input is gone: keep rendering until every flow is done, refusing any
    /// prompt that shows up meanwhile.
    async fn settle<T: 'static>(&mut self, flows: &mut JoinSet<T>) -> SyncResult<()> {
        self.screen.dismiss_prompt();

        loop {
            tokio::select! {
                joined = flows.join_next() => {
                    if joined.is_none() {
                        break;
                    }
                }
                Some(event) = self.events.recv() => {
                    let prompt = matches!(event, UiEvent::PromptPermission(_));
                    self.screen.render(event)?;
                    if prompt {
                        self.screen.dismiss_prompt();
                    }
                }
            }
        }

        self.drain_events()
    }

    fn drain_events(&mut self) -> SyncResult<()> {
        while let Ok(event) = self.events.try_recv() {
            self.screen.render(event)?;
        }
        Ok(())
    }

    /// Runs a single action to completion, submission included. `true` only
    /// when the record was stored.
    pub async fn run_once(mut self) -> SyncResult<(bool, Screen<W>)> {
        let flow = self.flow.clone();
        let mut action: JoinHandle<bool> = tokio::spawn(async move {
            match flow.trigger().await {
                FlowOutcome::Submitted(submission) => matches!(submission.await, Ok(Ok(_))),
                FlowOutcome::PermissionDenied | FlowOutcome::LocationUnavailable => false,
            }
        });

        let mut lines = (&mut self.input).lines();
        let mut input_open = true;

        let stored = loop {
            tokio::select! {
                done = &mut action => break done.unwrap_or(false),
                line = lines.next_line(), if input_open => match line? {
                    Some(line) => {
                        self.screen.input(&line);
                    }
                    None => {
                        debug!("Input closed");
                        input_open = false;
                        // Nobody is left to answer an open prompt.
                        self.screen.dismiss_prompt();
                    }
                },
                Some(event) = self.events.recv() => {
                    let prompt = matches!(event, UiEvent::PromptPermission(_));
                    self.screen.render(event)?;
                    if prompt && !input_open {
                        self.screen.dismiss_prompt();
                    }
                }
            }
        };

        self.drain_events()?;
        Ok((stored, self.screen))
    }
}
