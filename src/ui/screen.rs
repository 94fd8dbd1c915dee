use std::io::{self, Write};
use tokio::sync::oneshot;
use crate::handlers::events::{Notice, UiEvent};
use crate::models::coordinates::Coordinates;

const RESET: &str = "\x1b[0m";
const FG_GREEN: &str = "\x1b[32m";
const FG_RED: &str = "\x1b[31m";
const FG_YELLOW: &str = "\x1b[33m";

/// What a line typed by the user means in the current state.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    GetLocation,
    Answered,
    Quit,
    Unknown,
}

/// The single screen: one action, one location display, notification lines.
pub struct Screen<W: Write> {
    out: W,
    location: Option<Coordinates>,
    pending_prompt: Option<oneshot::Sender<bool>>,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self { out, location: None, pending_prompt: None }
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    pub fn is_prompting(&self) -> bool {
        self.pending_prompt.is_some()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "[Enter] get location   [q] quit")?;
        self.out.flush()
    }

    pub fn input(&mut self, line: &str) -> Input {
        let line = line.trim();
        if let Some(answer) = self.pending_prompt.take() {
            let granted = matches!(line.to_ascii_lowercase().as_str(), "y" | "yes");
            answer.send(granted).ok();
            return Input::Answered;
        }

        match line {
            "" | "l" | "get" => Input::GetLocation,
            "q" | "quit" | "exit" => Input::Quit,
            _ => Input::Unknown,
        }
    }

    pub fn render(&mut self, event: UiEvent) -> io::Result<()> {
        match event {
            UiEvent::ShowLocation(coordinates) => {
                self.location = Some(coordinates);
                writeln!(self.out, "{}", location_text(&coordinates))?;
            }
            UiEvent::Notify(notice) => self.notice(&notice)?,
            UiEvent::PromptPermission(answer) => {
                // Only one dialog is shown at a time; an older one is dismissed.
                self.pending_prompt = Some(answer);
                write!(self.out, "{}Allow location access? [y/N]{} ", FG_YELLOW, RESET)?;
            }
        }
        self.out.flush()
    }

    /// Drops an unanswered prompt, which the platform reads as a refusal.
    pub fn dismiss_prompt(&mut self) {
        self.pending_prompt.take();
    }

    pub fn help(&mut self) -> io::Result<()> {
        self.banner()
    }

    fn notice(&mut self, notice: &Notice) -> io::Result<()> {
        let colour = if notice.is_error() { FG_RED } else { FG_GREEN };
        writeln!(self.out, "{}{}{}", colour, notice, RESET)
    }
}

pub fn location_text(coordinates: &Coordinates) -> String {
    format!("Lat: {}\nLon: {}", coordinates.latitude(), coordinates.longitude())
}
