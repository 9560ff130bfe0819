use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use tours_core::{update, AppState, GalleryView, Msg};
use tours_logging::tours_info;

use super::cli::Args;
use super::effects::EffectRunner;
use super::logging;
use super::ui::keys::{map_key, UiCommand};
use super::ui::render::render;

/// Input poll interval; also bounds how long an engine event waits to be shown.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app() -> Result<()> {
    let args = Args::parse();
    logging::initialize(args.log);
    tours_info!("Starting tour gallery");

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(args.fetch_settings(), msg_tx.clone());
    let mut gallery = Gallery::new(runner, msg_rx);
    let _ = msg_tx.send(Msg::Mounted);

    let mut terminal = ratatui::try_init().context("initialize terminal")?;
    let result = gallery.run(&mut terminal);
    ratatui::restore();
    tours_info!("Tour gallery closed");
    result
}

struct Gallery {
    state: AppState,
    view: GalleryView,
    selected: usize,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    should_quit: bool,
}

impl Gallery {
    fn new(runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            selected: 0,
            runner,
            msg_rx,
            should_quit: false,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut needs_draw = true;
        loop {
            self.runner.pump();
            needs_draw |= self.process_pending_messages();

            if needs_draw {
                terminal
                    .draw(|frame| render(frame, &self.view, self.selected))
                    .context("draw frame")?;
                needs_draw = false;
            }

            if self.should_quit {
                return Ok(());
            }

            if event::poll(TICK).context("poll event")? {
                match event::read().context("read event")? {
                    Event::Key(key) => {
                        if let Some(command) = map_key(key) {
                            needs_draw |= self.handle_command(command);
                        }
                    }
                    Event::Resize(_, _) => needs_draw = true,
                    _ => {}
                }
            }
        }
    }

    /// Returns whether the view changed.
    fn process_pending_messages(&mut self) -> bool {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        let mut changed = false;
        for msg in inbox {
            changed |= self.dispatch_msg(msg);
        }
        changed
    }

    fn dispatch_msg(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);

        if was_dirty {
            self.view = self.state.view();
            self.clamp_selection();
        }
        was_dirty
    }

    fn handle_command(&mut self, command: UiCommand) -> bool {
        match command {
            UiCommand::Quit => {
                self.dispatch_msg(Msg::Unmounted);
                self.should_quit = true;
                false
            }
            UiCommand::SelectPrevious => {
                let before = self.selected;
                self.selected = self.selected.saturating_sub(1);
                before != self.selected
            }
            UiCommand::SelectNext => {
                let before = self.selected;
                let last = self.view.cards().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(last);
                before != self.selected
            }
            UiCommand::ToggleSelected => match self.selected_id() {
                Some(id) => self.dispatch_msg(Msg::ToggleDescription(id)),
                None => false,
            },
            UiCommand::RemoveSelected => match self.selected_id() {
                Some(id) => self.dispatch_msg(Msg::RemoveTour(id)),
                None => false,
            },
        }
    }

    fn selected_id(&self) -> Option<tours_core::TourId> {
        self.view
            .cards()
            .get(self.selected)
            .map(|card| card.id.clone())
    }

    fn clamp_selection(&mut self) {
        let count = self.view.cards().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}
