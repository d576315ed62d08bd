#![forbid(unsafe_code)]

//! Elm-style program runtime.
//!
//! A [`Model`] owns application state; the [`Program`] owns the terminal.
//! Events become messages via `From<Event>`, `update` transitions state and
//! returns a [`Cmd`] for side effects, and `view` paints a frame. Every
//! `update` runs to completion on the loop thread before the next render,
//! so a view can never observe a half-applied transition.

use std::io::{self, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use forge_core::event::Event;
use forge_core::terminal_session::{SessionOptions, TerminalSession};
use forge_render::frame::Frame;
use forge_render::presenter::Presenter;

use crate::subscription::{Subscription, SubscriptionManager};

/// Application state and behavior.
pub trait Model: Sized {
    /// Message type driving `update`. Must absorb raw terminal events.
    type Message: From<Event> + Send + 'static;

    /// Startup hook; returns commands to run before the first render.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::None
    }

    /// State transition. The single place state changes.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state.
    fn view(&self, frame: &mut Frame);

    /// Declare active subscriptions; reconciled after every update.
    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        vec![]
    }
}

/// Side effects requested by `update`.
#[derive(Default)]
pub enum Cmd<M> {
    /// Nothing to do.
    #[default]
    None,
    /// Stop the program.
    Quit,
    /// Feed another message through `update` immediately.
    Msg(M),
    /// Multiple commands, processed in order.
    Batch(Vec<Cmd<M>>),
    /// Deliver an [`Event::Tick`] message after a delay.
    Tick(Duration),
    /// Run a blocking closure on a background thread; its return value
    /// comes back as a message.
    Task(Box<dyn FnOnce() -> M + Send>),
}

impl<M> Cmd<M> {
    /// No-op command.
    pub fn none() -> Self {
        Self::None
    }

    /// Stop the program.
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Immediate message.
    pub fn msg(msg: M) -> Self {
        Self::Msg(msg)
    }

    /// Several commands in order.
    pub fn batch(cmds: impl IntoIterator<Item = Cmd<M>>) -> Self {
        Self::Batch(cmds.into_iter().collect())
    }

    /// Tick after `delay`.
    pub fn tick(delay: Duration) -> Self {
        Self::Tick(delay)
    }

    /// Background task producing a message.
    pub fn task(f: impl FnOnce() -> M + Send + 'static) -> Self {
        Self::Task(Box::new(f))
    }

    /// Whether this is `Cmd::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Program construction options.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Input poll granularity; bounds worst-case latency for async
    /// messages since the loop drains them between polls.
    pub poll_timeout: Duration,
    /// Enable bracketed paste so pasted text arrives as one event.
    pub bracketed_paste: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(15),
            bracketed_paste: true,
        }
    }
}

/// The terminal program runtime.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
}

impl<M: Model> Program<M> {
    /// Create a program with default configuration.
    pub fn new(model: M) -> Self {
        Self::with_config(model, ProgramConfig::default())
    }

    /// Create a program with explicit configuration.
    pub fn with_config(model: M, config: ProgramConfig) -> Self {
        Self { model, config }
    }

    /// Take over the terminal and run until the model quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or written.
    pub fn run(mut self) -> io::Result<()> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: true,
            bracketed_paste: self.config.bracketed_paste,
        })?;
        let size = session.size()?;
        tracing::info!(width = size.0, height = size.1, "program starting");

        let (tx, rx) = mpsc::channel::<M::Message>();
        let mut subs = SubscriptionManager::new(tx.clone());
        let mut presenter = Presenter::new();
        let mut out = BufWriter::new(io::stdout());
        let mut quit = false;
        let mut size = size;

        let cmd = self.model.init();
        self.process_cmd(cmd, &tx, &mut quit);
        subs.reconcile(self.model.subscriptions());
        self.render(size, &mut presenter, &mut out)?;

        while !quit {
            if session.poll_event(self.config.poll_timeout)?
                && let Some(event) = session.read_event()?
            {
                if let Event::Resize { width, height } = event {
                    tracing::debug!(width, height, "terminal resized");
                    size = (width, height);
                    presenter.invalidate();
                }
                let cmd = self.model.update(M::Message::from(event));
                self.process_cmd(cmd, &tx, &mut quit);
            }

            while let Ok(msg) = rx.try_recv() {
                let cmd = self.model.update(msg);
                self.process_cmd(cmd, &tx, &mut quit);
                if quit {
                    break;
                }
            }

            subs.reconcile(self.model.subscriptions());
            self.render(size, &mut presenter, &mut out)?;
        }

        subs.stop_all();
        tracing::info!("program stopped");
        Ok(())
    }

    /// Execute a command tree. `Msg` recurses through `update` so message
    /// chains complete before the next render.
    fn process_cmd(&mut self, cmd: Cmd<M::Message>, tx: &mpsc::Sender<M::Message>, quit: &mut bool) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => *quit = true,
            Cmd::Msg(msg) => {
                let next = self.model.update(msg);
                self.process_cmd(next, tx, quit);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, tx, quit);
                }
            }
            Cmd::Tick(delay) => {
                let tx = tx.clone();
                thread::spawn(move || {
                    thread::sleep(delay);
                    let _ = tx.send(M::Message::from(Event::Tick));
                });
            }
            Cmd::Task(f) => {
                let tx = tx.clone();
                thread::spawn(move || {
                    let _ = tx.send(f());
                });
            }
        }
    }

    fn render(
        &self,
        size: (u16, u16),
        presenter: &mut Presenter,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let mut frame = Frame::new(size.0, size.1);
        self.model.view(&mut frame);
        let (buffer, cursor) = frame.into_parts();
        presenter.present(&buffer, cursor, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmd_constructors_shape() {
        assert!(Cmd::<u8>::none().is_none());
        assert!(!Cmd::<u8>::quit().is_none());
        assert!(matches!(Cmd::<u8>::msg(3), Cmd::Msg(3)));
        assert!(matches!(
            Cmd::<u8>::tick(Duration::from_millis(5)),
            Cmd::Tick(_)
        ));
        match Cmd::batch([Cmd::<u8>::quit(), Cmd::none()]) {
            Cmd::Batch(cmds) => assert_eq!(cmds.len(), 2),
            _ => panic!("batch should stay a batch"),
        }
    }

    #[test]
    fn cmd_task_carries_closure() {
        let cmd = Cmd::task(|| 42u8);
        match cmd {
            Cmd::Task(f) => assert_eq!(f(), 42),
            _ => panic!("expected task"),
        }
    }

    #[test]
    fn cmd_default_is_none() {
        assert!(Cmd::<u8>::default().is_none());
    }
}
