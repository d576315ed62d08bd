#![forbid(unsafe_code)]

//! Headless program driver for tests.
//!
//! Runs a [`Model`] through the same update/command semantics as
//! [`Program`](crate::Program) without a terminal, threads, or channels.
//! Commands resolve synchronously: `Tick` durations are recorded instead of
//! slept, and `Task` closures either run inline or are held until the test
//! releases them, which makes in-flight states observable.

use std::time::Duration;

use forge_core::event::Event;
use forge_render::buffer::Buffer;
use forge_render::frame::Frame;

use crate::program::{Cmd, Model};

/// Synchronous stand-in for the program loop.
pub struct ProgramSimulator<M: Model> {
    model: M,
    quit: bool,
    ticks: Vec<Duration>,
    deferred: Vec<Box<dyn FnOnce() -> M::Message + Send>>,
    defer_tasks: bool,
}

impl<M: Model> ProgramSimulator<M> {
    /// Start a simulator; runs `init` and executes its commands inline.
    pub fn new(model: M) -> Self {
        Self::build(model, false)
    }

    /// Start a simulator that holds `Task` closures until
    /// [`run_pending_tasks`](Self::run_pending_tasks) is called. Lets a test
    /// inspect the state between requesting a task and its completion.
    pub fn with_deferred_tasks(model: M) -> Self {
        Self::build(model, true)
    }

    fn build(mut model: M, defer_tasks: bool) -> Self {
        let cmd = model.init();
        let mut sim = Self {
            model,
            quit: false,
            ticks: Vec::new(),
            deferred: Vec::new(),
            defer_tasks,
        };
        sim.process_cmd(cmd);
        sim
    }

    /// The model under test.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Feed a message through `update`.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.process_cmd(cmd);
    }

    /// Feed a terminal event through `update` via `From<Event>`.
    pub fn send_event(&mut self, event: Event) {
        self.send(M::Message::from(event));
    }

    /// Whether the model has requested `Cmd::Quit`.
    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Delays requested via `Cmd::Tick`, in order.
    pub fn scheduled_ticks(&self) -> &[Duration] {
        &self.ticks
    }

    /// Number of tasks held back by deferred mode.
    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// Run all held tasks and feed their messages through `update`.
    pub fn run_pending_tasks(&mut self) {
        let tasks: Vec<_> = self.deferred.drain(..).collect();
        for task in tasks {
            self.send(task());
        }
    }

    /// Render the current state into a buffer of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        let (buffer, _) = frame.into_parts();
        buffer
    }

    fn process_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.quit = true,
            Cmd::Msg(msg) => self.send(msg),
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::Tick(delay) => self.ticks.push(delay),
            Cmd::Task(f) => {
                if self.defer_tasks {
                    self.deferred.push(f);
                } else {
                    self.send(f());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tiny counter model for exercising the simulator itself.
    struct Counter {
        value: u32,
        pending: bool,
    }

    enum CounterMsg {
        Add(u32),
        StartWork,
        WorkDone(u32),
        Quit,
        Ignore,
    }

    impl From<Event> for CounterMsg {
        fn from(event: Event) -> Self {
            match event {
                Event::Tick => CounterMsg::Add(1),
                _ => CounterMsg::Ignore,
            }
        }
    }

    impl Model for Counter {
        type Message = CounterMsg;

        fn update(&mut self, msg: CounterMsg) -> Cmd<CounterMsg> {
            match msg {
                CounterMsg::Add(n) => {
                    self.value += n;
                    Cmd::None
                }
                CounterMsg::StartWork => {
                    self.pending = true;
                    Cmd::task(|| CounterMsg::WorkDone(10))
                }
                CounterMsg::WorkDone(n) => {
                    self.pending = false;
                    self.value += n;
                    Cmd::None
                }
                CounterMsg::Quit => Cmd::Quit,
                CounterMsg::Ignore => Cmd::None,
            }
        }

        fn view(&self, frame: &mut Frame) {
            let _ = frame;
        }
    }

    fn counter() -> Counter {
        Counter {
            value: 0,
            pending: false,
        }
    }

    #[test]
    fn messages_flow_through_update() {
        let mut sim = ProgramSimulator::new(counter());
        sim.send(CounterMsg::Add(2));
        sim.send_event(Event::Tick);
        assert_eq!(sim.model().value, 3);
        assert!(!sim.has_quit());
    }

    #[test]
    fn quit_is_recorded() {
        let mut sim = ProgramSimulator::new(counter());
        sim.send(CounterMsg::Quit);
        assert!(sim.has_quit());
    }

    #[test]
    fn inline_tasks_complete_immediately() {
        let mut sim = ProgramSimulator::new(counter());
        sim.send(CounterMsg::StartWork);
        assert!(!sim.model().pending);
        assert_eq!(sim.model().value, 10);
    }

    #[test]
    fn deferred_tasks_expose_in_flight_state() {
        let mut sim = ProgramSimulator::with_deferred_tasks(counter());
        sim.send(CounterMsg::StartWork);
        assert!(sim.model().pending);
        assert_eq!(sim.pending_tasks(), 1);

        sim.run_pending_tasks();
        assert!(!sim.model().pending);
        assert_eq!(sim.model().value, 10);
        assert_eq!(sim.pending_tasks(), 0);
    }
}
