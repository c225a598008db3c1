//! Input sources - bounded wait plus single event read

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Input events the application reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal input
pub trait InputSource {
    /// Wait up to `timeout` for input; `Ok(true)` when an event is ready
    fn wait(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Take exactly one ready event; `None` for events of no interest
    fn read(&mut self) -> io::Result<Option<Input>>;
}

/// Terminal input through crossterm
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn wait(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Option<Input>> {
        Ok(match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Input::Key(key)),
            Event::Resize(..) => Some(Input::Resize),
            _ => None,
        })
    }
}

enum Step {
    Idle,
    Event(Input),
    Fail(io::ErrorKind),
}

/// Scripted input for driving the event loop without a terminal
///
/// Each step answers one `wait`. Once the script runs out, a `q` key is
/// delivered so loops always terminate.
#[derive(Default)]
pub struct ScriptedInput {
    steps: VecDeque<Step>,
    pending: Option<Input>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// A wait that times out with nothing ready
    pub fn idle(mut self) -> Self {
        self.steps.push_back(Step::Idle);
        self
    }

    pub fn key(mut self, code: KeyCode) -> Self {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        self.steps.push_back(Step::Event(Input::Key(key)));
        self
    }

    pub fn chars(mut self, keys: &str) -> Self {
        for c in keys.chars() {
            self = self.key(KeyCode::Char(c));
        }
        self
    }

    pub fn resize(mut self) -> Self {
        self.steps.push_back(Step::Event(Input::Resize));
        self
    }

    /// A wait that fails with the given error kind
    pub fn fail(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(Step::Fail(kind));
        self
    }

    /// Steps not yet consumed
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl InputSource for ScriptedInput {
    fn wait(&mut self, _timeout: Duration) -> io::Result<bool> {
        match self.steps.pop_front() {
            Some(Step::Idle) => Ok(false),
            Some(Step::Event(input)) => {
                self.pending = Some(input);
                Ok(true)
            }
            Some(Step::Fail(kind)) => Err(io::Error::from(kind)),
            None => {
                let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
                self.pending = Some(Input::Key(quit));
                Ok(true)
            }
        }
    }

    fn read(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_order() {
        let mut input = ScriptedInput::new().idle().chars("j");
        let timeout = Duration::from_millis(1);
        assert_eq!(input.remaining(), 2);

        assert!(!input.wait(timeout).unwrap());
        assert!(input.wait(timeout).unwrap());
        assert_eq!(
            input.read().unwrap(),
            Some(Input::Key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)))
        );
        assert_eq!(input.read().unwrap(), None);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_exhausted_script_quits() {
        let mut input = ScriptedInput::new();
        assert!(input.wait(Duration::ZERO).unwrap());
        assert!(matches!(
            input.read().unwrap(),
            Some(Input::Key(KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }))
        ));
    }

    #[test]
    fn test_failure_step() {
        let mut input = ScriptedInput::new().fail(io::ErrorKind::Interrupted);
        let err = input.wait(Duration::ZERO).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }
}
