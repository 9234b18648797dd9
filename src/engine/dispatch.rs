use std::io::Write;

use tracing::{debug, info};

use crate::engine::cursor::CursorState;
use crate::engine::error::EngineError;
use crate::engine::input::{Capture, KeySource};
use crate::engine::keys::{Key, KeyEvent};
use crate::engine::navigator;
use crate::engine::render::Renderer;
use crate::menu::Menu;
use crate::output;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    Quit,
    InputClosed,
}

/// Render, wait for a key, then move the cursor or run the selected command.
pub struct DispatchLoop<'m> {
    menu: &'m Menu,
    renderer: Renderer,
    cursor: CursorState,
    last_key: KeyEvent,
    state: LoopState,
    dispatched: usize,
}

impl<'m> DispatchLoop<'m> {
    pub fn new(menu: &'m Menu, renderer: Renderer) -> Self {
        Self {
            menu,
            renderer,
            cursor: CursorState::Above,
            last_key: KeyEvent::EMPTY,
            state: LoopState::Running,
            dispatched: 0,
        }
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Commands invoked so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Drive the menu until quit or closed input, then print the farewell
    /// line. Commands run on this thread; a panicking command unwinds
    /// straight through.
    pub fn run<K, W>(&mut self, keys: &mut K, out: &mut W) -> Result<LoopExit, EngineError>
    where
        K: KeySource,
        W: Write,
    {
        let exit = loop {
            let exit = self.step(keys, out)?;
            if let Some(exit) = exit {
                break exit;
            }
        };

        self.state = LoopState::Terminated;
        info!(?exit, dispatched = self.dispatched, "menu loop finished");
        writeln!(out, "{}", output::status_line("exiting..."))?;
        out.flush()?;
        Ok(exit)
    }

    /// One iteration. Returns `Some` once the loop should terminate.
    pub fn step<K, W>(&mut self, keys: &mut K, out: &mut W) -> Result<Option<LoopExit>, EngineError>
    where
        K: KeySource,
        W: Write,
    {
        if self.state == LoopState::Terminated {
            return Ok(Some(LoopExit::Quit));
        }

        let next = navigator::transition(self.menu, self.cursor, self.last_key.key());
        if next != self.cursor {
            debug!(from = %self.cursor, to = %next, "cursor moved");
        }
        self.cursor = next;

        let printed = self.renderer.render(out, self.menu, self.cursor)?;

        let event = match keys.capture_key()? {
            Capture::Key(event) => event,
            Capture::Closed => {
                info!("input closed");
                self.state = LoopState::Terminated;
                return Ok(Some(LoopExit::InputClosed));
            }
        };
        self.last_key = event;

        match event.key() {
            Key::Quit => {
                self.state = LoopState::Terminated;
                return Ok(Some(LoopExit::Quit));
            }
            Key::Enter if self.cursor.is_expanded() => self.dispatch_selected(),
            _ => self.renderer.erase_lines(out, printed)?,
        }
        Ok(None)
    }

    /// Invoke the highlighted command. The frame above it stays on screen so
    /// the command's output reads below the menu.
    fn dispatch_selected(&mut self) {
        let CursorState::Child(g, c) = self.cursor else {
            return;
        };
        let menu = self.menu;
        let (Some(group), Some(command)) = (menu.group(g), menu.command(g, c)) else {
            return;
        };

        info!(group = group.label(), command = command.label(), "dispatching command");
        self.dispatched += 1;
        command.invoke();
        debug!(command = command.label(), "command returned");
    }
}
