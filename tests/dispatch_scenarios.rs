use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use cp_admin::engine::keys::KeyEvent;
use cp_admin::engine::render::{FIXED_LINES, INSTRUCTIONS};
use cp_admin::engine::{
    Capture, CursorState, DispatchLoop, Key, LoopExit, LoopState, Renderer, ScriptedKeys,
};
use cp_admin::menu::{Group, Menu};
use regex::Regex;

struct Fixture {
    menu: Menu,
    hits: Vec<Rc<Cell<usize>>>,
}

/// Two groups: the first with two commands, the second with one.
fn fixture() -> Fixture {
    let hits: Vec<Rc<Cell<usize>>> = (0..3).map(|_| Rc::new(Cell::new(0))).collect();
    let counter = |i: usize| {
        let h = Rc::clone(&hits[i]);
        move || h.set(h.get() + 1)
    };
    let menu = Menu::new(vec![
        Group::new("PROVISION")
            .command("Create SSH Key", counter(0))
            .command("Create Server 1", counter(1)),
        Group::new("ADMIN").command("Shutdown Server", counter(2)),
    ])
    .unwrap();
    Fixture { menu, hits }
}

impl Fixture {
    fn total_hits(&self) -> usize {
        self.hits.iter().map(|h| h.get()).sum()
    }
}

fn run(menu: &Menu, keys: &[Key]) -> (LoopExit, String, CursorState) {
    let mut dl = DispatchLoop::new(menu, Renderer::default());
    let mut out = Vec::new();
    let exit = dl.run(&mut ScriptedKeys::from_keys(keys), &mut out).unwrap();
    assert_eq!(dl.state(), LoopState::Terminated);
    (exit, String::from_utf8(out).unwrap(), dl.cursor())
}

fn erase_count(text: &str) -> usize {
    Regex::new(r"\x1b\[1A\x1b\[2K").unwrap().find_iter(text).count()
}

fn frame_count(text: &str) -> usize {
    text.matches(INSTRUCTIONS).count()
}

#[test]
fn quit_immediately_skips_erase() {
    let f = fixture();
    let (exit, text, cursor) = run(&f.menu, &[Key::Quit]);
    assert_eq!(exit, LoopExit::Quit);
    assert_eq!(cursor, CursorState::Above);
    assert_eq!(frame_count(&text), 1);
    assert_eq!(erase_count(&text), 0);
    assert_eq!(f.total_hits(), 0);
}

#[test]
fn quit_after_navigation_erases_only_earlier_frames() {
    let f = fixture();
    let (exit, text, cursor) = run(&f.menu, &[Key::Down, Key::Right, Key::Down, Key::Quit]);
    assert_eq!(exit, LoopExit::Quit);
    assert_eq!(cursor, CursorState::Child(0, 1));
    assert_eq!(frame_count(&text), 4);

    // Above, Group(0), Child(0, 0) are erased; the final Child(0, 1) frame is not.
    let collapsed = f.menu.len() + FIXED_LINES;
    let expanded = collapsed + 2;
    assert_eq!(erase_count(&text), collapsed + collapsed + expanded);
    assert_eq!(f.total_hits(), 0);
}

#[test]
fn enter_without_child_redraws_and_runs_nothing() {
    let f = fixture();
    let (_, text, cursor) = run(&f.menu, &[Key::Down, Key::Enter, Key::Quit]);
    assert_eq!(cursor, CursorState::Group(0));
    assert_eq!(frame_count(&text), 3);
    assert_eq!(erase_count(&text), 2 * (f.menu.len() + FIXED_LINES));
    assert_eq!(f.total_hits(), 0);
}

#[test]
fn enter_on_child_dispatches_without_erasing() {
    let f = fixture();
    let (_, text, _) = run(
        &f.menu,
        &[Key::Down, Key::Down, Key::Right, Key::Enter, Key::Quit],
    );
    assert_eq!(f.hits[2].get(), 1);
    assert_eq!(f.total_hits(), 1);

    // Above, Group(0), Group(1) erased; Child(1, 0) kept for the dispatch,
    // then redrawn below and kept for quit.
    assert_eq!(frame_count(&text), 5);
    assert_eq!(erase_count(&text), 3 * (f.menu.len() + FIXED_LINES));
}

#[test]
fn repeated_enter_dispatches_once_per_press() {
    let f = fixture();
    run(
        &f.menu,
        &[Key::Down, Key::Right, Key::Down, Key::Enter, Key::Enter, Key::Quit],
    );
    assert_eq!(f.hits[0].get(), 0);
    assert_eq!(f.hits[1].get(), 2);
}

#[test]
fn closed_input_exits_like_quit() {
    let f = fixture();
    let (exit, text, cursor) = run(&f.menu, &[Key::Down]);
    assert_eq!(exit, LoopExit::InputClosed);
    assert_eq!(cursor, CursorState::Group(0));
    assert_eq!(erase_count(&text), f.menu.len() + FIXED_LINES);
    assert!(text.trim_end().lines().last().unwrap().starts_with("[admin] exiting..."));
}

#[test]
fn unrecognized_sequences_only_redraw() {
    let f = fixture();
    let captures = vec![
        Capture::Key(KeyEvent::from_bytes(b"\x1b[1;5B")),
        Capture::Key(KeyEvent::from_bytes(b"x")),
        Capture::Key(KeyEvent::EMPTY),
        Capture::Key(KeyEvent::from_bytes(b"q")),
    ];
    let mut dl = DispatchLoop::new(&f.menu, Renderer::default());
    let mut out = Vec::new();
    let exit = dl.run(&mut ScriptedKeys::new(captures), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(exit, LoopExit::Quit);
    assert_eq!(dl.cursor(), CursorState::Above);
    assert_eq!(frame_count(&text), 4);
    assert_eq!(erase_count(&text), 3 * (f.menu.len() + FIXED_LINES));
}

#[test]
fn panicking_command_propagates() {
    let menu = Menu::new(vec![
        Group::new("BROKEN").command("Explode", || panic!("collaborator failed")),
    ])
    .unwrap();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        run(&menu, &[Key::Down, Key::Right, Key::Enter, Key::Quit])
    }));
    assert!(result.is_err());
}
