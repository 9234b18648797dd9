use crate::engine::cursor::CursorState;
use crate::engine::keys::Key;
use crate::menu::{Group, Menu};

/// Next cursor position for a key press. Pure; boundary moves are no-ops.
///
/// Down walks the groups, or the children once a group is expanded. Right
/// expands, Left always collapses. Quit, Enter and unrecognized keys leave
/// the cursor where it is.
pub fn transition(menu: &Menu, cursor: CursorState, key: Key) -> CursorState {
    match key {
        Key::Up => up(cursor),
        Key::Down => down(menu, cursor),
        Key::Right => right(menu, cursor),
        Key::Left => left(cursor),
        Key::Quit | Key::Enter | Key::Unrecognized => cursor,
    }
}

fn up(cursor: CursorState) -> CursorState {
    match cursor {
        CursorState::Above => cursor,
        // Child 0 steps back onto its group (child index -1).
        CursorState::Child(g, 0) => CursorState::Group(g),
        CursorState::Child(g, c) => CursorState::Child(g, c - 1),
        // Group 0 steps back above the menu (group index -1).
        CursorState::Group(0) => CursorState::Above,
        CursorState::Group(g) => CursorState::Group(g - 1),
    }
}

fn down(menu: &Menu, cursor: CursorState) -> CursorState {
    match cursor {
        CursorState::Above if menu.is_empty() => cursor,
        CursorState::Above => CursorState::Group(0),
        CursorState::Group(g) if g >= menu.last_group_index() => cursor,
        // A collapsed empty group sits on its own last child (-1 == len - 1).
        CursorState::Group(g) if menu.group(g).is_some_and(Group::is_empty) => cursor,
        CursorState::Group(g) => CursorState::Group(g + 1),
        CursorState::Child(g, c) => {
            let children = menu.group(g).map_or(0, |group| group.len());
            if c + 1 >= children {
                cursor
            } else {
                CursorState::Child(g, c + 1)
            }
        }
    }
}

fn right(menu: &Menu, cursor: CursorState) -> CursorState {
    match cursor {
        CursorState::Group(g) if menu.group(g).is_some_and(|group| !group.is_empty()) => {
            CursorState::Child(g, 0)
        }
        _ => cursor,
    }
}

fn left(cursor: CursorState) -> CursorState {
    match cursor {
        CursorState::Child(g, _) => CursorState::Group(g),
        _ => cursor,
    }
}
