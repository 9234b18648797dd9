use std::fmt;

/// Two-level selection position.
///
/// The variants carry the invariants directly: a child is only ever
/// highlighted inside a selected group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorState {
    /// Nothing highlighted yet.
    #[default]
    Above,
    /// A group is highlighted and its children are collapsed.
    Group(usize),
    /// A command inside the group is highlighted, children expanded.
    Child(usize, usize),
}

impl CursorState {
    pub fn group(self) -> Option<usize> {
        match self {
            CursorState::Above => None,
            CursorState::Group(g) | CursorState::Child(g, _) => Some(g),
        }
    }

    pub fn child(self) -> Option<usize> {
        match self {
            CursorState::Child(_, c) => Some(c),
            _ => None,
        }
    }

    /// Group index with `-1` meaning above the menu.
    pub fn group_index(self) -> isize {
        self.group().map_or(-1, |g| g as isize)
    }

    /// Child index with `-1` meaning collapsed.
    pub fn child_index(self) -> isize {
        self.child().map_or(-1, |c| c as isize)
    }

    pub fn is_expanded(self) -> bool {
        matches!(self, CursorState::Child(..))
    }
}

impl fmt::Display for CursorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.group_index(), self.child_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_above() {
        let c = CursorState::default();
        assert_eq!(c, CursorState::Above);
        assert_eq!((c.group_index(), c.child_index()), (-1, -1));
    }

    #[test]
    fn test_index_projection() {
        assert_eq!(CursorState::Group(2).group_index(), 2);
        assert_eq!(CursorState::Group(2).child_index(), -1);
        assert_eq!(CursorState::Child(1, 3).child(), Some(3));
        assert!(CursorState::Child(1, 3).is_expanded());
        assert_eq!(CursorState::Child(1, 3).to_string(), "{1, 3}");
    }
}
