use std::io::{self, Write};

use crossterm::cursor::MoveUp;
use crossterm::queue;
use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor};
use crossterm::terminal::{Clear, ClearType};
use serde::{Deserialize, Serialize};

use crate::engine::cursor::CursorState;
use crate::menu::Menu;

pub const INSTRUCTIONS: &str = "---Use arrows or press 'q' to quit---";
pub const DIVIDER: &str = "-------------------------------------";
const GROUP_BULLET: &str = "\u{2022}";
const CHILD_BULLET: &str = "\u{25E6}";

/// Blank line, instruction line and closing divider.
pub const FIXED_LINES: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HighlightStyle {
    #[default]
    Red,
    Reverse,
    Bold,
}

impl HighlightStyle {
    fn begin<W: Write>(self, out: &mut W) -> io::Result<()> {
        match self {
            HighlightStyle::Red => queue!(out, SetBackgroundColor(Color::DarkRed)),
            HighlightStyle::Reverse => queue!(out, SetAttribute(Attribute::Reverse)),
            HighlightStyle::Bold => queue!(out, SetAttribute(Attribute::Bold)),
        }
    }
}

/// Number of lines a frame occupies: every group, the fixed lines, and the
/// children of the expanded group if there is one.
pub fn frame_height(menu: &Menu, cursor: CursorState) -> usize {
    let children = match cursor {
        CursorState::Child(g, _) => menu.group(g).map_or(0, |group| group.len()),
        _ => 0,
    };
    menu.len() + FIXED_LINES + children
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer {
    highlight: HighlightStyle,
}

impl Renderer {
    pub fn new(highlight: HighlightStyle) -> Self {
        Self { highlight }
    }

    /// Draw one frame and return how many lines it printed.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        menu: &Menu,
        cursor: CursorState,
    ) -> io::Result<usize> {
        writeln!(out)?;
        writeln!(out, "{INSTRUCTIONS}")?;
        let mut lines = 2;

        for (i, group) in menu.groups().iter().enumerate() {
            let selected = cursor == CursorState::Group(i);
            self.item(out, "", GROUP_BULLET, group.label(), selected)?;
            lines += 1;

            if let CursorState::Child(g, c) = cursor {
                if g == i {
                    for (j, child) in group.children().iter().enumerate() {
                        self.item(out, "\t", CHILD_BULLET, child.label(), j == c)?;
                        lines += 1;
                    }
                }
            }
        }

        writeln!(out, "{DIVIDER}")?;
        lines += 1;
        out.flush()?;

        debug_assert_eq!(lines, frame_height(menu, cursor));
        Ok(lines)
    }

    /// Move up and clear `n` lines, leaving the cursor where the frame began.
    pub fn erase_lines<W: Write>(&self, out: &mut W, n: usize) -> io::Result<()> {
        for _ in 0..n {
            queue!(out, MoveUp(1), Clear(ClearType::CurrentLine))?;
        }
        out.flush()
    }

    fn item<W: Write>(
        &self,
        out: &mut W,
        indent: &str,
        bullet: &str,
        label: &str,
        selected: bool,
    ) -> io::Result<()> {
        out.write_all(indent.as_bytes())?;
        if selected {
            self.highlight.begin(out)?;
            write!(out, "{bullet}{label}")?;
            queue!(out, SetAttribute(Attribute::Reset))?;
        } else {
            write!(out, "{bullet}{label}")?;
        }
        writeln!(out)
    }
}
