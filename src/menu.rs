use std::fmt;

use thiserror::Error;

pub type Action = Box<dyn Fn()>;

/// A leaf entry bound to a zero-argument action.
pub struct Command {
    label: String,
    action: Action,
}

impl Command {
    pub fn new(label: impl Into<String>, action: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            action: Box::new(action),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the action to completion on the calling thread.
    pub fn invoke(&self) {
        (self.action)()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("label", &self.label).finish()
    }
}

#[derive(Debug)]
pub struct Group {
    label: String,
    children: Vec<Command>,
}

impl Group {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn command(mut self, label: impl Into<String>, action: impl Fn() + 'static) -> Self {
        self.children.push(Command::new(label, action));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Command] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("menu has no groups")]
    Empty,
    #[error("no group labelled {0:?}")]
    UnknownGroup(String),
    #[error("group {group:?} has no command labelled {command:?}")]
    UnknownCommand { group: String, command: String },
}

/// Fixed two-level command table. Never mutated after construction.
#[derive(Debug)]
pub struct Menu {
    groups: Vec<Group>,
}

impl Menu {
    pub fn new(groups: Vec<Group>) -> Result<Self, MenuError> {
        if groups.is_empty() {
            return Err(MenuError::Empty);
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn command(&self, group: usize, child: usize) -> Option<&Command> {
        self.groups.get(group)?.children.get(child)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn last_group_index(&self) -> usize {
        self.groups.len() - 1
    }

    /// Case-insensitive lookup by labels, for running a command outside the
    /// interactive loop.
    pub fn find(&self, group: &str, command: &str) -> Result<&Command, MenuError> {
        let g = self
            .groups
            .iter()
            .find(|g| g.label.eq_ignore_ascii_case(group))
            .ok_or_else(|| MenuError::UnknownGroup(group.to_string()))?;
        g.children
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(command))
            .ok_or_else(|| MenuError::UnknownCommand {
                group: g.label.clone(),
                command: command.to_string(),
            })
    }
}
