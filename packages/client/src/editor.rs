//! # Composer formatting commands
//!
//! The article body is a content-editable region formatted with the browser's
//! editing commands. This module decides *what* to run; an [`EditorSurface`]
//! (the DOM in the UI crate, a fake in tests) reports the selection and runs
//! the command.
//!
//! Every command needs a non-empty selection. Without one the surface shows
//! [`EditorError::NoSelection`]'s message and nothing is executed.
//!
//! Heading and quote toggle: the selection anchor's ancestors are walked up to
//! the editor root; if the target block is already among them the block is
//! turned back into a paragraph.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Heading,
    List,
    Quote,
    Link,
}

impl FormatCommand {
    pub fn label(&self) -> &'static str {
        match self {
            FormatCommand::Bold => "Bold",
            FormatCommand::Italic => "Italic",
            FormatCommand::Underline => "Underline",
            FormatCommand::Heading => "Heading",
            FormatCommand::List => "List",
            FormatCommand::Quote => "Quote",
            FormatCommand::Link => "Link",
        }
    }
}

/// Block-level element a selection can be formatted as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockTag {
    Paragraph,
    Heading,
    Quote,
}

impl BlockTag {
    /// Upper-case element name as reported by `Element.tagName`.
    pub fn tag_name(&self) -> &'static str {
        match self {
            BlockTag::Paragraph => "P",
            BlockTag::Heading => "H2",
            BlockTag::Quote => "BLOCKQUOTE",
        }
    }

    /// Value passed to `formatBlock`.
    pub fn format_value(&self) -> &'static str {
        match self {
            BlockTag::Paragraph => "p",
            BlockTag::Heading => "h2",
            BlockTag::Quote => "blockquote",
        }
    }
}

/// A `document.execCommand` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecCommand {
    pub name: &'static str,
    pub value: Option<String>,
}

impl ExecCommand {
    fn simple(name: &'static str) -> Self {
        Self { name, value: None }
    }

    fn with_value(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Please select some text first.")]
    NoSelection,
}

/// The editable region as seen by the command logic.
pub trait EditorSurface {
    /// Text of the current selection (empty when collapsed or absent).
    fn selected_text(&self) -> String;
    /// Element names from the selection anchor up to, not including, the
    /// editor root, innermost first.
    fn anchor_ancestors(&self) -> Vec<String>;
    /// Ask the user for a value (the link target). `None` when cancelled.
    fn prompt(&self, message: &str) -> Option<String>;
    /// Show a message to the user.
    fn notify(&self, message: &str);
    fn exec(&self, command: &ExecCommand);
    fn focus(&self);
}

/// Block to format as: toggles back to a paragraph when already inside `target`.
pub fn toggle_block<S: AsRef<str>>(ancestors: &[S], target: BlockTag) -> BlockTag {
    let inside = ancestors
        .iter()
        .any(|name| name.as_ref().eq_ignore_ascii_case(target.tag_name()));
    if inside {
        BlockTag::Paragraph
    } else {
        target
    }
}

/// Decide the command to run for a selection. `Ok(None)` means the user
/// cancelled (an empty link target).
pub fn plan<S: AsRef<str>>(
    command: FormatCommand,
    selected_text: &str,
    ancestors: &[S],
    link_target: Option<&str>,
) -> Result<Option<ExecCommand>, EditorError> {
    if selected_text.is_empty() {
        return Err(EditorError::NoSelection);
    }
    let exec = match command {
        FormatCommand::Bold => ExecCommand::simple("bold"),
        FormatCommand::Italic => ExecCommand::simple("italic"),
        FormatCommand::Underline => ExecCommand::simple("underline"),
        FormatCommand::List => ExecCommand::simple("insertUnorderedList"),
        FormatCommand::Heading => ExecCommand::with_value(
            "formatBlock",
            toggle_block(ancestors, BlockTag::Heading).format_value(),
        ),
        FormatCommand::Quote => ExecCommand::with_value(
            "formatBlock",
            toggle_block(ancestors, BlockTag::Quote).format_value(),
        ),
        FormatCommand::Link => match link_target.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => ExecCommand::with_value("createLink", url),
            None => return Ok(None),
        },
    };
    Ok(Some(exec))
}

/// Run `command` against the surface. Returns whether anything was executed.
pub fn apply<E: EditorSurface + ?Sized>(surface: &E, command: FormatCommand) -> bool {
    let selected = surface.selected_text();
    if selected.is_empty() {
        surface.notify(&EditorError::NoSelection.to_string());
        return false;
    }
    let link_target = match command {
        FormatCommand::Link => surface.prompt("Enter URL:"),
        _ => None,
    };
    let ancestors = surface.anchor_ancestors();
    match plan(command, &selected, &ancestors, link_target.as_deref()) {
        Ok(Some(exec)) => {
            surface.exec(&exec);
            surface.focus();
            true
        }
        Ok(None) => false,
        Err(e) => {
            surface.notify(&e.to_string());
            false
        }
    }
}

/// Live counters shown under the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} words, {} characters", self.words, self.characters)
    }
}
