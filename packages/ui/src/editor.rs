//! The composer body: a content-editable region driven by
//! [`client::editor`] commands.

use client::editor::{self, EditorSurface, ExecCommand, FormatCommand, TextStats};
use dioxus::prelude::*;

use crate::dom;

const TOOLBAR: [FormatCommand; 7] = [
    FormatCommand::Bold,
    FormatCommand::Italic,
    FormatCommand::Underline,
    FormatCommand::Heading,
    FormatCommand::List,
    FormatCommand::Quote,
    FormatCommand::Link,
];

/// The editable element with id `root_id` in the live document.
pub struct DomSurface {
    root_id: String,
}

impl DomSurface {
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            root_id: root_id.into(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn root(&self) -> Option<web_sys::HtmlElement> {
        use wasm_bindgen::JsCast;
        web_sys::window()?
            .document()?
            .get_element_by_id(&self.root_id)?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()
    }

    /// Rendered text of the region.
    pub fn text(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            self.root().map(|root| root.inner_text()).unwrap_or_default()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            String::new()
        }
    }

    pub fn set_text(&self, text: &str) {
        #[cfg(target_arch = "wasm32")]
        if let Some(root) = self.root() {
            root.set_inner_text(text);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = text;
    }
}

#[cfg(target_arch = "wasm32")]
impl EditorSurface for DomSurface {
    fn selected_text(&self) -> String {
        web_sys::window()
            .and_then(|w| w.get_selection().ok().flatten())
            .map(|selection| String::from(selection.to_string()))
            .unwrap_or_default()
    }

    fn anchor_ancestors(&self) -> Vec<String> {
        use wasm_bindgen::JsCast;

        let anchor = web_sys::window()
            .and_then(|w| w.get_selection().ok().flatten())
            .and_then(|selection| selection.anchor_node());
        let Some(anchor) = anchor else {
            return Vec::new();
        };
        let mut current = match anchor.clone().dyn_into::<web_sys::Element>() {
            Ok(element) => Some(element),
            Err(_) => anchor.parent_element(),
        };
        let mut names = Vec::new();
        while let Some(element) = current {
            if element.id() == self.root_id {
                break;
            }
            names.push(element.tag_name());
            current = element.parent_element();
        }
        names
    }

    fn prompt(&self, message: &str) -> Option<String> {
        dom::prompt(message)
    }

    fn notify(&self, message: &str) {
        dom::alert(message);
    }

    fn exec(&self, command: &ExecCommand) {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok());
        let Some(document) = document else {
            return;
        };
        let value = command.value.as_deref().unwrap_or_default();
        if let Err(e) = document.exec_command_with_show_ui_and_value(command.name, false, value) {
            tracing::warn!("{} failed: {:?}", command.name, e);
        }
    }

    fn focus(&self) {
        if let Some(root) = self.root() {
            let _ = root.focus();
        }
    }
}

/// Off the web there is no selection, so every command reports it.
#[cfg(not(target_arch = "wasm32"))]
impl EditorSurface for DomSurface {
    fn selected_text(&self) -> String {
        String::new()
    }

    fn anchor_ancestors(&self) -> Vec<String> {
        Vec::new()
    }

    fn prompt(&self, message: &str) -> Option<String> {
        dom::prompt(message)
    }

    fn notify(&self, message: &str) {
        dom::alert(message);
    }

    fn exec(&self, command: &ExecCommand) {
        tracing::debug!("exec {}", command.name);
    }

    fn focus(&self) {}
}

/// Toolbar, editable body and live counters.
///
/// `initial` is written into the region once, when it mounts. Every change
/// reports the region's text through `on_input`.
#[component]
pub fn RichTextEditor(
    root_id: String,
    initial: String,
    on_input: EventHandler<String>,
) -> Element {
    let mut stats = use_signal(|| TextStats::of(&initial));
    let surface_id = root_id.clone();
    let mount_id = root_id.clone();
    let input_id = root_id.clone();

    let mut report = move |text: String| {
        stats.set(TextStats::of(&text));
        on_input.call(text);
    };

    rsx! {
        div {
            class: "rich-editor",
            div {
                class: "editor-toolbar",
                for command in TOOLBAR {
                    button {
                        key: "{command.label()}",
                        r#type: "button",
                        class: "toolbar-btn",
                        title: "{command.label()}",
                        // Keep the selection in the body.
                        onmousedown: move |evt: Event<MouseData>| evt.prevent_default(),
                        onclick: {
                            let surface_id = surface_id.clone();
                            move |_| {
                                let surface = DomSurface::new(surface_id.clone());
                                if editor::apply(&surface, command) {
                                    report(surface.text());
                                }
                            }
                        },
                        "{command.label()}"
                    }
                }
            }
            div {
                id: "{root_id}",
                class: "editor-body",
                contenteditable: "true",
                onmounted: move |_| {
                    DomSurface::new(mount_id.clone()).set_text(&initial);
                },
                oninput: move |_| report(DomSurface::new(input_id.clone()).text()),
            }
            div { class: "editor-stats", "{stats().label()}" }
        }
    }
}
