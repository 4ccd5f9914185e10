//! The frame loop state machine.
//!
//! Single-threaded and cooperative: read one queued event, mutate the
//! minimal state (focus pointer, checked flags, text), then recompute the
//! entire layout tree and emit a full frame.  No incremental relayout:
//! every state change repaints everything.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::dom::{Element, StructuralError};
use crate::focus::{Direction, FocusIndex, InteractionState};
use crate::layout::{self, ViewportInfo};
use crate::render::{DrawOp, Renderer};

use super::event::{AppEvent, Message};

/// Engine state owned for the lifetime of a session.
pub struct App {
    root: Element,
    viewport: ViewportInfo,
    interaction: InteractionState,
    focus: FocusIndex,
    should_quit: bool,
}

impl App {
    pub fn new(root: Element, viewport: ViewportInfo) -> Self {
        let mut interaction = InteractionState::default();
        interaction.sync(&root);
        Self {
            root,
            viewport,
            interaction,
            focus: FocusIndex::default(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn viewport(&self) -> ViewportInfo {
        self.viewport
    }

    /// Compute one full frame: relayout, focus rebuild, render.
    ///
    /// The viewport is snapshotted on entry, so a resize event arriving
    /// while this runs only affects the next frame.
    pub fn frame(&mut self) -> Result<Vec<DrawOp>, StructuralError> {
        let viewport = self.viewport;
        // Pick up any elements a collaborator added since the last frame.
        self.interaction.sync(&self.root);

        let tree = layout::build(&self.root, viewport)?;

        // The focus list is derived from screen positions, so it must be
        // rebuilt after every relayout; identity carries over by id.
        let previous = self.focus.current_id().map(str::to_string);
        self.focus = FocusIndex::from_layout(&tree);
        self.focus.restore(previous.as_deref());
        self.interaction.set_focused(self.focus.current_id());

        let ops = Renderer::new(viewport).render(&tree, &self.interaction);
        // The confirm flash has now been painted once; demote it so the
        // next frame shows the node as plainly focused again.
        self.interaction.settle();
        tracing::debug!(ops = ops.len(), "frame rendered");
        Ok(ops)
    }

    /// Apply one queued event.  Layout is untouched here; the next
    /// [`App::frame`] call picks up all state changes.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(w, h) => {
                self.viewport = ViewportInfo::new(w, h);
            }
            AppEvent::Synthetic(msg) => self.handle_message(msg),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        // Ctrl+c always quits, regardless of focus.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => self.focus.focus_next(),
            KeyCode::BackTab => self.focus.focus_prev(),
            KeyCode::Up => self.focus.focus_move(Direction::Up),
            KeyCode::Down => self.focus.focus_move(Direction::Down),
            KeyCode::Left => self.focus.focus_move(Direction::Left),
            KeyCode::Right => self.focus.focus_move(Direction::Right),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.focus.current_id().map(str::to_string) {
                    self.interaction.activate(&id);
                }
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
        self.interaction.set_focused(self.focus.current_id());
    }

    fn handle_message(&mut self, msg: Message) {
        match msg {
            Message::Refresh => {} // the next frame rebuilds everything
            Message::SetText { id, text } => {
                if let Some(el) = self.root.find_mut(&id) {
                    el.text = Some(text);
                } else {
                    tracing::debug!(id, "SetText for unknown element id");
                }
            }
            Message::Quit => self.should_quit = true,
        }
    }

    // ── interaction callbacks for an external input router ──────

    /// Confirm the node carrying `id` (button press, checkbox toggle,
    /// radio selection).
    pub fn activate(&mut self, id: &str) {
        self.interaction.activate(id);
    }

    /// Flip the checkable node carrying `id`.
    pub fn toggle(&mut self, id: &str) {
        self.interaction.toggle(id);
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn focus(&self) -> &FocusIndex {
        &self.focus
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementKind;
    use crate::style::Color;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn demo_root() -> Element {
        Element::new(ElementKind::Box)
            .with_classes(&["h-full"])
            .with_child(Element::new(ElementKind::Text).with_id("status").with_text("ready"))
            .with_child(Element::new(ElementKind::Checkbox).with_id("c1").with_text("one").focusable())
            .with_child(Element::new(ElementKind::Checkbox).with_id("c2").with_text("two").focusable())
    }

    fn app() -> App {
        App::new(demo_root(), ViewportInfo::new(80, 24))
    }

    #[test]
    fn tab_walks_focus_in_visual_order() {
        let mut app = app();
        app.frame().unwrap();

        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.focus().current_id(), Some("c1"));
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.focus().current_id(), Some("c2"));
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.focus().current_id(), Some("c1"));
    }

    #[test]
    fn enter_activates_the_focused_checkbox() {
        let mut app = app();
        app.frame().unwrap();
        app.handle_event(key(KeyCode::Tab));
        app.handle_event(key(KeyCode::Enter));
        assert!(app.interaction().is_checked("c1"));
        assert!(!app.interaction().is_checked("c2"));
    }

    #[test]
    fn activation_flash_paints_for_exactly_one_frame() {
        let mut app = app();
        app.frame().unwrap();
        app.handle_event(key(KeyCode::Tab));
        app.handle_event(key(KeyCode::Enter));

        let is_flash = |op: &DrawOp| matches!(op, DrawOp::SetStyle(s) if s.bg == Color::Cyan);
        let flash_frame = app.frame().unwrap();
        assert!(flash_frame.iter().any(is_flash));

        // One frame later the node is plainly focused again.
        let settled_frame = app.frame().unwrap();
        assert!(!settled_frame.iter().any(is_flash));
        assert!(app.interaction().is_checked("c1"));
    }

    #[test]
    fn focus_survives_a_resize_relayout() {
        let mut app = app();
        app.frame().unwrap();
        app.handle_event(key(KeyCode::Tab));
        app.handle_event(key(KeyCode::Tab));

        app.handle_event(AppEvent::Resize(40, 12));
        app.frame().unwrap();
        assert_eq!(app.focus().current_id(), Some("c2"));
        assert_eq!(app.viewport(), ViewportInfo::new(40, 12));
    }

    #[test]
    fn synthetic_set_text_lands_in_the_tree() {
        let mut app = app();
        app.handle_event(AppEvent::Synthetic(Message::SetText {
            id: "status".into(),
            text: "done".into(),
        }));
        let ops = app.frame().unwrap();
        let has_done = ops.iter().any(|op| matches!(op, DrawOp::Print(s) if s == "done"));
        assert!(has_done);
    }

    #[test]
    fn quit_paths() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.should_quit());

        let mut app = App::new(demo_root(), ViewportInfo::new(80, 24));
        app.handle_event(AppEvent::Synthetic(Message::Quit));
        assert!(app.should_quit());

        let mut app = App::new(demo_root(), ViewportInfo::new(80, 24));
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn frames_are_reproducible_without_state_change() {
        let mut app = app();
        let a = app.frame().unwrap();
        let b = app.frame().unwrap();
        assert_eq!(a, b);
    }
}
