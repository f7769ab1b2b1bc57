use crossterm::event::KeyEvent;
use pwpick_core::catalog::{CatalogItem, Catalogs, ItemKind};
use pwpick_core::selection::{Pane, SelectionState, StageOutcome};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::keymap;
use crate::theme;
use crate::ui::pane_table::{PaneTableRender, PaneTableState, TableColumn};
use crate::ui::text::{compact_hint, focus_line, key_hint_height, key_hint_paragraph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScreenExit {
    Submit(Vec<CatalogItem>),
    Quit,
}

#[derive(Debug, Clone)]
struct StatusLine {
    message: String,
    staged: bool,
}

/// The four-pane picker: engine state plus one filter/highlight view per pane.
pub(crate) struct PickerScreen {
    selection: SelectionState,
    panes: [PaneTableState; 4],
    status: Option<StatusLine>,
}

impl PickerScreen {
    pub(crate) fn new(catalogs: Catalogs) -> Self {
        let selection = SelectionState::new(catalogs);
        let panes = [
            PaneTableState::new(selection.items(Pane::Tests)),
            PaneTableState::new(selection.items(Pane::Files)),
            PaneTableState::new(selection.items(Pane::Tags)),
            PaneTableState::new(selection.items(Pane::Staging)),
        ];

        Self {
            selection,
            panes,
            status: None,
        }
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Option<ScreenExit> {
        let focus = self.selection.focus();

        // A focused filter swallows everything except Esc, so `q`, Space and
        // Enter type into the query instead of acting on the session.
        if self.panes[focus.index()].filter_focused() {
            if keymap::is_filter_leave(key) {
                self.panes[focus.index()].set_filter_focused(false);
            } else {
                let items = self.selection.items(focus);
                self.panes[focus.index()].on_filter_key(key, items);
            }
            return None;
        }

        if keymap::is_filter_focus(key) {
            self.panes[focus.index()].set_filter_focused(true);
            return None;
        }

        if keymap::is_quit(key) {
            return Some(ScreenExit::Quit);
        }

        if keymap::is_cycle_forward(key) {
            self.status = None;
            self.selection.cycle_forward();
            return None;
        }

        if keymap::is_cycle_backward(key) {
            self.status = None;
            self.selection.cycle_backward();
            return None;
        }

        if keymap::is_up(key) {
            self.panes[focus.index()].move_up();
            return None;
        }

        if keymap::is_down(key) {
            self.panes[focus.index()].move_down();
            return None;
        }

        if keymap::is_toggle(key) {
            self.toggle();
            return None;
        }

        if keymap::is_confirm(key) {
            return self.submit();
        }

        None
    }

    fn toggle(&mut self) {
        let focus = self.selection.focus();
        let Some(index) = self.panes[focus.index()].selected_source_index() else {
            return;
        };

        if self.selection.staging_focused() {
            let Some(kind) = self.selection.unstage(index) else {
                return;
            };
            self.status = Some(StatusLine {
                message: format!("Removed {}", kind.noun()),
                staged: false,
            });
        } else {
            match self.selection.stage(index) {
                StageOutcome::Staged(kind) => {
                    self.status = Some(StatusLine {
                        message: format!("Selected {}", kind.noun()),
                        staged: true,
                    });
                }
                StageOutcome::AlreadyStaged | StageOutcome::Nothing => return,
            }
        }

        self.panes[focus.index()].reset_filter(self.selection.items(focus));
        // Items moved between lists, so every other pane's view is stale.
        for pane in Pane::ALL {
            if pane != focus {
                self.panes[pane.index()].sync(self.selection.items(pane));
            }
        }
    }

    fn submit(&mut self) -> Option<ScreenExit> {
        let focus = self.selection.focus();
        let highlighted = self.panes[focus.index()].selected_source_index();
        let items = self.selection.submit_items(highlighted);
        if items.is_empty() {
            return None;
        }
        Some(ScreenExit::Submit(items))
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let focus = self.selection.focus();
        let pane = &self.panes[focus.index()];

        let key_text = if pane.filter_focused() {
            compact_hint(
                area.width,
                "Type: filter    Backspace: delete    Esc: back to list",
                "Type filter    Backspace delete    Esc: list",
                "Type filter | Esc list",
            )
        } else if self.selection.staging_focused() {
            compact_hint(
                area.width,
                "Enter: run    Space: unstage    Tab/L/H: switch pane    /: filter    q: quit",
                "Enter: run    Space: unstage    Tab: pane    /: filter    q: quit",
                "Enter run | Space unstage | Tab pane | q quit",
            )
        } else {
            compact_hint(
                area.width,
                "Enter: run    Space: stage    Tab/L/H: switch pane    Up/Down or j/k: move    /: filter    q: quit",
                "Enter: run    Space: stage    Tab: pane    /: filter    q: quit",
                "Enter run | Space stage | Tab pane | q quit",
            )
        };
        let footer_height = key_hint_height(area.width, key_text);

        let [tabs_area, filter_area, body, status_area, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        self.render_tabs(frame, tabs_area);

        let filter_title = if pane.filter_focused() {
            focus_line("Filter")
        } else {
            Line::from("Filter (/ to focus)")
        };
        pane.render_filter(frame, filter_area, filter_title, pane.filter_focused());

        let columns = [
            TableColumn {
                title: "Item",
                width: Constraint::Percentage(45),
            },
            TableColumn {
                title: "Details",
                width: Constraint::Percentage(55),
            },
        ];
        let body_title = if pane.filter_focused() {
            Line::from(focus.title())
        } else {
            focus_line(focus.title())
        };
        pane.render_table(
            frame,
            body,
            PaneTableRender {
                title: body_title,
                empty_message: empty_message(focus),
                columns: &columns,
                header_style: theme::table_header(Color::Cyan),
                highlight_style: theme::table_highlight(Color::Cyan),
            },
            self.selection.items(focus),
            |item| vec![Line::from(item.title.clone()), details_line(item)],
        );

        if let Some(status) = &self.status {
            let style = if status.staged {
                theme::staged_status()
            } else {
                theme::unstaged_status()
            };
            let line = Line::from(Span::styled(status.message.clone(), style));
            frame.render_widget(Paragraph::new(line), status_area);
        }

        let keys = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(keys, footer);
    }

    fn render_tabs(&self, frame: &mut Frame<'_>, area: Rect) {
        let focus = self.selection.focus();
        let mut spans = Vec::new();
        for pane in Pane::ALL {
            let label = format!(" {} ({}) ", pane.title(), self.selection.items(pane).len());
            let style = if pane == focus {
                theme::table_highlight(Color::Cyan)
            } else {
                theme::secondary_text()
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }

        let tabs = Paragraph::new(Line::from(spans)).block(theme::chrome("Panes"));
        frame.render_widget(tabs, area);
    }

    #[cfg(test)]
    pub(crate) fn selection(&self) -> &SelectionState {
        &self.selection
    }
}

fn details_line(item: &CatalogItem) -> Line<'static> {
    let lead = match item.kind {
        ItemKind::Test => item.location.clone(),
        ItemKind::File | ItemKind::Tag => item.summary.clone(),
    };
    let mut spans = vec![Span::raw(lead)];

    if item.kind == ItemKind::Tag {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" {} ", item.title),
            theme::tag_badge(&item.title),
        ));
    } else {
        for tag in &item.tags {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!(" {tag} "),
                theme::tag_badge(tag),
            ));
        }
    }

    Line::from(spans)
}

fn empty_message(pane: Pane) -> &'static str {
    match pane {
        Pane::Tests => "No tests matched the listing.",
        Pane::Files => "No files matched the listing.",
        Pane::Tags => "No tags matched the listing.",
        Pane::Staging => "Nothing staged yet. Press Space on a catalog item.",
    }
}
