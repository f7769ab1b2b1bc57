use crossterm::event::{Event, KeyEvent};
use pwpick_core::catalog::CatalogItem;
use ratatui::Frame;
use ratatui::layout::{Constraint, Margin, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{
    Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table, TableState,
};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableColumn {
    pub(crate) title: &'static str,
    pub(crate) width: Constraint,
}

#[derive(Debug, Clone)]
pub(crate) struct PaneTableRender<'a> {
    pub(crate) title: Line<'a>,
    pub(crate) empty_message: &'a str,
    pub(crate) columns: &'a [TableColumn],
    pub(crate) header_style: Style,
    pub(crate) highlight_style: Style,
}

/// Filter + highlight state for one pane. The pane never owns the items; it
/// keeps a filtered view of indices into the engine's list, so filtering can
/// never reorder or mutate the underlying catalog.
#[derive(Debug, Default)]
pub(crate) struct PaneTableState {
    filtered: Vec<usize>,
    selected: usize,
    query: Input,
    filter_focused: bool,
}

impl PaneTableState {
    pub(crate) fn new(items: &[CatalogItem]) -> Self {
        let mut state = Self::default();
        state.sync(items);
        state
    }

    /// Recomputes the filtered view after the underlying list changed.
    pub(crate) fn sync(&mut self, items: &[CatalogItem]) {
        let query = self.query.value().trim().to_lowercase();
        self.filtered = items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                if query.is_empty() {
                    return true;
                }

                item.title.to_lowercase().contains(&query)
                    || item.location.to_lowercase().contains(&query)
                    || item.summary.to_lowercase().contains(&query)
                    || item
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&query))
            })
            .map(|(index, _)| index)
            .collect();

        if self.filtered.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len() - 1;
        }
    }

    pub(crate) fn on_filter_key(&mut self, key: KeyEvent, items: &[CatalogItem]) {
        if self.query.handle_event(&Event::Key(key)).is_some() {
            self.sync(items);
        }
    }

    pub(crate) fn reset_filter(&mut self, items: &[CatalogItem]) {
        self.query = Input::default();
        self.sync(items);
    }

    pub(crate) fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(crate) fn move_down(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    /// Index of the highlighted row in the engine's unfiltered list.
    pub(crate) fn selected_source_index(&self) -> Option<usize> {
        self.filtered.get(self.selected).copied()
    }

    pub(crate) fn filter_focused(&self) -> bool {
        self.filter_focused
    }

    pub(crate) fn set_filter_focused(&mut self, value: bool) {
        self.filter_focused = value;
    }

    #[cfg(test)]
    pub(crate) fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub(crate) fn render_filter(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        title: Line<'_>,
        show_cursor: bool,
    ) {
        let width = area.width.saturating_sub(2) as usize;
        let scroll = self.query.visual_scroll(width);
        let paragraph = Paragraph::new(self.query.value())
            .scroll((0, scroll as u16))
            .block(crate::theme::chrome(title));
        frame.render_widget(paragraph, area);

        if !show_cursor || width == 0 {
            return;
        }

        let visual = self.query.visual_cursor();
        let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
        frame.set_cursor_position((area.x + 1 + relative as u16, area.y + 1));
    }

    pub(crate) fn render_table<F>(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        render: PaneTableRender<'_>,
        items: &[CatalogItem],
        row_builder: F,
    ) where
        F: Fn(&CatalogItem) -> Vec<Line<'static>>,
    {
        if self.filtered.is_empty() {
            let empty = Paragraph::new(render.empty_message)
                .block(crate::theme::chrome(render.title.clone()));
            frame.render_widget(empty, area);
            return;
        }

        let header =
            Row::new(render.columns.iter().map(|column| column.title)).style(render.header_style);
        let rows = self
            .filtered
            .iter()
            .filter_map(|index| items.get(*index))
            .map(|item| Row::new(row_builder(item)));
        let widths: Vec<Constraint> = render.columns.iter().map(|column| column.width).collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(crate::theme::chrome(render.title))
            .row_highlight_style(render.highlight_style)
            .highlight_symbol(">> ");

        let mut state = TableState::new();
        state.select(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);

        let viewport = area.height.saturating_sub(3) as usize;
        let mut scrollbar_state = ScrollbarState::new(self.filtered.len())
            .position(self.selected)
            .viewport_content_length(viewport);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pwpick_core::catalog::{CatalogItem, ItemKind};

    use super::PaneTableState;

    fn item(title: &str, location: &str, tags: &[&str]) -> CatalogItem {
        CatalogItem {
            title: title.to_string(),
            location: location.to_string(),
            kind: ItemKind::Test,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            summary: String::new(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn filtering_matches_title_location_and_tags() {
        let items = vec![
            item("logs in", "auth.spec.ts:4", &["smoke"]),
            item("checks cart", "cart.spec.ts:9", &["slow"]),
        ];
        let mut state = PaneTableState::new(&items);

        state.on_filter_key(key(KeyCode::Char('c')), &items);
        state.on_filter_key(key(KeyCode::Char('a')), &items);
        state.on_filter_key(key(KeyCode::Char('r')), &items);
        state.on_filter_key(key(KeyCode::Char('t')), &items);
        assert_eq!(state.filtered_len(), 1);
        assert_eq!(state.selected_source_index(), Some(1));

        state.reset_filter(&items);
        assert_eq!(state.filtered_len(), 2);

        state.on_filter_key(key(KeyCode::Char('s')), &items);
        state.on_filter_key(key(KeyCode::Char('m')), &items);
        assert_eq!(state.filtered_len(), 1);
        assert_eq!(state.selected_source_index(), Some(0));
    }

    #[test]
    fn selection_clamps_when_filter_shrinks_the_view() {
        let items = vec![
            item("one", "a.spec.ts:1", &[]),
            item("two", "b.spec.ts:1", &[]),
        ];
        let mut state = PaneTableState::new(&items);
        state.move_down();
        assert_eq!(state.selected_source_index(), Some(1));

        state.on_filter_key(key(KeyCode::Char('o')), &items);
        state.on_filter_key(key(KeyCode::Char('n')), &items);
        assert_eq!(state.selected_source_index(), Some(0));
    }

    #[test]
    fn movement_stays_in_bounds() {
        let items = vec![
            item("one", "a.spec.ts:1", &[]),
            item("two", "b.spec.ts:1", &[]),
        ];
        let mut state = PaneTableState::new(&items);

        state.move_down();
        state.move_down();
        assert_eq!(state.selected_source_index(), Some(1));

        state.move_up();
        state.move_up();
        assert_eq!(state.selected_source_index(), Some(0));
    }

    #[test]
    fn empty_view_has_no_selection() {
        let items = vec![item("one", "a.spec.ts:1", &[])];
        let mut state = PaneTableState::new(&items);
        state.on_filter_key(key(KeyCode::Char('z')), &items);

        assert_eq!(state.filtered_len(), 0);
        assert!(state.selected_source_index().is_none());
    }
}
