use crate::catalog::{CatalogItem, Catalogs, ItemKind};

/// The four interactive lists. Order matters: cycling moves through them in
/// declaration order, with Staging last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Tests,
    Files,
    Tags,
    Staging,
}

impl Pane {
    pub const ALL: [Pane; 4] = [Pane::Tests, Pane::Files, Pane::Tags, Pane::Staging];

    pub fn title(self) -> &'static str {
        match self {
            Self::Tests => "Tests",
            Self::Files => "Files",
            Self::Tags => "Tags",
            Self::Staging => "Staging",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Tests => 0,
            Self::Files => 1,
            Self::Tags => 2,
            Self::Staging => 3,
        }
    }

    fn from_index(index: usize) -> Pane {
        Self::ALL[index % Self::ALL.len()]
    }
}

fn home_pane(kind: ItemKind) -> Pane {
    match kind {
        ItemKind::Test => Pane::Tests,
        ItemKind::File => Pane::Files,
        ItemKind::Tag => Pane::Tags,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Staged(ItemKind),
    AlreadyStaged,
    Nothing,
}

type ItemKey = (String, String);

/// The multi-list selection state: three catalogs plus the staging list, a
/// focus pointer, and the original catalog orders captured at construction so
/// unstaged items can return to their original relative position.
#[derive(Debug)]
pub struct SelectionState {
    panes: [Vec<CatalogItem>; 4],
    focus: Pane,
    original_orders: [Vec<ItemKey>; 3],
}

impl SelectionState {
    pub fn new(catalogs: Catalogs) -> Self {
        let original_orders = [
            snapshot(&catalogs.tests),
            snapshot(&catalogs.files),
            snapshot(&catalogs.tags),
        ];

        Self {
            panes: [catalogs.tests, catalogs.files, catalogs.tags, Vec::new()],
            focus: Pane::Tests,
            original_orders,
        }
    }

    pub fn focus(&self) -> Pane {
        self.focus
    }

    pub fn staging_focused(&self) -> bool {
        self.focus == Pane::Staging
    }

    pub fn items(&self, pane: Pane) -> &[CatalogItem] {
        &self.panes[pane.index()]
    }

    pub fn cycle_forward(&mut self) {
        self.focus = Pane::from_index(self.focus.index() + 1);
    }

    pub fn cycle_backward(&mut self) {
        self.focus = Pane::from_index(self.focus.index() + Pane::ALL.len() - 1);
    }

    /// Moves the item at `index` in the focused catalog to the end of the
    /// staging list. A staged item with the same display title makes this a
    /// silent no-op, as does an out-of-range index or Staging focus.
    pub fn stage(&mut self, index: usize) -> StageOutcome {
        if self.staging_focused() {
            return StageOutcome::Nothing;
        }

        let pane = self.focus.index();
        let Some(item) = self.panes[pane].get(index) else {
            return StageOutcome::Nothing;
        };

        let title = item.title.clone();
        if self.panes[Pane::Staging.index()]
            .iter()
            .any(|staged| staged.title == title)
        {
            return StageOutcome::AlreadyStaged;
        }

        let item = self.panes[pane].remove(index);
        let kind = item.kind;
        self.panes[Pane::Staging.index()].push(item);
        StageOutcome::Staged(kind)
    }

    /// Removes the item at `index` from staging and reinserts it into its
    /// home catalog at its original relative position.
    pub fn unstage(&mut self, index: usize) -> Option<ItemKind> {
        if !self.staging_focused() || index >= self.panes[Pane::Staging.index()].len() {
            return None;
        }

        let item = self.panes[Pane::Staging.index()].remove(index);
        let kind = item.kind;
        let home = home_pane(kind);
        let original = &self.original_orders[home.index()];
        reinsert_in_original_position(&mut self.panes[home.index()], item, original);
        Some(kind)
    }

    /// The items a submit action would compile: the staging list when it holds
    /// anything, otherwise the single highlighted item of the focused catalog.
    /// Empty means the submit is a no-op.
    pub fn submit_items(&self, highlighted: Option<usize>) -> Vec<CatalogItem> {
        let staging = &self.panes[Pane::Staging.index()];
        if !staging.is_empty() {
            return staging.clone();
        }

        if self.staging_focused() {
            return Vec::new();
        }

        highlighted
            .and_then(|index| self.panes[self.focus.index()].get(index))
            .map(|item| vec![item.clone()])
            .unwrap_or_default()
    }
}

fn snapshot(catalog: &[CatalogItem]) -> Vec<ItemKey> {
    catalog
        .iter()
        .map(|item| (item.title.clone(), item.location.clone()))
        .collect()
}

/// Stable merge against the original order: insert before the first remaining
/// item whose original position is greater, or append when none is. Repeated
/// stage/unstage cycles on arbitrary subsets converge back to the original
/// catalog sequence.
fn reinsert_in_original_position(
    catalog: &mut Vec<CatalogItem>,
    item: CatalogItem,
    original: &[ItemKey],
) {
    let target = original_position(original, &item);
    let insert_at = catalog
        .iter()
        .position(|existing| original_position(original, existing) > target)
        .unwrap_or(catalog.len());
    catalog.insert(insert_at, item);
}

fn original_position(original: &[ItemKey], item: &CatalogItem) -> usize {
    original
        .iter()
        .position(|(title, location)| (title.as_str(), location.as_str()) == item.identity())
        .unwrap_or(0)
}
