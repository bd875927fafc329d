//! Pure selection state over the flattened tree order.
//!
//! The engine only tracks ids; it never touches display state. Presentation
//! layers query `ids()` for highlighting and `active()` for the editable
//! node, and feed clicks (or their keyboard equivalents) through `click`.

/// Modifier flags accompanying a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
    };
}

/// The selection: an ordered id list without duplicates, plus the range
/// anchor (the id of the last plain click).
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: Vec<String>,
    anchor: Option<String>,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    /// Apply a click on `id`. `flat_order` is the full depth-first id order
    /// of the tree (collapsed folders included), which range selection is
    /// computed over.
    ///
    /// - plain: select only `id` and move the anchor there
    /// - ctrl: toggle `id`, anchor unchanged
    /// - shift: select the inclusive range between the anchor and `id` in
    ///   ascending tree order
    ///
    /// A shift click with an empty selection, or whose anchor has vanished
    /// from the tree, degrades to a plain click.
    pub fn click(&mut self, id: &str, mods: Modifiers, flat_order: &[String]) {
        if mods.ctrl {
            if let Some(pos) = self.selected.iter().position(|s| s == id) {
                self.selected.remove(pos);
            } else {
                self.selected.push(id.to_string());
            }
            return;
        }

        if mods.shift && !self.selected.is_empty() {
            let anchor_idx = self
                .anchor
                .as_deref()
                .and_then(|a| flat_order.iter().position(|s| s == a));
            let click_idx = flat_order.iter().position(|s| s == id);
            if let (Some(i), Some(j)) = (anchor_idx, click_idx) {
                let (start, end) = if i <= j { (i, j) } else { (j, i) };
                self.selected = flat_order[start..=end].to_vec();
                return;
            }
        }

        self.selected = vec![id.to_string()];
        self.anchor = Some(id.to_string());
    }

    /// Selected ids, in selection order (ranges come out in tree order).
    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// The single editable node: `Some` only when exactly one id is
    /// selected. Zero or several selected ids mean no node is authoritative
    /// for edits.
    pub fn active(&self) -> Option<&str> {
        match self.selected.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Select every id, in tree order. The anchor is left alone.
    pub fn select_all(&mut self, flat_order: &[String]) {
        self.selected = flat_order.to_vec();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the selection wholesale, dropping duplicates. Used for state
    /// restore; callers should `prune` against the live tree afterwards.
    pub fn restore(&mut self, ids: Vec<String>) {
        self.selected.clear();
        for id in ids {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }
        self.anchor = None;
    }

    /// Drop ids that no longer exist in the tree. Called after every
    /// mutation that can remove nodes; also invalidates a stale anchor.
    pub fn prune(&mut self, flat_order: &[String]) {
        self.selected.retain(|id| flat_order.contains(id));
        if self
            .anchor
            .as_ref()
            .is_some_and(|anchor| !flat_order.contains(anchor))
        {
            self.anchor = None;
        }
    }
}
