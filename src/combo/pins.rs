use crate::models::MenuItem;

/// A pinned item and how many times it goes into the combo.
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedEntry {
    pub item: MenuItem,
    /// Always >= 1; an entry that would reach 0 is removed instead.
    pub count: u32,
}

/// Items the user pinned, in first-pin order, one entry per name.
#[derive(Debug, Clone, Default)]
pub struct PinRegistry {
    entries: Vec<PinnedEntry>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.item.name == name)
    }

    /// Pin an item, or bump its count if already pinned. Returns the new count.
    pub fn pin(&mut self, item: MenuItem) -> u32 {
        match self.position(&item.name) {
            Some(i) => {
                self.entries[i].count += 1;
                self.entries[i].count
            }
            None => {
                self.entries.push(PinnedEntry { item, count: 1 });
                1
            }
        }
    }

    /// Set an explicit count. Zero or below removes the entry; unknown names are ignored.
    pub fn set_count(&mut self, name: &str, new_count: i64) {
        let Some(i) = self.position(name) else {
            return;
        };
        if new_count <= 0 {
            self.entries.remove(i);
        } else {
            self.entries[i].count = u32::try_from(new_count).unwrap_or(u32::MAX);
        }
    }

    /// Remove an entry regardless of its count.
    pub fn unpin(&mut self, name: &str) -> Option<PinnedEntry> {
        self.position(name).map(|i| self.entries.remove(i))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, name: &str) -> Option<&PinnedEntry> {
        self.entries.iter().find(|e| e.item.name == name)
    }

    pub fn is_pinned(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn entries(&self) -> &[PinnedEntry] {
        &self.entries
    }

    /// Every pinned item repeated `count` times, in registry order.
    pub fn expanded(&self) -> Vec<MenuItem> {
        self.entries
            .iter()
            .flat_map(|e| std::iter::repeat_n(&e.item, e.count as usize).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
