//! Ordered sequence of domain items backing an editable table.
//!
//! The model owns row order: either manual (stable until explicitly moved)
//! or sorted (recomputed by a comparator, optionally narrowed by a regex
//! filter over one designated column). Item equality doubles as the
//! duplicate-detection key, so the model never needs separate row ids.

use std::cmp::Ordering;

use regex::Regex;

/// One displayable column of a table model.
pub struct Column<T> {
    title: &'static str,
    text: Box<dyn Fn(&T) -> String>,
}

impl<T> Column<T> {
    pub fn new(title: &'static str, text: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            title,
            text: Box::new(text),
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn text(&self, item: &T) -> String {
        (self.text)(item)
    }
}

/// Row ordering policy.
pub enum RowOrder<T> {
    /// Fully user-controlled; rows move only via explicit swaps.
    Manual,
    /// Auto-ordered by a comparator; manual reordering is meaningless.
    Sorted(Box<dyn Fn(&T, &T) -> Ordering>),
}

/// Ordered sequence of items plus column metadata.
pub struct ListTableModel<T: Clone + PartialEq> {
    items: Vec<T>,
    columns: Vec<Column<T>>,
    order: RowOrder<T>,
    /// Column targeted by type-ahead search.
    search_column: usize,
    /// Column targeted by the regex filter (sorted models).
    filter_column: usize,
}

impl<T: Clone + PartialEq> ListTableModel<T> {
    /// Create a manually ordered model.
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            items: Vec::new(),
            columns,
            order: RowOrder::Manual,
            search_column: 0,
            filter_column: 0,
        }
    }

    /// Create a sorted model.
    pub fn sorted(
        columns: Vec<Column<T>>,
        cmp: impl Fn(&T, &T) -> Ordering + 'static,
    ) -> Self {
        Self {
            items: Vec::new(),
            columns,
            order: RowOrder::Sorted(Box::new(cmp)),
            search_column: 0,
            filter_column: 0,
        }
    }

    /// Set the column targeted by type-ahead search.
    pub fn with_search_column(mut self, column: usize) -> Self {
        self.search_column = column;
        self
    }

    /// Set the column targeted by the regex filter.
    pub fn with_filter_column(mut self, column: usize) -> Self {
        self.filter_column = column;
        self
    }

    pub fn is_sorted(&self) -> bool {
        matches!(self.order, RowOrder::Sorted(_))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn search_column(&self) -> usize {
        self.search_column
    }

    /// Replace the entire backing sequence.
    pub fn set_data(&mut self, items: Vec<T>) {
        self.items = items;
        self.resort();
    }

    /// Defensive copy of the current sequence in current model order.
    pub fn get_data(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Insert a new item and return the row it landed on.
    ///
    /// Manual order inserts immediately after `after` (or at the top when
    /// there is no selection); sorted order places the item at its
    /// comparator position.
    pub fn insert(&mut self, item: T, after: Option<usize>) -> usize {
        match &self.order {
            RowOrder::Manual => {
                let index = after.map(|i| (i + 1).min(self.items.len())).unwrap_or(0);
                self.items.insert(index, item);
                index
            }
            RowOrder::Sorted(_) => {
                self.items.push(item.clone());
                self.resort();
                self.position_of(&item).unwrap_or(self.items.len() - 1)
            }
        }
    }

    /// Replace the row at `index`, returning the old item and the row the
    /// replacement ended up on (may differ from `index` in sorted order).
    pub fn replace(&mut self, index: usize, item: T) -> (T, usize) {
        let old = std::mem::replace(&mut self.items[index], item.clone());
        if self.is_sorted() {
            self.resort();
            let new_index = self.position_of(&item).unwrap_or(index);
            (old, new_index)
        } else {
            (old, index)
        }
    }

    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    /// First row equal to `item`, by the item type's equality.
    pub fn position_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    /// Row holding a duplicate of `candidate`, ignoring `exclude` (the row
    /// being edited). `None` means the candidate is safe to commit.
    pub fn duplicate_of(&self, candidate: &T, exclude: Option<usize>) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .find(|(i, item)| Some(*i) != exclude && *item == candidate)
            .map(|(i, _)| i)
    }

    /// Rendered text of one cell.
    pub fn cell_text(&self, row: usize, column: usize) -> String {
        self.items
            .get(row)
            .map(|item| self.columns[column].text(item))
            .unwrap_or_default()
    }

    /// Rows visible under `filter`, as model indices in model order.
    pub fn visible_rows(&self, filter: Option<&Regex>) -> Vec<usize> {
        match filter {
            None => (0..self.items.len()).collect(),
            Some(re) => self
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| re.is_match(&self.columns[self.filter_column].text(item)))
                .map(|(i, _)| i)
                .collect(),
        }
    }

    fn resort(&mut self) {
        if let RowOrder::Sorted(cmp) = &self.order {
            self.items.sort_by(|a, b| cmp(a, b));
        }
    }
}
