//! Flat widget arena indexed by [`WidgetId`].
//!
//! Ids are plain indices: slots can be empty, and a container may refer to
//! an id that was never filled. Lookups return `None` for such ids instead
//! of panicking, so callers can skip the missing entry and carry on.

use crate::error::{RenderError, Result};

use super::{ContainerData, Widget, WidgetId};

/// One child slot of a container: which widget sits where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildSlot {
    /// Position of the slot in the container's child sequence.
    pub index: usize,
    pub id: WidgetId,
    pub x: i32,
    pub y: i32,
}

impl ChildSlot {
    fn read(data: &ContainerData, index: usize) -> Option<ChildSlot> {
        if index >= data.slot_count() {
            return None;
        }
        Some(ChildSlot {
            index,
            id: data.children[index],
            x: data.child_x[index],
            y: data.child_y[index],
        })
    }
}

/// Iterator over a container's child slots, truncated to the shortest of
/// its three child sequences.
#[derive(Debug, Clone)]
pub struct ChildSlots<'a> {
    data: Option<&'a ContainerData>,
    next: usize,
}

impl Iterator for ChildSlots<'_> {
    type Item = ChildSlot;

    fn next(&mut self) -> Option<ChildSlot> {
        let slot = ChildSlot::read(self.data?, self.next)?;
        self.next += 1;
        Some(slot)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WidgetTable {
    slots: Vec<Option<Widget>>,
}

impl WidgetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `widget` at the slot named by its id, returning whatever was
    /// there before.
    pub fn insert(&mut self, widget: Widget) -> Option<Widget> {
        let index = widget.id.index();
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index].replace(widget)
    }

    pub fn remove(&mut self, id: WidgetId) -> Option<Widget> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Widgets that head an interface (no parent, or their own parent).
    pub fn roots(&self) -> impl Iterator<Item = &Widget> {
        self.iter().filter(|widget| widget.is_root())
    }

    /// Child slots of `parent`; empty if it is missing or not a container.
    pub fn children_of(&self, parent: WidgetId) -> ChildSlots<'_> {
        ChildSlots {
            data: self.get(parent).and_then(Widget::as_container),
            next: 0,
        }
    }

    /// Slot `index` of container `parent`, if both exist.
    pub fn child_slot(&self, parent: WidgetId, index: usize) -> Option<ChildSlot> {
        let data = self.get(parent)?.as_container()?;
        ChildSlot::read(data, index)
    }

    /// Check every container for mismatched child sequences and for child
    /// ids with no widget behind them. Reports the first problem found.
    pub fn validate(&self) -> Result<()> {
        for widget in self.iter() {
            let Some(data) = widget.as_container() else {
                continue;
            };
            if !data.is_well_formed() {
                return Err(RenderError::ChildArity {
                    widget: widget.id,
                    children: data.children.len(),
                    child_x: data.child_x.len(),
                    child_y: data.child_y.len(),
                });
            }
            if let Some(&child) = data.children.iter().find(|&&child| !self.contains(child)) {
                return Err(RenderError::DanglingChild {
                    parent: widget.id,
                    child,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<Widget> for WidgetTable {
    fn from_iter<I: IntoIterator<Item = Widget>>(iter: I) -> Self {
        let mut table = WidgetTable::new();
        table.extend(iter);
        table
    }
}

impl Extend<Widget> for WidgetTable {
    fn extend<I: IntoIterator<Item = Widget>>(&mut self, iter: I) {
        for widget in iter {
            self.insert(widget);
        }
    }
}
