//! Selection Tracker
//!
//! Partial selections share structure: every DP entry points at its newest
//! pick and every pick at the pick before it, so extending a selection never
//! copies it.

use std::iter;

use rustc_hash::FxHashSet;
use slotmap::{SlotMap, new_key_type};

use crate::{listings::ListingId, solvers::Pick};

new_key_type! {
    /// Selection node key
    pub(crate) struct SelectionKey;
}

#[derive(Debug, Clone, Copy)]
struct SelectionNode<'a> {
    pick: Pick<'a>,
    parent: Option<SelectionKey>,
}

/// Handle to one selection held in a [`SelectionArena`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Selection {
    tail: Option<SelectionKey>,
    len: usize,
}

impl Selection {
    /// Number of picks in the selection.
    pub(crate) fn len(self) -> usize {
        self.len
    }
}

/// Append-only storage for the picks of every partial selection.
#[derive(Debug, Default)]
pub(crate) struct SelectionArena<'a> {
    nodes: SlotMap<SelectionKey, SelectionNode<'a>>,
}

impl<'a> SelectionArena<'a> {
    /// Create an empty arena.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A new selection made of `selection` followed by `pick`.
    ///
    /// `selection` itself is left untouched and stays valid.
    pub(crate) fn extend(&mut self, selection: Selection, pick: Pick<'a>) -> Selection {
        let tail = self.nodes.insert(SelectionNode {
            pick,
            parent: selection.tail,
        });

        Selection {
            tail: Some(tail),
            len: selection.len + 1,
        }
    }

    /// Picks of a selection, newest first.
    pub(crate) fn picks(&self, selection: Selection) -> impl Iterator<Item = Pick<'a>> + '_ {
        iter::successors(
            selection.tail.and_then(|key| self.nodes.get(key)),
            |node| node.parent.and_then(|key| self.nodes.get(key)),
        )
        .map(|node| node.pick)
    }

    /// Identifiers already used by a selection.
    pub(crate) fn used_ids(&self, selection: Selection) -> FxHashSet<&'a ListingId> {
        self.picks(selection).map(|pick| pick.listing.id()).collect()
    }

    /// Picks of a selection in the order they were made.
    pub(crate) fn to_vec(&self, selection: Selection) -> Vec<Pick<'a>> {
        let mut picks: Vec<Pick<'a>> = Vec::with_capacity(selection.len);

        picks.extend(self.picks(selection));
        picks.reverse();

        picks
    }

    /// Number of picks stored across all selections.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}
