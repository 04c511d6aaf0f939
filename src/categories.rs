//! Categories
//!
//! Navigation menus are stored as a flat list of items pointing at their parent. The storefront
//! renders them as a forest ordered by display order at every level.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::documents::{Document, DocumentError, FromDocument, collections, fields};

/// A record that knows its place in a hierarchy.
pub trait TreeItem {
    /// Unique id
    fn id(&self) -> &str;

    /// Parent id, if any. Empty ids mean no parent.
    fn parent_id(&self) -> Option<&str>;

    /// Sort key among siblings, ascending
    fn display_order(&self) -> f64;
}

/// Navigation menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Item id
    pub id: String,

    /// Label
    pub name: String,

    /// Target path
    pub link: Option<String>,

    /// Parent item id
    pub parent_id: Option<String>,

    /// Sort key among siblings
    pub display_order: f64,
}

impl TreeItem for MenuItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    fn display_order(&self) -> f64 {
        self.display_order
    }
}

impl FromDocument for MenuItem {
    const COLLECTION: &'static str = collections::MENUS;

    fn from_document(document: &Document) -> Result<Self, DocumentError> {
        let fields = &document.fields;

        Ok(Self {
            id: document.id.clone(),
            name: fields::first_text(fields, &["name", "title"]),
            link: fields::optional_text(fields, "link"),
            parent_id: fields::optional_text(fields, "parentId"),
            display_order: fields::ordinal(fields, "displayOrder"),
        })
    }
}

/// A node in a built tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode<T> {
    /// The record
    pub item: T,

    /// Children, ordered by display order
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    /// Number of nodes in this subtree, including this one.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }

        count
    }

    /// Always false; a node contains at least itself.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Visit every node depth-first, parents before children, with its depth.
    pub fn walk<'a>(&'a self, depth: usize, visit: &mut impl FnMut(usize, &'a T)) {
        let mut pending = vec![(depth, self)];

        while let Some((depth, node)) = pending.pop() {
            visit(depth, &node.item);

            pending.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        }
    }
}

impl<T> Drop for TreeNode<T> {
    // Detach descendants one level at a time so deep chains do not drop recursively.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);

        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Build a display-ordered forest from flat items.
///
/// Items whose parent does not exist become roots. Items that can not be reached from any root,
/// because their parents form a cycle, are left out. Duplicate ids keep the first occurrence.
pub fn build_tree<T: TreeItem>(items: Vec<T>) -> Vec<TreeNode<T>> {
    let mut slots: Vec<Option<T>> = Vec::with_capacity(items.len());
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for item in items {
        if index.contains_key(item.id()) {
            warn!(id = item.id(), "ignoring duplicate tree item");
            continue;
        }

        index.insert(item.id().to_string(), slots.len());
        slots.push(Some(item));
    }

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); slots.len()];

    for (position, item) in slots.iter().enumerate() {
        let Some(item) = item else { continue };

        let parent = item
            .parent_id()
            .filter(|parent| !parent.is_empty())
            .and_then(|parent| index.get(parent).copied());

        match parent.and_then(|parent| children.get_mut(parent)) {
            Some(siblings) => siblings.push(position),
            None => roots.push(position),
        }
    }

    // Parents come before their children in `order`, so building it in reverse finds every
    // child already assembled.
    let mut order = Vec::with_capacity(slots.len());
    let mut pending: Vec<usize> = roots.iter().rev().copied().collect();

    while let Some(position) = pending.pop() {
        order.push(position);

        if let Some(positions) = children.get(position) {
            pending.extend(positions.iter().rev().copied());
        }
    }

    let mut built: Vec<Option<TreeNode<T>>> = std::iter::repeat_with(|| None)
        .take(slots.len())
        .collect();

    for &position in order.iter().rev() {
        let Some(item) = slots.get_mut(position).and_then(Option::take) else {
            continue;
        };

        let mut nodes: Vec<TreeNode<T>> = children
            .get(position)
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|&child| built.get_mut(child).and_then(Option::take))
                    .collect()
            })
            .unwrap_or_default();

        sort_level(&mut nodes);

        if let Some(slot) = built.get_mut(position) {
            *slot = Some(TreeNode {
                item,
                children: nodes,
            });
        }
    }

    let mut forest: Vec<TreeNode<T>> = roots
        .iter()
        .filter_map(|&root| built.get_mut(root).and_then(Option::take))
        .collect();

    sort_level(&mut forest);

    for item in slots.into_iter().flatten() {
        warn!(
            id = item.id(),
            parent = item.parent_id().unwrap_or_default(),
            "dropping tree item unreachable from any root"
        );
    }

    forest
}

fn sort_level<T: TreeItem>(nodes: &mut [TreeNode<T>]) {
    nodes.sort_by(|left, right| {
        left.item
            .display_order()
            .total_cmp(&right.item.display_order())
    });
}
