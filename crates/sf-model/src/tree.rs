//! Validated views over component trees.
//!
//! Code generation walks the owned [`Component`] tree directly and trusts the
//! producer. The types here are for callers that want the invariants checked
//! at the construction boundary:
//!
//! - [`ComponentTree`] indexes an existing tree in a flat arena, rejects
//!   duplicate ids and finds components the markup never emits.
//! - [`assemble`] builds an owned tree from flat parent-linked records and
//!   rejects duplicates, dangling parents and cycles.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::Styles;
use crate::component::{Component, ComponentKind, Position, Size};
use crate::props::Props;

/// Error building a component tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("duplicate component id: {0}")]
    DuplicateId(String),
    #[error("component {id} references unknown parent {parent}")]
    UnknownParent { id: String, parent: String },
    #[error("component {0} is part of a parent cycle")]
    Cycle(String),
}

/// Arena index over a page's component tree.
///
/// Nodes are stored in pre-order; each node's children are kept as a list of
/// arena indices.
pub struct ComponentTree<'a> {
    nodes: Vec<&'a Component>,
    children: Vec<Vec<usize>>,
}

impl<'a> ComponentTree<'a> {
    /// Index `roots` and every descendant.
    ///
    /// Children of leaf kinds are indexed too: ids must be unique across the
    /// whole tree even where they are not rendered.
    pub fn new(roots: &'a [Component]) -> Result<Self, TreeError> {
        let mut tree = Self {
            nodes: Vec::new(),
            children: Vec::new(),
        };
        let mut seen = HashSet::new();

        let mut stack: Vec<(&'a Component, Option<usize>)> =
            roots.iter().rev().map(|c| (c, None)).collect();

        while let Some((node, parent)) = stack.pop() {
            if !seen.insert(node.id.as_str()) {
                return Err(TreeError::DuplicateId(node.id.clone()));
            }
            let idx = tree.nodes.len();
            tree.nodes.push(node);
            tree.children.push(Vec::new());
            if let Some(p) = parent {
                tree.children[p].push(idx);
            }
            stack.extend(node.children.iter().rev().map(|c| (c, Some(idx))));
        }

        Ok(tree)
    }

    /// Number of indexed components.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no components.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All components in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Component> + '_ {
        self.nodes.iter().copied()
    }

    /// `(parent, child)` pairs where the parent never emits the child: any
    /// child of a leaf kind, and children of a form other than its input
    /// controls. Parents come in pre-order.
    ///
    /// Descendants of a dropped child are not reported separately unless
    /// their own parent drops them.
    pub fn unrendered(&self) -> impl Iterator<Item = (&'a Component, &'a Component)> + '_ {
        self.nodes
            .iter()
            .zip(&self.children)
            .flat_map(move |(&parent, kids)| {
                kids.iter()
                    .map(move |&i| (parent, self.nodes[i]))
                    .filter(|(parent, child)| !emits(parent, child))
            })
    }
}

fn emits(parent: &Component, child: &Component) -> bool {
    match parent.kind {
        ComponentKind::Form => child.kind.is_form_control(),
        ref kind => kind.accepts_children(),
    }
}

/// Flat, parent-linked form of a component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub styles: Styles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Parent id; `None` for roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl ComponentRecord {
    fn into_component(self) -> Component {
        Component {
            id: self.id,
            kind: self.kind,
            name: self.name,
            props: self.props,
            children: Vec::new(),
            styles: self.styles,
            position: self.position,
            size: self.size,
        }
    }
}

/// Build an owned component tree from flat records.
///
/// Sibling order follows record order. Returns the roots.
pub fn assemble(records: Vec<ComponentRecord>) -> Result<Vec<Component>, TreeError> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if index.insert(record.id.as_str(), i).is_some() {
            return Err(TreeError::DuplicateId(record.id.clone()));
        }
    }

    let mut parents: Vec<Option<usize>> = Vec::with_capacity(records.len());
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    for (i, record) in records.iter().enumerate() {
        match &record.parent {
            None => {
                parents.push(None);
                roots.push(i);
            }
            Some(parent) => {
                let &p = index
                    .get(parent.as_str())
                    .ok_or_else(|| TreeError::UnknownParent {
                        id: record.id.clone(),
                        parent: parent.clone(),
                    })?;
                parents.push(Some(p));
                children[p].push(i);
            }
        }
    }

    // Every node has exactly one parent, so a node unreachable from the
    // roots sits below a cycle.
    let mut reached = vec![false; records.len()];
    let mut stack = roots.clone();
    while let Some(i) = stack.pop() {
        reached[i] = true;
        stack.extend(&children[i]);
    }
    if let Some(start) = reached.iter().position(|r| !r) {
        let member = find_cycle_member(start, &parents);
        return Err(TreeError::Cycle(records[member].id.clone()));
    }

    let mut slots: Vec<Option<Component>> = records
        .into_iter()
        .map(|r| Some(r.into_component()))
        .collect();
    Ok(roots
        .iter()
        .filter_map(|&i| build(i, &mut slots, &children))
        .collect())
}

/// Walk parent links from `start` until a node repeats.
fn find_cycle_member(start: usize, parents: &[Option<usize>]) -> usize {
    let mut seen = HashSet::new();
    let mut current = start;
    while seen.insert(current) {
        match parents[current] {
            Some(parent) => current = parent,
            None => break,
        }
    }
    current
}

fn build(idx: usize, slots: &mut [Option<Component>], children: &[Vec<usize>]) -> Option<Component> {
    let mut node = slots[idx].take()?;
    node.children = children[idx]
        .iter()
        .filter_map(|&c| build(c, slots, children))
        .collect();
    Some(node)
}
