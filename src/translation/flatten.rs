/*!
 * Flattening of a resource tree into translatable work items.
 *
 * Every translatable text becomes one `WorkItem`. Everything else ends up in
 * the `Skeleton`, which keeps the position of every source node so the
 * output tree can be rebuilt in source order once results are known.
 */

use std::collections::HashMap;

use log::{debug, warn};

use crate::app_config::TargetLanguage;
use crate::resources::{OutputItem, OutputNode, ResourceNode, ResourceTree};

/// Shape of the resource a work item was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkItemKind {
    /// Text of a `<string>`
    Leaf,
    /// `<item>` of a `<string-array>`
    OrderedElement,
    /// `<item quantity="...">` of a `<plurals>`
    KeyedElement,
}

/// One translatable text of the source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Unique within one language run
    pub id: String,
    pub kind: WorkItemKind,
    /// Resource name of the leaf, or of the group holding the element
    pub name: String,
    /// Decoded source text, never empty
    pub source_text: String,
    /// Group name for elements
    pub parent_name: Option<String>,
    /// Registry key of the skeleton container for elements
    pub container_key: Option<String>,
    /// Quantity of a keyed element
    pub quantity_key: Option<String>,
    /// Position of an ordered element inside its group
    pub index: Option<usize>,
}

impl WorkItem {
    /// Id derived from the resource position: `name`, `name[2]` or `name[one]`
    pub fn generate_id(
        name: &str,
        kind: WorkItemKind,
        index: Option<usize>,
        quantity_key: Option<&str>,
    ) -> String {
        match kind {
            WorkItemKind::Leaf => name.to_string(),
            WorkItemKind::OrderedElement => format!("{}[{}]", name, index.unwrap_or_default()),
            WorkItemKind::KeyedElement => format!("{}[{}]", name, quantity_key.unwrap_or_default()),
        }
    }

    pub fn is_element(&self) -> bool {
        self.kind != WorkItemKind::Leaf
    }
}

/// Kind of group container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Ordered,
    Keyed,
}

impl ContainerKind {
    pub fn of(kind: WorkItemKind) -> Self {
        match kind {
            WorkItemKind::KeyedElement => Self::Keyed,
            _ => Self::Ordered,
        }
    }
}

/// Position of one group element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSlot {
    /// Element already final, e.g. an empty source item
    Ready(OutputItem),
    /// Element waiting for the result of a work item
    Pending(String),
}

/// A group waiting to be filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDraft {
    pub name: String,
    pub kind: ContainerKind,
    /// Elements in source order; `(quantity, slot)` with an empty quantity for ordered groups
    pub elements: Vec<(String, ElementSlot)>,
}

impl ContainerDraft {
    pub fn new(name: impl Into<String>, kind: ContainerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            elements: Vec::new(),
        }
    }

    pub fn has_pending(&self, id: &str) -> bool {
        self.elements
            .iter()
            .any(|(_, slot)| matches!(slot, ElementSlot::Pending(pending) if pending == id))
    }
}

/// Position of one top-level output entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonSlot {
    /// Entry that needs no translation
    Ready(OutputNode),
    /// Leaf waiting for the result of the work item with this id
    Leaf(String),
    /// Group held in the container registry under this key
    Container(String),
}

/// Output tree with holes where translations go
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Skeleton {
    pub slots: Vec<SkeletonSlot>,
    /// Group containers by key
    pub containers: HashMap<String, ContainerDraft>,
}

/// Result of flattening a source tree for one language
#[derive(Debug, Clone, Default)]
pub struct FlattenedTree {
    /// Translatable texts in source order
    pub items: Vec<WorkItem>,
    pub skeleton: Skeleton,
}

/// Hands out unique keys, suffixing repeats with `#2`, `#3`...
#[derive(Default)]
struct UniqueKeys {
    seen: HashMap<String, usize>,
}

impl UniqueKeys {
    fn claim(&mut self, key: String, what: &str) -> String {
        let count = self.seen.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            key
        } else {
            let unique = format!("{}#{}", key, count);
            warn!("Duplicate {} '{}', keeping it as '{}'", what, key, unique);
            unique
        }
    }
}

struct Flattener<'a> {
    target: &'a TargetLanguage,
    items: Vec<WorkItem>,
    skeleton: Skeleton,
    ids: UniqueKeys,
    container_keys: UniqueKeys,
}

impl<'a> Flattener<'a> {
    fn new(target: &'a TargetLanguage) -> Self {
        Self {
            target,
            items: Vec::new(),
            skeleton: Skeleton::default(),
            ids: UniqueKeys::default(),
            container_keys: UniqueKeys::default(),
        }
    }

    fn ready(&mut self, node: OutputNode) {
        self.skeleton.slots.push(SkeletonSlot::Ready(node));
    }

    fn passthrough(&mut self, node: &ResourceNode) {
        self.ready(OutputNode::Passthrough(node.clone()));
    }

    fn visit(&mut self, node: &ResourceNode) {
        if let ResourceNode::Comment(text) = node {
            self.ready(OutputNode::Comment(text.clone()));
            return;
        }

        if node.name().is_none_or(str::is_empty) {
            warn!("[{}] Skipping <{}> without a 'name' attribute", self.target.code, node.tag());
            return;
        }

        if let ResourceNode::Unsupported { tag, name, .. } = node {
            if self.target.is_default {
                debug!("[{}] Copying unsupported <{} name=\"{}\"> as is", self.target.code, tag, name);
                self.passthrough(node);
            } else {
                warn!(
                    "[{}] Unsupported resource <{} name=\"{}\">, only copied into the default language",
                    self.target.code, tag, name
                );
            }
            return;
        }

        if !node.is_translatable() || !self.target.call_api {
            self.passthrough(node);
            return;
        }

        match node {
            ResourceNode::Leaf { name, value, .. } => {
                if value.is_empty() {
                    self.ready(OutputNode::Leaf {
                        name: name.clone(),
                        item: OutputItem::new(""),
                    });
                    return;
                }
                let id = self.ids.claim(
                    WorkItem::generate_id(name, WorkItemKind::Leaf, None, None),
                    "resource id",
                );
                self.items.push(WorkItem {
                    id: id.clone(),
                    kind: WorkItemKind::Leaf,
                    name: name.clone(),
                    source_text: value.text.clone(),
                    parent_name: None,
                    container_key: None,
                    quantity_key: None,
                    index: None,
                });
                self.skeleton.slots.push(SkeletonSlot::Leaf(id));
            }
            ResourceNode::OrderedGroup { name, items, .. } => {
                if items.iter().all(|item| item.is_empty()) {
                    self.ready(OutputNode::OrderedGroup {
                        name: name.clone(),
                        items: vec![OutputItem::new(""); items.len()],
                    });
                    return;
                }
                let elements = items
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (String::new(), Some(index), value.text.as_str()));
                self.group(name, ContainerKind::Ordered, elements);
            }
            ResourceNode::KeyedGroup { name, items, .. } => {
                if items.iter().all(|item| item.value.is_empty()) {
                    self.ready(OutputNode::KeyedGroup {
                        name: name.clone(),
                        items: items
                            .iter()
                            .map(|item| (item.quantity.clone(), OutputItem::new("")))
                            .collect(),
                    });
                    return;
                }
                let elements = items
                    .iter()
                    .map(|item| (item.quantity.clone(), None, item.value.text.as_str()));
                self.group(name, ContainerKind::Keyed, elements);
            }
            ResourceNode::Comment(_) | ResourceNode::Unsupported { .. } => {}
        }
    }

    fn group<'t, I>(&mut self, name: &str, kind: ContainerKind, elements: I)
    where
        I: Iterator<Item = (String, Option<usize>, &'t str)>,
    {
        let key = self.container_keys.claim(name.to_string(), "group name");
        let item_kind = match kind {
            ContainerKind::Ordered => WorkItemKind::OrderedElement,
            ContainerKind::Keyed => WorkItemKind::KeyedElement,
        };
        let mut draft = ContainerDraft::new(name, kind);

        for (quantity, index, text) in elements {
            if text.is_empty() {
                draft.elements.push((quantity, ElementSlot::Ready(OutputItem::new(""))));
                continue;
            }
            let quantity_key = (kind == ContainerKind::Keyed).then(|| quantity.clone());
            let id = self.ids.claim(
                WorkItem::generate_id(name, item_kind, index, quantity_key.as_deref()),
                "element id",
            );
            self.items.push(WorkItem {
                id: id.clone(),
                kind: item_kind,
                name: name.to_string(),
                source_text: text.to_string(),
                parent_name: Some(name.to_string()),
                container_key: Some(key.clone()),
                quantity_key,
                index,
            });
            draft.elements.push((quantity, ElementSlot::Pending(id)));
        }

        self.skeleton.containers.insert(key.clone(), draft);
        self.skeleton.slots.push(SkeletonSlot::Container(key));
    }
}

/// Flatten a source tree for one target language
///
/// With `call_api` off every named node is copied as is and no work items
/// are produced.
pub fn flatten(tree: &ResourceTree, target: &TargetLanguage) -> FlattenedTree {
    let mut flattener = Flattener::new(target);
    for node in &tree.nodes {
        flattener.visit(node);
    }
    debug!(
        "[{}] Flattened {} nodes into {} work items",
        target.code,
        tree.nodes.len(),
        flattener.items.len()
    );
    FlattenedTree {
        items: flattener.items,
        skeleton: flattener.skeleton,
    }
}
