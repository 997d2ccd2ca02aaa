/*!
 * Output tree assembly.
 *
 * Fills the skeleton of a flattened tree with reconciled results. Texts come
 * out of the result map already escaped and are used as they are.
 */

use std::collections::HashMap;

use log::warn;

use crate::resources::{OutputItem, OutputNode, OutputTree};
use crate::translation::flatten::{
    ContainerDraft, ContainerKind, ElementSlot, Skeleton, SkeletonSlot, WorkItem,
};
use crate::translation::formatting::escape_android;
use crate::translation::reconcile::TranslationResult;

/// Comment attached to every element whose translation failed
pub const FAILURE_ANNOTATION: &str = "TODO: Translation failed";

fn output_item(item: Option<&WorkItem>, result: Option<&TranslationResult>) -> OutputItem {
    match (result, item) {
        (Some(result), _) if result.succeeded => OutputItem::new(result.text.clone()),
        (Some(result), _) => OutputItem::failed(result.text.clone(), FAILURE_ANNOTATION),
        // No result at all: fall back to the source text
        (None, Some(item)) => OutputItem::failed(escape_android(&item.source_text), FAILURE_ANNOTATION),
        (None, None) => OutputItem::failed("", FAILURE_ANNOTATION),
    }
}

fn container_node(draft: ContainerDraft, resolve: impl Fn(&str) -> OutputItem) -> OutputNode {
    let elements = draft.elements.into_iter().map(|(quantity, slot)| {
        let item = match slot {
            ElementSlot::Ready(item) => item,
            ElementSlot::Pending(id) => resolve(&id),
        };
        (quantity, item)
    });

    match draft.kind {
        ContainerKind::Ordered => OutputNode::OrderedGroup {
            name: draft.name,
            items: elements.map(|(_, item)| item).collect(),
        },
        ContainerKind::Keyed => OutputNode::KeyedGroup {
            name: draft.name,
            items: elements.collect(),
        },
    }
}

/// Build the output tree of one language
///
/// Elements whose container is missing from the skeleton get a container
/// created on the spot, appended after the existing entries.
pub fn build(
    language: &str,
    mut skeleton: Skeleton,
    items: &[WorkItem],
    results: &HashMap<String, TranslationResult>,
) -> OutputTree {
    for item in items.iter().filter(|item| item.is_element()) {
        let key = item.container_key.clone().unwrap_or_else(|| item.name.clone());
        let draft = skeleton.containers.entry(key.clone()).or_insert_with(|| {
            warn!(
                "[{}] Container '{}' not found for element '{}', creating it",
                language, key, item.id
            );
            skeleton.slots.push(SkeletonSlot::Container(key.clone()));
            ContainerDraft::new(
                item.parent_name.clone().unwrap_or_else(|| item.name.clone()),
                ContainerKind::of(item.kind),
            )
        });
        if !draft.has_pending(&item.id) {
            let quantity = item.quantity_key.clone().unwrap_or_default();
            draft.elements.push((quantity, ElementSlot::Pending(item.id.clone())));
        }
    }

    let by_id: HashMap<&str, &WorkItem> = items.iter().map(|item| (item.id.as_str(), item)).collect();
    let resolve = |id: &str| output_item(by_id.get(id).copied(), results.get(id));

    let mut tree = OutputTree::new(language);
    for slot in skeleton.slots {
        match slot {
            SkeletonSlot::Ready(node) => tree.nodes.push(node),
            SkeletonSlot::Leaf(id) => {
                let name = by_id.get(id.as_str()).map_or_else(|| id.clone(), |item| item.name.clone());
                tree.nodes.push(OutputNode::Leaf {
                    name,
                    item: resolve(&id),
                });
            }
            SkeletonSlot::Container(key) => match skeleton.containers.remove(&key) {
                Some(draft) => tree.nodes.push(container_node(draft, &resolve)),
                None => warn!("[{}] Container '{}' was already emitted", language, key),
            },
        }
    }
    tree
}
