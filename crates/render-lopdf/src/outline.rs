use folio_types::{OutlineEntry, OutlineKey};
use lopdf::{Document, Object, ObjectId, StringFormat, dictionary};
use std::collections::HashMap;

pub(crate) fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(|c| if c as u32 <= 255 { c as u8 } else { b'?' }).collect()
}

struct FlatOutlineItem {
    id: ObjectId,
    title: String,
    dest: Vec<Object>,
    parent_idx: Option<usize>,
}

struct NodeOutlineItem {
    id: ObjectId,
    title: String,
    dest: Vec<Object>,
    children: Vec<NodeOutlineItem>,
}

/// Writes the document outline for `entries` and returns the id of the root
/// `Outlines` dictionary, or `None` when no entry resolves to a page.
///
/// Entries are in reading order; an entry nests under the closest preceding
/// entry with a lower level. Entries whose key was never bookmarked are
/// skipped.
pub(crate) fn build_outlines(
    doc: &mut Document,
    entries: &[OutlineEntry],
    bookmarks: &HashMap<OutlineKey, usize>,
    page_ids: &[ObjectId],
    page_height: f32,
) -> Option<ObjectId> {
    let mut flat_list: Vec<FlatOutlineItem> = Vec::new();
    // (level, index into flat_list)
    let mut level_stack: Vec<(usize, usize)> = Vec::new();

    for entry in entries {
        let Some(&page) = bookmarks.get(&entry.key) else {
            log::warn!("Outline entry '{}' has no bookmarked page, skipping it.", entry.title);
            continue;
        };
        if page == 0 || page > page_ids.len() {
            log::warn!("Outline entry '{}' points at missing page {}.", entry.title, page);
            continue;
        }
        let dest = vec![Object::Reference(page_ids[page - 1]), "FitH".into(), page_height.into()];

        while level_stack.last().is_some_and(|&(level, _)| level >= entry.level) {
            level_stack.pop();
        }
        let parent_idx = level_stack.last().map(|&(_, idx)| idx);
        let new_idx = flat_list.len();
        let id = doc.new_object_id();
        log::debug!(
            "Outline node '{}' (level {}) -> page {}, object {:?}.",
            entry.title,
            entry.level,
            page,
            id
        );
        flat_list.push(FlatOutlineItem {
            id,
            title: entry.title.clone(),
            dest,
            parent_idx,
        });
        level_stack.push((entry.level, new_idx));
    }

    let mut children_map: HashMap<usize, Vec<NodeOutlineItem>> = HashMap::new();
    let mut root_items = Vec::new();
    for (i, flat_node) in flat_list.into_iter().enumerate().rev() {
        let mut children = children_map.remove(&i).unwrap_or_default();
        children.reverse();
        let node = NodeOutlineItem {
            id: flat_node.id,
            title: flat_node.title,
            dest: flat_node.dest,
            children,
        };
        match flat_node.parent_idx {
            Some(parent_idx) => children_map.entry(parent_idx).or_default().push(node),
            None => root_items.push(node),
        }
    }
    root_items.reverse();

    let (Some(first), Some(last)) = (root_items.first(), root_items.last()) else {
        return None;
    };
    let outline_root_id = doc.new_object_id();
    doc.objects.insert(
        outline_root_id,
        dictionary! {
            "Type" => "Outlines",
            "First" => first.id,
            "Last" => last.id,
            "Count" => root_items.len() as i64,
        }
        .into(),
    );
    write_outline_level(doc, &root_items, outline_root_id);
    Some(outline_root_id)
}

fn write_outline_level(doc: &mut Document, items: &[NodeOutlineItem], parent_id: ObjectId) {
    for (i, item) in items.iter().enumerate() {
        let mut dict = dictionary! {
            "Title" => Object::String(to_win_ansi(&item.title), StringFormat::Literal),
            "Parent" => parent_id,
            "Dest" => item.dest.clone(),
        };
        if i > 0 {
            dict.set("Prev", items[i - 1].id);
        }
        if let Some(next) = items.get(i + 1) {
            dict.set("Next", next.id);
        }
        if let (Some(first), Some(last)) = (item.children.first(), item.children.last()) {
            dict.set("First", first.id);
            dict.set("Last", last.id);
            // Closed by default.
            dict.set("Count", -(item.children.len() as i64));
            write_outline_level(doc, &item.children, item.id);
        }
        doc.objects.insert(item.id, dict.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, level: usize) -> OutlineEntry {
        OutlineEntry {
            title: title.to_string(),
            key: OutlineKey::new(title),
            level,
        }
    }

    fn count(doc: &Document, id: ObjectId) -> i64 {
        doc.get_object(id).unwrap().as_dict().unwrap().get(b"Count").unwrap().as_i64().unwrap()
    }

    #[test]
    fn nests_by_level() {
        let mut doc = Document::with_version("1.7");
        let page = doc.new_object_id();
        let entries = vec![entry("A", 0), entry("A.1", 1), entry("A.2", 1), entry("B", 0)];
        let bookmarks = entries.iter().map(|e| (e.key.clone(), 1)).collect();

        let root = build_outlines(&mut doc, &entries, &bookmarks, &[page], 800.0).unwrap();
        assert_eq!(count(&doc, root), 2);

        let first = doc.get_object(root).unwrap().as_dict().unwrap().get(b"First").unwrap().as_reference().unwrap();
        assert_eq!(count(&doc, first), -2);
    }

    #[test]
    fn unresolved_entries_are_skipped() {
        let mut doc = Document::with_version("1.7");
        let page = doc.new_object_id();
        let entries = vec![entry("A", 0)];
        assert!(build_outlines(&mut doc, &entries, &HashMap::new(), &[page], 800.0).is_none());
    }

    #[test]
    fn win_ansi_replaces_wide_chars() {
        assert_eq!(to_win_ansi("é→"), vec![0xE9, b'?']);
    }
}
