//! Saved-request collections
//!
//! A folder tree of saved requests. These are pure tree operations; the
//! (out-of-scope) UI owns selection, drag-and-drop and naming flows.

use serde::{Deserialize, Serialize};

use crate::models::Request;

/// One node of the collections tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CollectionItem {
    Folder {
        id: String,
        name: String,
        #[serde(default)]
        parent_id: Option<String>,
        #[serde(default)]
        children: Vec<CollectionItem>,
    },
    Request {
        id: String,
        name: String,
        #[serde(default)]
        parent_id: Option<String>,
        request: Request,
    },
}

impl CollectionItem {
    pub fn id(&self) -> &str {
        match self {
            CollectionItem::Folder { id, .. } | CollectionItem::Request { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CollectionItem::Folder { name, .. } | CollectionItem::Request { name, .. } => name,
        }
    }
}

/// Find an item anywhere in the tree
pub fn find<'a>(items: &'a [CollectionItem], id: &str) -> Option<&'a CollectionItem> {
    for item in items {
        if item.id() == id {
            return Some(item);
        }
        if let CollectionItem::Folder { children, .. } = item {
            if let Some(found) = find(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Names from the root down to the item, inclusive
pub fn find_path(items: &[CollectionItem], id: &str) -> Option<Vec<String>> {
    for item in items {
        if item.id() == id {
            return Some(vec![item.name().to_string()]);
        }
        if let CollectionItem::Folder { name, children, .. } = item {
            if let Some(mut path) = find_path(children, id) {
                path.insert(0, name.clone());
                return Some(path);
            }
        }
    }
    None
}

/// Remove the item with the given id anywhere in the tree
///
/// Returns whether anything was removed.
pub fn remove_item(items: &mut Vec<CollectionItem>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    let mut removed = items.len() != before;
    for item in items.iter_mut() {
        if let CollectionItem::Folder { children, .. } = item {
            removed |= remove_item(children, id);
        }
    }
    removed
}

/// Replace the saved request of a request item
///
/// The item takes the request's name when it carries one. Returns whether
/// an item was updated.
pub fn update_request(items: &mut [CollectionItem], id: &str, updated: &Request) -> bool {
    for item in items.iter_mut() {
        match item {
            CollectionItem::Request {
                id: item_id,
                name,
                request,
                ..
            } if item_id.as_str() == id => {
                if let Some(new_name) = &updated.name {
                    *name = new_name.clone();
                }
                *request = updated.clone();
                return true;
            }
            CollectionItem::Folder { children, .. } => {
                if update_request(children, id, updated) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_item(id: &str, name: &str) -> CollectionItem {
        CollectionItem::Request {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: None,
            request: Request::new(),
        }
    }

    fn tree() -> Vec<CollectionItem> {
        vec![
            CollectionItem::Folder {
                id: "f1".to_string(),
                name: "Payments".to_string(),
                parent_id: None,
                children: vec![
                    request_item("r1", "Create charge"),
                    CollectionItem::Folder {
                        id: "f2".to_string(),
                        name: "Refunds".to_string(),
                        parent_id: Some("f1".to_string()),
                        children: vec![request_item("r2", "Issue refund")],
                    },
                ],
            },
            request_item("r3", "Health check"),
        ]
    }

    #[test]
    fn test_find_nested() {
        let items = tree();
        assert_eq!(find(&items, "r2").unwrap().name(), "Issue refund");
        assert!(find(&items, "missing").is_none());
    }

    #[test]
    fn test_find_path() {
        let items = tree();
        assert_eq!(
            find_path(&items, "r2").unwrap(),
            vec!["Payments", "Refunds", "Issue refund"]
        );
        assert_eq!(find_path(&items, "r3").unwrap(), vec!["Health check"]);
        assert!(find_path(&items, "missing").is_none());
    }

    #[test]
    fn test_remove_nested() {
        let mut items = tree();
        assert!(remove_item(&mut items, "r2"));
        assert!(find(&items, "r2").is_none());
        // the surrounding structure survives
        assert!(find(&items, "f2").is_some());
        assert!(!remove_item(&mut items, "r2"));
    }

    #[test]
    fn test_update_request_renames_item() {
        let mut items = tree();
        let mut updated = Request::new();
        updated.name = Some("Issue refund v2".to_string());
        assert!(update_request(&mut items, "r2", &updated));
        assert_eq!(find(&items, "r2").unwrap().name(), "Issue refund v2");
    }

    #[test]
    fn test_serde_tags() {
        let items = tree();
        let json = serde_json::to_string(&items).unwrap();
        assert!(json.contains(r#""type":"folder""#));
        assert!(json.contains(r#""type":"request""#));
        let back: Vec<CollectionItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, items);
    }
}
