mod node;

pub use node::{Element, Tag};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in &root.children {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    for child in &mut root.children {
        if let Some(found) = find_element_mut(child, id) {
            return Some(found);
        }
    }

    None
}

/// Chain of elements from `root` down to the element with `id` (inclusive).
/// Empty if the element is not in the tree.
pub fn find_path<'a>(root: &'a Element, id: &str) -> Vec<&'a Element> {
    let mut path = Vec::new();
    if collect_path(root, id, &mut path) {
        path
    } else {
        Vec::new()
    }
}

fn collect_path<'a>(element: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
    path.push(element);
    if element.id == id {
        return true;
    }
    for child in &element.children {
        if collect_path(child, id, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Nearest element, starting at `id` itself and walking up through its
/// ancestors, for which `predicate` holds.
pub fn closest<'a, F>(root: &'a Element, id: &str, predicate: F) -> Option<&'a Element>
where
    F: Fn(&Element) -> bool,
{
    find_path(root, id)
        .into_iter()
        .rev()
        .find(|element| predicate(element))
}

/// Every element in document order (pre-order).
pub fn walk(root: &Element) -> Vec<&Element> {
    let mut elements = Vec::new();
    let mut stack = vec![root];
    while let Some(element) = stack.pop() {
        elements.push(element);
        stack.extend(element.children.iter().rev());
    }
    elements
}
