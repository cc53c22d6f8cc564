mod node;

pub use node::{Element, InputType, Tag};

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

/// Collect the path of ancestors from the root down to (and including) the
/// element with the given ID.
pub(crate) fn path_to<'a>(root: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
    path.push(root);
    if root.id == id {
        return true;
    }

    for child in &root.children {
        if path_to(child, id, path) {
            return true;
        }
    }

    path.pop();
    false
}

/// Visit every descendant of `root` in document order (root excluded).
pub(crate) fn walk<'a>(root: &'a Element, out: &mut Vec<&'a Element>) {
    for child in &root.children {
        out.push(child);
        walk(child, out);
    }
}

/// Visit every descendant of `root` mutably, in document order.
pub(crate) fn walk_mut(root: &mut Element, f: &mut impl FnMut(&mut Element)) {
    for child in &mut root.children {
        f(child);
        walk_mut(child, f);
    }
}
