//! Page tree assembly.
//!
//! Every input page is re-parented directly under one root `Pages` node.
//! Attributes a page used to inherit from its original ancestors are copied
//! onto the page first, so it renders the same once those ancestors are gone.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

/// Page attributes that may be inherited from `Pages` ancestors.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Builds a merged document one source at a time.
pub(crate) struct PageTreeAssembler {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl PageTreeAssembler {
    pub(crate) fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Number of pages appended so far.
    pub(crate) fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Move every page of `source` to the end of the merged page list.
    ///
    /// Returns the number of pages appended. `source` is consumed so its
    /// objects are moved rather than copied.
    pub(crate) fn append(&mut self, mut source: Document) -> lopdf::Result<usize> {
        source.renumber_objects_with(self.document.max_id + 1);

        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
        let mut pages = Vec::with_capacity(page_ids.len());
        for &page_id in &page_ids {
            pages.push((page_id, flatten_page(&source, page_id)?));
        }

        let max_id = source.max_id;
        for (id, object) in source.objects {
            if !is_tree_node(&object) {
                self.document.objects.insert(id, object);
            }
        }

        // Replaces the original page objects copied above.
        for (id, mut page) in pages {
            page.set("Parent", self.pages_id);
            self.document.objects.insert(id, Object::Dictionary(page));
            self.kids.push(Object::Reference(id));
        }

        self.document.max_id = self.document.max_id.max(max_id);
        Ok(page_ids.len())
    }

    /// Close the page tree, attach a catalog and drop unreachable objects.
    pub(crate) fn finish(self) -> Document {
        let Self {
            mut document,
            pages_id,
            kids,
        } = self;

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let pruned = document.prune_objects();
        tracing::trace!(pruned = pruned.len(), "dropped unreachable objects");
        document.renumber_objects();
        document
    }
}

/// Clone a page dictionary with its inherited attributes made explicit.
fn flatten_page(source: &Document, page_id: ObjectId) -> lopdf::Result<Dictionary> {
    let mut page = source.get_dictionary(page_id)?.clone();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(node_id) = parent {
        depth += 1;
        if depth > MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = source.get_dictionary(node_id) else {
            break;
        };
        for key in INHERITABLE_ATTRIBUTES {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key, value.clone());
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(page)
}

/// Catalog and `Pages` nodes are rebuilt for the output, never copied.
fn is_tree_node(object: &Object) -> bool {
    match object {
        Object::Dictionary(dict) => matches!(
            dict.get(b"Type"),
            Ok(Object::Name(name)) if name.as_slice() == b"Pages" || name.as_slice() == b"Catalog"
        ),
        _ => false,
    }
}
