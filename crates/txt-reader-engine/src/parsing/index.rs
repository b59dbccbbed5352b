use serde::Serialize;

/// Name of the synthetic root node.
pub const ROOT_NAME: &str = "索引";
/// Separator between ancestor names in a node's display path.
pub const PATH_SEPARATOR: &str = " -> ";

/// Index of a node in an [`IndexTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IndexId(usize);

/// One heading in the document index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexNode {
    pub name: String,
    /// `-1` for the synthetic root, `0..` for headings.
    pub level: i32,
    pub children: Vec<IndexId>,
    pub parent: Option<IndexId>,
    /// Position of the heading in the paragraph list.
    pub anchor: Option<usize>,
    /// Ancestor names joined with [`PATH_SEPARATOR`], ending with `name`.
    pub path: String,
}

/// The heading hierarchy of a document.
///
/// Nodes live in an arena; the synthetic root is always [`IndexTree::ROOT`]
/// and owns the top-level headings. Nodes are only ever added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTree {
    nodes: Vec<IndexNode>,
}

impl IndexTree {
    pub const ROOT: IndexId = IndexId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![IndexNode {
                name: ROOT_NAME.to_string(),
                level: -1,
                children: vec![],
                parent: None,
                anchor: None,
                path: String::new(),
            }],
        }
    }

    /// Adds a heading under `parent` and returns its id.
    pub fn attach(&mut self, parent: IndexId, name: &str, level: i32, anchor: usize) -> IndexId {
        let path = if parent == Self::ROOT {
            name.to_string()
        } else {
            format!("{}{PATH_SEPARATOR}{name}", self.nodes[parent.0].path)
        };
        let id = IndexId(self.nodes.len());
        self.nodes.push(IndexNode {
            name: name.to_string(),
            level,
            children: vec![],
            parent: Some(parent),
            anchor: Some(anchor),
            path,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: IndexId) -> &IndexNode {
        &self.nodes[id.0]
    }

    pub fn root(&self) -> &IndexNode {
        self.get(Self::ROOT)
    }

    pub fn children(&self, id: IndexId) -> &[IndexId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: IndexId) -> Option<IndexId> {
        self.nodes[id.0].parent
    }

    /// Number of headings, root excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deepest nesting below the root: 0 for an empty index.
    pub fn depth(&self) -> usize {
        self.walk().map(|(_, depth)| depth + 1).max().unwrap_or(0)
    }

    /// Depth-first pre-order over all headings with their depth below the
    /// root (top-level headings are at depth 0).
    pub fn walk(&self) -> impl Iterator<Item = (IndexId, usize)> + '_ {
        let mut stack: Vec<(IndexId, usize)> = self
            .children(Self::ROOT)
            .iter()
            .rev()
            .map(|&id| (id, 0))
            .collect();
        std::iter::from_fn(move || {
            let (id, depth) = stack.pop()?;
            stack.extend(self.children(id).iter().rev().map(|&c| (c, depth + 1)));
            Some((id, depth))
        })
    }

    /// Indented outline, one heading per line.
    ///
    /// Indentation follows the heading level; `▶` marks headings with
    /// children, `•` leaves.
    pub fn outline(&self) -> String {
        self.walk()
            .map(|(id, _)| {
                let node = self.get(id);
                let indent = "  ".repeat(usize::try_from(node.level).unwrap_or(0));
                let marker = if node.children.is_empty() { '•' } else { '▶' };
                format!("{indent}{marker} {}", node.name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for IndexTree {
    fn default() -> Self {
        Self::new()
    }
}
