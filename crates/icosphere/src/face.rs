//! Triangle faces and the subdivision forest.
//!
//! Faces live in one flat arena. Each of the 20 root faces owns a tree of
//! descendants through child indices, and the forest also keeps the current
//! leaf frontier so every subdivision pass is a plain loop over one array.

use crate::vertex_registry::VertexId;

/// Index of a face inside a [`FaceForest`].
pub type FaceId = u32;

/// A triangle in winding order, with either zero or four children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertices: [VertexId; 3],
    pub children: Option<[FaceId; 4]>,
}

impl Face {
    pub fn new(vertices: [VertexId; 3]) -> Self {
        Self {
            vertices,
            children: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The three edges `(v0,v1)`, `(v1,v2)`, `(v2,v0)`.
    pub fn edges(&self) -> [(VertexId, VertexId); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

/// Ordered root faces plus every descendant created by subdivision.
#[derive(Debug, Clone, Default)]
pub struct FaceForest {
    faces: Vec<Face>,
    roots: Vec<FaceId>,
    leaves: Vec<FaceId>,
    depth: u32,
}

impl FaceForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forest with room for `capacity` faces across all depths.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            faces: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Add a root face. Only valid before the first subdivision pass.
    pub fn add_root(&mut self, vertices: [VertexId; 3]) -> FaceId {
        debug_assert_eq!(self.depth, 0, "roots must be added before subdividing");
        let id = self.push(Face::new(vertices));
        self.roots.push(id);
        self.leaves.push(id);
        id
    }

    fn push(&mut self, face: Face) -> FaceId {
        let id = self.faces.len() as FaceId;
        self.faces.push(face);
        id
    }

    /// Attach four children to a leaf. Once split, a face stays internal.
    pub(crate) fn split(&mut self, parent: FaceId, children: [[VertexId; 3]; 4]) -> [FaceId; 4] {
        debug_assert!(self.faces[parent as usize].is_leaf(), "face {} split twice", parent);
        let ids = children.map(|vertices| self.push(Face::new(vertices)));
        self.faces[parent as usize].children = Some(ids);
        ids
    }

    /// Swap in the leaf frontier produced by a finished pass.
    pub(crate) fn advance(&mut self, leaves: Vec<FaceId>) {
        self.leaves = leaves;
        self.depth += 1;
    }

    pub fn get(&self, id: FaceId) -> &Face {
        &self.faces[id as usize]
    }

    pub fn roots(&self) -> &[FaceId] {
        &self.roots
    }

    /// Current leaves in breadth-first creation order.
    pub fn leaves(&self) -> &[FaceId] {
        &self.leaves
    }

    /// Number of completed subdivision passes.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Total faces, internal ones included.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Depth-first walk over the leaves, root by root, children in split order.
    pub fn leaves_depth_first(&self) -> LeavesDepthFirst<'_> {
        let mut stack: Vec<FaceId> = self.roots.clone();
        stack.reverse();
        LeavesDepthFirst {
            forest: self,
            stack,
        }
    }
}

/// Iterator returned by [`FaceForest::leaves_depth_first`].
///
/// Uses an explicit stack, so tree height never touches the call stack.
pub struct LeavesDepthFirst<'a> {
    forest: &'a FaceForest,
    stack: Vec<FaceId>,
}

impl<'a> Iterator for LeavesDepthFirst<'a> {
    type Item = &'a Face;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let face = self.forest.get(id);
            match face.children {
                None => return Some(face),
                Some(children) => self.stack.extend(children.iter().rev()),
            }
        }
        None
    }
}
