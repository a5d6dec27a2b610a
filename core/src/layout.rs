//! Tree layout for drawing a [`PrefixIndex`] on a 2-D canvas.
//!
//! Depth gives the row. Leaves take consecutive columns in depth-first order
//! with children visited by ascending character; every inner node sits at the
//! mean column of its children. Only geometry is produced here.
use crate::trie::{NodeId, PrefixIndex};

/// Grid position of a node: `x` in leaf columns, `y` in levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: usize,
}

/// Extent of a layout in grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: usize,
    pub max_y: usize,
}

impl Bounds {
    /// Pixel rectangle `(left, top, right, bottom)` covering every node
    /// circle once grid units are scaled and offset by `margin`.
    pub fn to_canvas(
        &self,
        scale_x: f64,
        scale_y: f64,
        margin: f64,
        radius: f64,
    ) -> (f64, f64, f64, f64) {
        (
            self.min_x * scale_x + margin - radius,
            self.min_y as f64 * scale_y + margin - radius,
            self.max_x * scale_x + margin + radius,
            self.max_y as f64 * scale_y + margin + radius,
        )
    }
}

/// Positions for every node of a trie, indexed by [`NodeId`].
#[derive(Debug, Clone)]
pub struct TrieLayout {
    positions: Vec<Position>,
}

impl TrieLayout {
    /// Lay out `index`.
    ///
    /// # Example
    /// ```
    /// use autocomplete_core::{PrefixIndex, TrieLayout};
    ///
    /// let mut index = PrefixIndex::new();
    /// index.insert("ab");
    /// index.insert("ac");
    ///
    /// let layout = TrieLayout::compute(&index);
    /// let root = layout.position(index.root());
    /// assert_eq!(root.x, 0.5);
    /// assert_eq!(root.y, 0);
    /// ```
    pub fn compute(index: &PrefixIndex) -> Self {
        let mut positions = vec![Position { x: 0.0, y: 0 }; index.node_count()];
        let mut next_leaf = 0usize;
        place(index, index.root(), 0, &mut next_leaf, &mut positions);
        Self { positions }
    }

    pub fn position(&self, id: NodeId) -> Position {
        self.positions[id.index()]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Nodes in arena order with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Position)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &p)| (NodeId::from_index(i), p))
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: usize::MAX,
            max_y: 0,
        };
        for p in &self.positions {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        bounds
    }
}

fn place(
    index: &PrefixIndex,
    id: NodeId,
    depth: usize,
    next_leaf: &mut usize,
    positions: &mut [Position],
) -> f64 {
    let node = index.node(id);
    let x = if node.is_leaf() {
        let x = *next_leaf as f64;
        *next_leaf += 1;
        x
    } else {
        let mut sum = 0.0;
        for (_, child) in node.children() {
            sum += place(index, child, depth + 1, next_leaf, positions);
        }
        sum / node.child_count() as f64
    };
    positions[id.index()] = Position { x, y: depth };
    x
}
