use crate::error::FieldPath;

/// Position of a node in the fixed four-level tree, by child index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Container,
    Row { row: usize },
    Column { row: usize, column: usize },
    Element { row: usize, column: usize, element: usize },
}

impl Location {
    /// Depth below the template root, matching [`crate::NodeKind::depth`]
    pub fn depth(&self) -> usize {
        match self {
            Location::Container => 0,
            Location::Row { .. } => 1,
            Location::Column { .. } => 2,
            Location::Element { .. } => 3,
        }
    }

    pub fn parent(&self) -> Option<Location> {
        match *self {
            Location::Container => None,
            Location::Row { .. } => Some(Location::Container),
            Location::Column { row, .. } => Some(Location::Row { row }),
            Location::Element { row, column, .. } => Some(Location::Column { row, column }),
        }
    }

    /// Index of the node within its parent's child list
    pub fn index(&self) -> Option<usize> {
        match *self {
            Location::Container => None,
            Location::Row { row } => Some(row),
            Location::Column { column, .. } => Some(column),
            Location::Element { element, .. } => Some(element),
        }
    }

    /// Location of the `index`-th child of this node, if this level has children
    pub fn child(&self, index: usize) -> Option<Location> {
        match *self {
            Location::Container => Some(Location::Row { row: index }),
            Location::Row { row } => Some(Location::Column { row, column: index }),
            Location::Column { row, column } => Some(Location::Element {
                row,
                column,
                element: index,
            }),
            Location::Element { .. } => None,
        }
    }

    /// Field path of the node inside a serialized template,
    /// e.g. `container.children[0].children[1]`
    pub fn path(&self) -> FieldPath {
        let container = FieldPath::root().field("container");
        match *self {
            Location::Container => container,
            Location::Row { row } => container.field("children").index(row),
            Location::Column { row, column } => container
                .field("children")
                .index(row)
                .field("children")
                .index(column),
            Location::Element { row, column, element } => container
                .field("children")
                .index(row)
                .field("children")
                .index(column)
                .field("children")
                .index(element),
        }
    }
}
