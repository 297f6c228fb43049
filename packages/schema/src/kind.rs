use crate::field::string_enum;

string_enum! {
    /// Discriminant tag of every node in a template tree
    pub enum NodeKind {
        Container => "container",
        Row => "row",
        Column => "column",
        Heading => "heading",
        Text => "text",
        Image => "image",
        Button => "button",
        Divider => "hr",
    }
}

impl NodeKind {
    /// Leaf content kinds, the only kinds a column may hold
    pub const LEAVES: &'static [NodeKind] = &[
        NodeKind::Heading,
        NodeKind::Text,
        NodeKind::Image,
        NodeKind::Button,
        NodeKind::Divider,
    ];

    pub fn is_leaf(&self) -> bool {
        Self::LEAVES.contains(self)
    }

    /// Depth below the template root (container = 0)
    pub fn depth(&self) -> usize {
        match self {
            NodeKind::Container => 0,
            NodeKind::Row => 1,
            NodeKind::Column => 2,
            NodeKind::Heading
            | NodeKind::Text
            | NodeKind::Image
            | NodeKind::Button
            | NodeKind::Divider => 3,
        }
    }

    /// Whether a node of this kind may directly hold a `child` node
    pub fn accepts(&self, child: NodeKind) -> bool {
        match self {
            NodeKind::Container => child == NodeKind::Row,
            NodeKind::Row => child == NodeKind::Column,
            NodeKind::Column => child.is_leaf(),
            NodeKind::Heading
            | NodeKind::Text
            | NodeKind::Image
            | NodeKind::Button
            | NodeKind::Divider => false,
        }
    }
}
