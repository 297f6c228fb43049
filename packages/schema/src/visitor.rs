use crate::kind::NodeKind;
use crate::location::Location;
use crate::node::NodeRef;
use crate::nodes::{Column, Container, Element, Row};
use crate::template::Template;
use std::collections::BTreeMap;

/// Visitor pattern for traversing a template tree immutably
///
/// Default implementations walk the whole tree depth first, container to
/// leaf. Override specific `visit_*` methods to act on nodes; call the
/// matching `walk_*` function to keep descending.
pub trait Visitor<'a>: Sized {
    fn visit_template(&mut self, template: &'a Template) {
        walk_template(self, template);
    }

    fn visit_container(&mut self, container: &'a Container) {
        walk_container(self, container);
    }

    fn visit_row(&mut self, location: Location, row: &'a Row) {
        walk_row(self, location, row);
    }

    fn visit_column(&mut self, location: Location, column: &'a Column) {
        walk_column(self, location, column);
    }

    fn visit_element(&mut self, _location: Location, _element: &'a Element) {
        // Leaf node, no children to walk
    }
}

pub fn walk_template<'a, V: Visitor<'a>>(visitor: &mut V, template: &'a Template) {
    visitor.visit_container(&template.container);
}

pub fn walk_container<'a, V: Visitor<'a>>(visitor: &mut V, container: &'a Container) {
    for (row_index, row) in container.children.iter().enumerate() {
        visitor.visit_row(Location::Row { row: row_index }, row);
    }
}

pub fn walk_row<'a, V: Visitor<'a>>(visitor: &mut V, location: Location, row: &'a Row) {
    for (index, column) in row.children.iter().enumerate() {
        if let Some(child) = location.child(index) {
            visitor.visit_column(child, column);
        }
    }
}

pub fn walk_column<'a, V: Visitor<'a>>(visitor: &mut V, location: Location, column: &'a Column) {
    for (index, element) in column.children.iter().enumerate() {
        if let Some(child) = location.child(index) {
            visitor.visit_element(child, element);
        }
    }
}

/// Collects every node in pre-order along with its location
#[derive(Default)]
pub struct NodeCollector<'a> {
    pub nodes: Vec<(Location, NodeRef<'a>)>,
}

impl<'a> Visitor<'a> for NodeCollector<'a> {
    fn visit_container(&mut self, container: &'a Container) {
        self.nodes.push((Location::Container, NodeRef::Container(container)));
        walk_container(self, container);
    }

    fn visit_row(&mut self, location: Location, row: &'a Row) {
        self.nodes.push((location, NodeRef::Row(row)));
        walk_row(self, location, row);
    }

    fn visit_column(&mut self, location: Location, column: &'a Column) {
        self.nodes.push((location, NodeRef::Column(column)));
        walk_column(self, location, column);
    }

    fn visit_element(&mut self, location: Location, element: &'a Element) {
        self.nodes.push((location, NodeRef::Element(element)));
    }
}

/// Tallies nodes per kind
#[derive(Debug, Default)]
pub struct KindCounter {
    pub counts: BTreeMap<&'static str, usize>,
}

impl KindCounter {
    fn record(&mut self, kind: NodeKind) {
        *self.counts.entry(kind.as_str()).or_insert(0) += 1;
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl<'a> Visitor<'a> for KindCounter {
    fn visit_container(&mut self, container: &'a Container) {
        self.record(NodeKind::Container);
        walk_container(self, container);
    }

    fn visit_row(&mut self, location: Location, row: &'a Row) {
        self.record(NodeKind::Row);
        walk_row(self, location, row);
    }

    fn visit_column(&mut self, location: Location, column: &'a Column) {
        self.record(NodeKind::Column);
        walk_column(self, location, column);
    }

    fn visit_element(&mut self, _location: Location, element: &'a Element) {
        self.record(element.kind());
    }
}
