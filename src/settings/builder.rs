//! Constructors for authoring default fragments in code.
//!
//! Keys are quoted automatically; comments get a leading `# `.

use super::model::{
    Aggregate, AggregateKind, ChoiceGroup, Container, ContainerKind, DictEntry, Item, ListEntry,
    Value,
};

pub fn dict(items: impl IntoIterator<Item = Item>) -> Container {
    Container::from_items(ContainerKind::Dict, items)
}

pub fn list(items: impl IntoIterator<Item = Item>) -> Container {
    Container::from_items(ContainerKind::List, items)
}

/// `"key" : value`
pub fn entry(key: &str, value: impl Into<Value>) -> Item {
    Item::DictEntry(DictEntry::new(format!("\"{key}\""), value))
}

/// `"key" : value  # comment`
pub fn entry_with_comment(key: &str, value: impl Into<Value>, comment: &str) -> Item {
    let mut entry = DictEntry::new(format!("\"{key}\""), value);
    entry.comments.push(format!("# {comment}"));
    Item::DictEntry(entry)
}

pub fn list_entry(value: impl Into<Value>) -> Item {
    Item::ListEntry(ListEntry::new(value))
}

pub fn child(slot: usize) -> Item {
    Item::ChildPlaceholder(slot)
}

pub fn comment(text: &str) -> Item {
    Item::Comment(format!("# {text}"))
}

pub fn choice(defaults: Vec<Item>, alternatives: Vec<Item>) -> Item {
    Item::Choice(ChoiceGroup {
        defaults,
        alternatives,
    })
}

/// Solver block, hoisted into the global `Solvers` dict
pub fn solver(items: Vec<Item>) -> Item {
    Item::Aggregate(Aggregate {
        kind: AggregateKind::Solver,
        items,
    })
}

/// Mesh block, hoisted into the global `Meshes` dict
pub fn mesh(items: Vec<Item>) -> Item {
    Item::Aggregate(Aggregate {
        kind: AggregateKind::Mesh,
        items,
    })
}
