//! Settings document tree.
//!
//! A [`Container`] is an ordered sequence of [`Item`]s. Containers produced by
//! the parser remember the exact text they were parsed from; as long as a
//! container and every container nested in it are untouched, rendering emits
//! that text unchanged. Any mutable access to a container's items drops its
//! remembered text, so only the edited part is re-rendered in canonical form.

// ============================================================================
// VALUES AND ITEMS
// ============================================================================

/// Whether a container is a dict (`{...}`) or a list (`[...]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Dict,
    List,
}

impl ContainerKind {
    pub fn delimiters(self) -> (char, char) {
        match self {
            ContainerKind::Dict => ('{', '}'),
            ContainerKind::List => ('[', ']'),
        }
    }
}

/// The value of an entry
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text the document model does not interpret (numbers, expressions, calls)
    Literal(String),
    Container(Container),
    Conditional(Box<Conditional>),
}

impl Value {
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Value::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Value::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Value::Literal(text) => Some(text),
            _ => None,
        }
    }

    fn is_pristine(&self) -> bool {
        match self {
            Value::Literal(_) => true,
            Value::Container(container) => container.is_pristine(),
            Value::Conditional(conditional) => {
                conditional.if_value.is_pristine() && conditional.else_value.is_pristine()
            }
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Literal(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Literal(text)
    }
}

impl From<Container> for Value {
    fn from(container: Container) -> Self {
        Value::Container(container)
    }
}

/// `if_value if condition else else_value`
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub if_value: Value,
    pub condition: String,
    pub else_value: Value,
}

/// `key : value` inside a dict; the key keeps its original quoting
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    pub key: String,
    pub value: Value,
    /// Trailing comments, each including its leading `#`
    pub comments: Vec<String>,
}

impl DictEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comments: Vec::new(),
        }
    }

    /// The key with one layer of matching quotes removed
    pub fn name(&self) -> &str {
        unquote(&self.key)
    }
}

/// A value inside a list
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub value: Value,
    pub comments: Vec<String>,
}

impl ListEntry {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            comments: Vec::new(),
        }
    }
}

/// Two mutually exclusive entry sets of a default fragment
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceGroup {
    pub defaults: Vec<Item>,
    pub alternatives: Vec<Item>,
}

/// Kind of a named aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Solver,
    Mesh,
}

impl AggregateKind {
    /// Key of the global dict the aggregate is hoisted into
    pub fn global_key(self) -> &'static str {
        match self {
            AggregateKind::Solver => "Solvers",
            AggregateKind::Mesh => "Meshes",
        }
    }

    /// Key referencing the hoisted aggregate by name
    pub fn name_key(self) -> &'static str {
        match self {
            AggregateKind::Solver => "solverName",
            AggregateKind::Mesh => "meshName",
        }
    }

    /// Prefix of generated names (`solver0`, `mesh0`, ...)
    pub fn name_prefix(self) -> &'static str {
        match self {
            AggregateKind::Solver => "solver",
            AggregateKind::Mesh => "mesh",
        }
    }
}

/// A block that lives either inline or in the global `Solvers`/`Meshes` dict
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub kind: AggregateKind,
    pub items: Vec<Item>,
}

impl Aggregate {
    /// Name of the first entry; its presence decides inline placement
    pub fn first_key(&self) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            Item::DictEntry(entry) => Some(entry.name()),
            _ => None,
        })
    }
}

/// One element of a container
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    DictEntry(DictEntry),
    ListEntry(ListEntry),
    Comment(String),
    EmptyLine,
    ChildPlaceholder(usize),
    Choice(ChoiceGroup),
    Aggregate(Aggregate),
}

impl Item {
    pub fn is_entry(&self) -> bool {
        matches!(self, Item::DictEntry(_) | Item::ListEntry(_))
    }

    pub fn comments_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Item::DictEntry(entry) => Some(&mut entry.comments),
            Item::ListEntry(entry) => Some(&mut entry.comments),
            _ => None,
        }
    }

    fn value(&self) -> Option<&Value> {
        match self {
            Item::DictEntry(entry) => Some(&entry.value),
            Item::ListEntry(entry) => Some(&entry.value),
            _ => None,
        }
    }

    fn container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Item::DictEntry(entry) => entry.value.as_container_mut(),
            Item::ListEntry(entry) => entry.value.as_container_mut(),
            _ => None,
        }
    }
}

// ============================================================================
// CONTAINER
// ============================================================================

/// An ordered dict or list of items
#[derive(Debug, Clone)]
pub struct Container {
    kind: ContainerKind,
    items: Vec<Item>,
    comprehension: Option<String>,
    raw: Option<String>,
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.comprehension == other.comprehension
            && self.items == other.items
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::dict()
    }
}

impl Container {
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            comprehension: None,
            raw: None,
        }
    }

    pub fn dict() -> Self {
        Self::new(ContainerKind::Dict)
    }

    pub fn list() -> Self {
        Self::new(ContainerKind::List)
    }

    pub fn from_items(kind: ContainerKind, items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Self::new(kind)
        }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn is_dict(&self) -> bool {
        self.kind == ContainerKind::Dict
    }

    pub fn is_list(&self) -> bool {
        self.kind == ContainerKind::List
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Mutable access to the items; the container is re-rendered afterwards.
    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        self.raw = None;
        &mut self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn push(&mut self, item: Item) {
        self.items_mut().push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items_mut().extend(items);
    }

    pub fn clear(&mut self) {
        self.items_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// List-comprehension suffix (`for i in range(3)`) of a list
    pub fn comprehension(&self) -> Option<&str> {
        self.comprehension.as_deref()
    }

    pub fn set_comprehension(&mut self, comprehension: Option<String>) {
        self.raw = None;
        self.comprehension = comprehension;
    }

    /// Text this container was parsed from, if it is still valid
    pub fn source_text(&self) -> Option<&str> {
        if self.is_pristine() {
            self.raw.as_deref()
        } else {
            None
        }
    }

    pub(crate) fn set_source_text(&mut self, raw: String) {
        self.raw = Some(raw);
    }

    /// True while this container and all nested containers are unmodified
    /// since parsing.
    pub fn is_pristine(&self) -> bool {
        self.raw.is_some()
            && self
                .items
                .iter()
                .filter_map(Item::value)
                .all(Value::is_pristine)
    }

    /// A new container of the same kind and comprehension, without items
    pub fn emptied(&self) -> Container {
        Container {
            kind: self.kind,
            items: Vec::new(),
            comprehension: self.comprehension.clone(),
            raw: None,
        }
    }

    /// A plain copy: choice groups are replaced by their defaults and
    /// aggregates are inlined, at every depth
    pub fn materialized(&self) -> Container {
        let mut items = Vec::with_capacity(self.items.len());
        materialize_into(&self.items, &mut items);
        Container {
            items,
            ..self.emptied()
        }
    }

    // ------------------------------------------------------------------------
    // Key lookup
    // ------------------------------------------------------------------------

    /// Dict entries at this level
    pub fn entries(&self) -> impl Iterator<Item = &DictEntry> {
        self.items.iter().filter_map(|item| match item {
            Item::DictEntry(entry) => Some(entry),
            _ => None,
        })
    }

    pub fn has_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Find an entry by key, ignoring the key's quote style
    pub fn get(&self, name: &str) -> Option<&DictEntry> {
        let name = unquote(name);
        self.entries().find(|entry| entry.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut DictEntry> {
        let name = unquote(name);
        let index = self.items.iter().position(|item| match item {
            Item::DictEntry(entry) => entry.name() == name,
            _ => false,
        })?;
        match self.items_mut().get_mut(index) {
            Some(Item::DictEntry(entry)) => Some(entry),
            _ => None,
        }
    }

    pub fn first_list_entry(&self) -> Option<&ListEntry> {
        self.items.iter().find_map(|item| match item {
            Item::ListEntry(entry) => Some(entry),
            _ => None,
        })
    }

    // ------------------------------------------------------------------------
    // Child placeholders
    // ------------------------------------------------------------------------

    /// Slot indices of the child placeholders at this level, in order
    pub fn child_placeholders(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Item::ChildPlaceholder(slot) => Some(*slot),
                _ => None,
            })
            .collect()
    }

    pub fn has_child_placeholder(&self, slot: usize) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, Item::ChildPlaceholder(s) if *s == slot))
    }

    /// Splice the items of `child` in place of the first child placeholder
    /// (depth-first, pre-order). Returns whether a placeholder was found.
    pub fn replace_child_placeholder(&mut self, child: &Container) -> bool {
        self.replace_child_placeholder_where(|_| true, child)
    }

    /// Like [`Container::replace_child_placeholder`], restricted to
    /// placeholders tagged with `slot`.
    pub fn replace_child_placeholder_at(&mut self, slot: usize, child: &Container) -> bool {
        self.replace_child_placeholder_where(|tagged| tagged == slot, child)
    }

    /// Like [`Container::replace_child_placeholder`], restricted to
    /// placeholders whose slot satisfies `accept`.
    pub fn replace_child_placeholder_where(
        &mut self,
        accept: impl Fn(usize) -> bool,
        child: &Container,
    ) -> bool {
        self.splice_placeholder(&accept, child)
    }

    fn splice_placeholder(&mut self, accept: &dyn Fn(usize) -> bool, child: &Container) -> bool {
        for index in 0..self.items.len() {
            let matches = match &self.items[index] {
                Item::ChildPlaceholder(slot) => accept(*slot),
                _ => false,
            };
            if matches {
                self.items_mut()
                    .splice(index..=index, child.items.iter().cloned());
                return true;
            }
            if let Some(nested) = self.items[index].container_mut() {
                if nested.splice_placeholder(accept, child) {
                    return true;
                }
            }
        }
        false
    }

    /// Remove every child placeholder, recursively
    pub fn remove_child_placeholders(&mut self) {
        if self.items.iter().any(|item| matches!(item, Item::ChildPlaceholder(_))) {
            self.items_mut()
                .retain(|item| !matches!(item, Item::ChildPlaceholder(_)));
        }
        for item in &mut self.items {
            if let Some(nested) = item.container_mut() {
                nested.remove_child_placeholders();
            }
        }
    }
}

fn materialize_into(items: &[Item], out: &mut Vec<Item>) {
    for item in items {
        match item {
            Item::Choice(group) => materialize_into(&group.defaults, out),
            Item::Aggregate(aggregate) => materialize_into(&aggregate.items, out),
            Item::DictEntry(entry) => out.push(Item::DictEntry(DictEntry {
                key: entry.key.clone(),
                value: materialize_value(&entry.value),
                comments: entry.comments.clone(),
            })),
            Item::ListEntry(entry) => out.push(Item::ListEntry(ListEntry {
                value: materialize_value(&entry.value),
                comments: entry.comments.clone(),
            })),
            other => out.push(other.clone()),
        }
    }
}

fn materialize_value(value: &Value) -> Value {
    match value {
        Value::Container(container) => Value::Container(container.materialized()),
        other => other.clone(),
    }
}

/// Strip one layer of matching single or double quotes
pub fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &text[1..text.len() - 1];
        }
    }
    text
}
