//! Authored and expanded forms of registry entries.

use crate::settings::Container;
use indexmap::IndexSet;
use smol_str::SmolStr;

// ============================================================================
// AUTHORED FORM
// ============================================================================

/// One template-argument slot as written in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSpec {
    pub description: String,
    /// Class names and markers
    pub items: Vec<SmolStr>,
}

impl SlotSpec {
    pub fn new(description: impl Into<String>, items: &[&str]) -> Self {
        Self {
            description: description.into(),
            items: items.iter().map(|item| SmolStr::new(item)).collect(),
        }
    }
}

/// A template class as written in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSpec {
    pub name: SmolStr,
    /// `None` means the class takes no template arguments at all, so even
    /// `Name<>` is invalid
    pub template_arguments: Option<Vec<SlotSpec>>,
    /// Minimum number of filled slots; all of them when `None`
    pub template_arguments_needed: Option<usize>,
    pub runnable: bool,
    pub discretizable_in_time: bool,
    pub time_stepping_scheme: bool,
    pub defaults: Option<Container>,
}

impl ClassSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            template_arguments: None,
            template_arguments_needed: None,
            runnable: false,
            discretizable_in_time: false,
            time_stepping_scheme: false,
            defaults: None,
        }
    }

    pub fn runnable(mut self) -> Self {
        self.runnable = true;
        self
    }

    pub fn discretizable_in_time(mut self) -> Self {
        self.discretizable_in_time = true;
        self
    }

    pub fn time_stepping_scheme(mut self) -> Self {
        self.time_stepping_scheme = true;
        self
    }

    /// Append a slot; also marks the class as taking template arguments
    pub fn slot(mut self, description: &str, items: &[&str]) -> Self {
        self.template_arguments
            .get_or_insert_with(Vec::new)
            .push(SlotSpec::new(description, items));
        self
    }

    pub fn needed(mut self, count: usize) -> Self {
        self.template_arguments_needed = Some(count);
        self
    }

    pub fn defaults(mut self, defaults: Container) -> Self {
        self.defaults = Some(defaults);
        self
    }
}

// ============================================================================
// EXPANDED FORM
// ============================================================================

/// A slot after marker expansion
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    description: String,
    names: IndexSet<SmolStr>,
    accepts_integer: bool,
}

impl Slot {
    pub(super) fn new(description: String, names: IndexSet<SmolStr>, accepts_integer: bool) -> Self {
        Self {
            description,
            names,
            accepts_integer,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Acceptable class names in registry order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(SmolStr::as_str)
    }

    pub fn accepts_integer(&self) -> bool {
        self.accepts_integer
    }

    pub fn accepts_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Whether `name` may fill this slot
    pub fn accepts(&self, name: &str) -> bool {
        self.accepts_name(name) || (self.accepts_integer && is_integer(name))
    }

    pub(super) fn is_unfillable(&self) -> bool {
        self.names.is_empty() && !self.accepts_integer
    }
}

/// A class after marker expansion
#[derive(Debug, Clone)]
pub struct ClassEntry {
    name: SmolStr,
    slots: Option<Vec<Slot>>,
    min_arity: usize,
    runnable: bool,
    discretizable_in_time: bool,
    time_stepping_scheme: bool,
    defaults: Option<Container>,
}

impl ClassEntry {
    pub(super) fn from_spec(spec: &ClassSpec, slots: Option<Vec<Slot>>) -> Self {
        let arity = slots.as_ref().map_or(0, Vec::len);
        Self {
            name: spec.name.clone(),
            min_arity: spec.template_arguments_needed.unwrap_or(arity).min(arity),
            slots,
            runnable: spec.runnable,
            discretizable_in_time: spec.discretizable_in_time,
            time_stepping_scheme: spec.time_stepping_scheme,
            defaults: spec.defaults.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[Slot] {
        self.slots.as_deref().unwrap_or(&[])
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots().get(index)
    }

    /// Whether the class is written with angle brackets at all
    pub fn has_template_arguments(&self) -> bool {
        self.slots.is_some()
    }

    pub fn arity(&self) -> usize {
        self.slots().len()
    }

    pub fn min_arity(&self) -> usize {
        self.min_arity
    }

    pub fn is_runnable(&self) -> bool {
        self.runnable
    }

    pub fn is_discretizable_in_time(&self) -> bool {
        self.discretizable_in_time
    }

    pub fn is_time_stepping_scheme(&self) -> bool {
        self.time_stepping_scheme
    }

    pub fn defaults(&self) -> Option<&Container> {
        self.defaults.as_ref()
    }
}

/// Integer literal as written in a template argument
pub fn is_integer(text: &str) -> bool {
    text.trim().parse::<i64>().is_ok()
}
