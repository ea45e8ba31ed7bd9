//! Schema registry
//!
//! The table of template classes the combination tree may contain. Each class
//! lists its template-argument slots, how many of them must be filled, its
//! capability flags and a default settings fragment.
//!
//! Slots are authored with symbolic markers that are expanded once, over the
//! whole table, when the registry is built:
//! - `"Namespace::"` expands to every class whose name starts with it
//! - `"runnable"`, `"discretizableInTime"`, `"timeSteppingScheme"` expand to
//!   every class carrying that flag
//! - `"Integer"` stays a marker: the slot accepts integer literals

mod catalog;
mod entry;

pub use entry::{ClassEntry, ClassSpec, Slot, SlotSpec, is_integer};

use crate::settings::{Container, ContainerKind, Item};
use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;
use std::sync::{Arc, LazyLock};

/// Name of the root node's class
pub const ROOT_NAME: &str = "GLOBAL";

/// Marker accepting integer literals in a slot
pub const INTEGER_MARKER: &str = "Integer";

const RUNNABLE_MARKER: &str = "runnable";
const DISCRETIZABLE_IN_TIME_MARKER: &str = "discretizableInTime";
const TIME_STEPPING_SCHEME_MARKER: &str = "timeSteppingScheme";

static GLOBAL_REGISTRY: LazyLock<Arc<Registry>> = LazyLock::new(|| Arc::new(Registry::load()));

/// Expanded, read-only table of template classes
#[derive(Debug, Clone)]
pub struct Registry {
    entries: IndexMap<SmolStr, ClassEntry>,
    runnables: IndexSet<SmolStr>,
}

impl Registry {
    /// Build the built-in solver catalog
    pub fn load() -> Self {
        Self::from_specs(catalog::specs())
    }

    /// The built-in catalog, built on first use and shared afterwards
    pub fn global() -> Arc<Registry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// Build a registry from authored class specs.
    ///
    /// The root class gets a single slot accepting every runnable class; it
    /// is added, with nothing but the child placeholder as defaults, when the
    /// specs do not contain it.
    pub fn from_specs(specs: impl IntoIterator<Item = ClassSpec>) -> Self {
        let mut specs: IndexMap<SmolStr, ClassSpec> = specs
            .into_iter()
            .map(|spec| (spec.name.clone(), spec))
            .collect();

        let root = specs
            .entry(SmolStr::new_static(ROOT_NAME))
            .or_insert_with(|| {
                ClassSpec::new(ROOT_NAME).defaults(Container::from_items(
                    ContainerKind::Dict,
                    [Item::ChildPlaceholder(0)],
                ))
            });
        root.runnable = false;
        root.template_arguments = Some(vec![SlotSpec::new("runnable program", &[RUNNABLE_MARKER])]);
        root.template_arguments_needed = None;

        let flagged = |flag: fn(&ClassSpec) -> bool| -> IndexSet<SmolStr> {
            specs
                .values()
                .filter(|spec| flag(spec))
                .map(|spec| spec.name.clone())
                .collect()
        };
        let runnables = flagged(|spec| spec.runnable);
        let discretizable = flagged(|spec| spec.discretizable_in_time);
        let time_stepping = flagged(|spec| spec.time_stepping_scheme);

        let mut entries = IndexMap::with_capacity(specs.len());
        for spec in specs.values() {
            let slots = spec.template_arguments.as_ref().map(|slots| {
                slots
                    .iter()
                    .enumerate()
                    .map(|(index, slot)| {
                        let expanded = expand(
                            slot,
                            &specs,
                            &runnables,
                            &discretizable,
                            &time_stepping,
                        );
                        if expanded.is_unfillable() {
                            tracing::warn!(
                                class = %spec.name,
                                slot = index,
                                "template argument slot accepts no class names"
                            );
                        }
                        expanded
                    })
                    .collect::<Vec<_>>()
            });
            entries.insert(spec.name.clone(), ClassEntry::from_spec(spec, slots));
        }

        tracing::debug!(
            classes = entries.len(),
            runnables = runnables.len(),
            "loaded schema registry"
        );

        Self { entries, runnables }
    }

    pub fn get(&self, name: &str) -> Option<&ClassEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_runnable(&self, name: &str) -> bool {
        self.runnables.contains(name)
    }

    /// Runnable class names in registry order
    pub fn runnables(&self) -> impl Iterator<Item = &str> {
        self.runnables.iter().map(SmolStr::as_str)
    }

    /// Slots of `name`; empty for unknown classes
    pub fn slots(&self, name: &str) -> &[Slot] {
        self.get(name).map_or(&[], ClassEntry::slots)
    }

    /// Default settings fragment of `name`
    pub fn defaults(&self, name: &str) -> Option<&Container> {
        self.get(name).and_then(ClassEntry::defaults)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve the markers of one authored slot against the whole table
fn expand(
    slot: &SlotSpec,
    specs: &IndexMap<SmolStr, ClassSpec>,
    runnables: &IndexSet<SmolStr>,
    discretizable: &IndexSet<SmolStr>,
    time_stepping: &IndexSet<SmolStr>,
) -> Slot {
    let mut names = IndexSet::new();
    let mut accepts_integer = false;

    for item in &slot.items {
        match item.as_str() {
            INTEGER_MARKER => accepts_integer = true,
            RUNNABLE_MARKER => names.extend(runnables.iter().cloned()),
            DISCRETIZABLE_IN_TIME_MARKER => names.extend(discretizable.iter().cloned()),
            TIME_STEPPING_SCHEME_MARKER => names.extend(time_stepping.iter().cloned()),
            prefix if prefix.ends_with("::") => names.extend(
                specs
                    .keys()
                    .filter(|name| name.starts_with(prefix))
                    .cloned(),
            ),
            name => {
                names.insert(SmolStr::new(name));
            }
        }
    }

    Slot::new(slot.description.clone(), names, accepts_integer)
}
