//! Performance-counter object model
//!
//! A `PerfObject` is one named counter category returned by the data
//! source. Reduction only ever looks at `name_index`; everything else is
//! payload carried through untouched.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::sync::Arc;

/// Anything addressable by a numeric name index.
pub trait NameIndexed {
    /// Stable identifier of the object in the counter name table.
    fn name_index(&self) -> u32;
}

impl<T: NameIndexed + ?Sized> NameIndexed for &T {
    fn name_index(&self) -> u32 {
        (**self).name_index()
    }
}

impl<T: NameIndexed + ?Sized> NameIndexed for Box<T> {
    fn name_index(&self) -> u32 {
        (**self).name_index()
    }
}

impl<T: NameIndexed + ?Sized> NameIndexed for Arc<T> {
    fn name_index(&self) -> u32 {
        (**self).name_index()
    }
}

impl<T: NameIndexed + ?Sized> NameIndexed for Rc<T> {
    fn name_index(&self) -> u32 {
        (**self).name_index()
    }
}

/// Definition of a single counter inside an object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfCounterDef {
    pub name: String,
    pub name_index: u32,
    /// Raw counter type bits as reported by the data source
    pub counter_type: u32,
    /// Base values are denominators for other counters
    pub is_base_value: bool,
}

/// One instance of an object (e.g. a single CPU core or disk).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfInstance {
    pub name: String,
    /// Raw counter values, positionally aligned with `PerfObject::counters`
    pub counters: Vec<u64>,
}

/// A performance-counter object as returned by a query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfObject {
    pub name: String,
    pub name_index: u32,
    #[serde(default)]
    pub help_text: String,
    #[serde(default)]
    pub help_text_index: u32,
    #[serde(default)]
    pub counters: Vec<PerfCounterDef>,
    #[serde(default)]
    pub instances: Vec<PerfInstance>,
}

impl PerfObject {
    /// Create an object with no counters or instances
    pub fn new(name: impl Into<String>, name_index: u32) -> Self {
        Self {
            name: name.into(),
            name_index,
            ..Default::default()
        }
    }

    /// Builder-style method to set help text and its index
    pub fn with_help(mut self, help_text: impl Into<String>, help_text_index: u32) -> Self {
        self.help_text = help_text.into();
        self.help_text_index = help_text_index;
        self
    }

    /// Builder-style method to append a counter definition
    pub fn with_counter(mut self, counter: PerfCounterDef) -> Self {
        self.counters.push(counter);
        self
    }

    /// Builder-style method to append an instance
    pub fn with_instance(mut self, instance: PerfInstance) -> Self {
        self.instances.push(instance);
        self
    }
}

impl NameIndexed for PerfObject {
    fn name_index(&self) -> u32 {
        self.name_index
    }
}
