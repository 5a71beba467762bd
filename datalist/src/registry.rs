//! Registry of live widget instances.

use std::collections::HashMap;

use crate::widget::{DataList, InstanceId};

/// All live widgets, plus an index from identifier to the widgets sharing it.
///
/// Widgets without an identifier are stored but never indexed, so delegated
/// events can never reach them.
#[derive(Debug, Default)]
pub struct Registry {
    instances: HashMap<InstanceId, DataList>,
    by_identifier: HashMap<String, Vec<InstanceId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget. Registering an ID twice replaces the stored widget.
    pub fn register(&mut self, instance: DataList) -> InstanceId {
        let id = instance.id();
        if let Some(identifier) = instance.identifier() {
            let ids = self.by_identifier.entry(identifier.to_string()).or_default();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        self.instances.insert(id, instance);
        id
    }

    /// Remove a widget. Unknown IDs are ignored.
    pub fn unregister(&mut self, id: InstanceId) -> Option<DataList> {
        let instance = self.instances.remove(&id)?;
        if let Some(identifier) = instance.identifier()
            && let Some(ids) = self.by_identifier.get_mut(identifier)
        {
            ids.retain(|i| *i != id);
            if ids.is_empty() {
                self.by_identifier.remove(identifier);
            }
        }
        Some(instance)
    }

    pub fn get(&self, id: InstanceId) -> Option<&DataList> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut DataList> {
        self.instances.get_mut(&id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Widgets registered under `identifier`, in registration order.
    pub fn ids_for(&self, identifier: &str) -> Vec<InstanceId> {
        self.by_identifier
            .get(identifier)
            .cloned()
            .unwrap_or_default()
    }

    /// Find the widget mounted on the document element `element`.
    pub fn find_by_element(&self, element: &str) -> Option<InstanceId> {
        self.instances
            .values()
            .find(|i| i.element() == Some(element))
            .map(DataList::id)
    }

    /// IDs of every registered widget, sorted.
    pub fn ids(&self) -> Vec<InstanceId> {
        let mut ids: Vec<InstanceId> = self.instances.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
