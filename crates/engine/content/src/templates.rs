//! In-memory unit template catalogue.

use std::collections::HashMap;

use engine_core::{TemplateOracle, UnitTemplate, UnitTypeId};

/// Owns unit type templates and answers the engine's lookups.
#[derive(Clone, Debug, Default)]
pub struct TemplateSet {
    templates: HashMap<UnitTypeId, UnitTemplate>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template, replacing any previous one of the same type.
    pub fn insert(&mut self, template: UnitTemplate) {
        self.templates.insert(template.type_id, template);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitTemplate> {
        self.templates.values()
    }
}

impl FromIterator<UnitTemplate> for TemplateSet {
    fn from_iter<I: IntoIterator<Item = UnitTemplate>>(iter: I) -> Self {
        let mut set = Self::new();
        for template in iter {
            set.insert(template);
        }
        set
    }
}

impl TemplateOracle for TemplateSet {
    fn template(&self, type_id: UnitTypeId) -> Option<&UnitTemplate> {
        self.templates.get(&type_id)
    }
}
