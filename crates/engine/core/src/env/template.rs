//! Unit type templates.
//!
//! A template is the static description of a unit type: costs, hit points,
//! default attributes and the animation sets each [`GraphicType`] resolves
//! to. Templates are owned by the embedder (usually loaded from data files)
//! and exposed to the engine through [`TemplateOracle`].

use crate::graphics::{GraphicSet, GraphicType};
use crate::state::{Attributes, ResourceBundle, UnitTypeId};

/// Static description of one unit type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub type_id: UnitTypeId,
    pub name: String,
    pub max_hp: u32,
    pub attributes: Attributes,
    /// Price to train or build one.
    pub cost: ResourceBundle,
    /// Production time in ticks.
    pub train_time: u32,
    /// Animation sets keyed by graphic type. Missing entries fall back to
    /// [`GraphicSet::EMPTY`].
    pub graphics: Vec<(GraphicType, GraphicSet)>,
}

impl UnitTemplate {
    pub fn graphic(&self, graphic_type: GraphicType) -> GraphicSet {
        self.graphics
            .iter()
            .find(|(gt, _)| *gt == graphic_type)
            .map(|(_, set)| *set)
            .unwrap_or(GraphicSet::EMPTY)
    }
}

/// Read-only lookup of unit type templates.
pub trait TemplateOracle {
    fn template(&self, type_id: UnitTypeId) -> Option<&UnitTemplate>;
}
