//! Unit template catalogue loader.
//!
//! Loads unit type templates from RON files. The file format is a plain
//! `Vec<UnitTemplate>`, using the engine-core types directly via serde.

use std::path::Path;

use engine_core::UnitTemplate;

use crate::loaders::{read_file, LoadResult};
use crate::templates::TemplateSet;

/// Loader for the unit template catalogue from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load a template catalogue from a RON file.
    pub fn load(path: &Path) -> LoadResult<TemplateSet> {
        let content = read_file(path)?;
        Self::load_str(&content)
    }

    /// Load a template catalogue from RON text.
    pub fn load_str(content: &str) -> LoadResult<TemplateSet> {
        let templates: Vec<UnitTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse template catalogue RON: {}", e))?;
        Ok(templates.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{GraphicType, TemplateOracle, UnitTypeId};

    const CATALOGUE: &str = r#"[
        (
            type_id: (1),
            name: "militia",
            max_hp: 40,
            attributes: (
                speed: Some((65536)),
                attack: Some((damage: 4, range: None, rate: 20, projectile: None)),
                heal: None,
                gather: None,
                convert: None,
                build_rate: None,
                repair_rate: None,
                dropsite: "",
                garrison_capacity: 0,
                capabilities: "MOVE | ATTACK",
            ),
            cost: (amounts: (60, 0, 20, 0)),
            train_time: 250,
            graphics: [
                (Standing, (id: (10), frame_count: 1, frame_rate: 0.0)),
                (Dying, (id: (11), frame_count: 12, frame_rate: 0.5)),
            ],
        ),
    ]"#;

    #[test]
    fn parses_a_catalogue() {
        let set = TemplateLoader::load_str(CATALOGUE).unwrap();
        assert_eq!(set.len(), 1);
        let militia = set.template(UnitTypeId(1)).unwrap();
        assert_eq!(militia.name, "militia");
        assert_eq!(militia.graphic(GraphicType::Dying).frame_count, 12);
        assert!(militia.attributes.attack.is_some());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(TemplateLoader::load_str("[(nonsense").is_err());
    }

    #[test]
    fn templates_round_trip_through_ron() {
        let set = TemplateLoader::load_str(CATALOGUE).unwrap();
        let militia = set.template(UnitTypeId(1)).unwrap();
        let text = ron::to_string(militia).unwrap();
        let back: UnitTemplate = ron::from_str(&text).unwrap();
        assert_eq!(&back, militia);
    }
}
