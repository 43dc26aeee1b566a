//! Module providing KGML (KEGG Markup Language) input for PathwayDiagrams
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::warn;

use crate::pathway::diagram::{
    DiagramError, DiagramReaction, PathwayDiagram, ReactionEndpoint, ReactionType,
};
use crate::pathway::entry::{Entry, EntryType, Graphics};

// region KGML Document
/// Represents a KGML document, relations are not drawn and are skipped
#[derive(Deserialize)]
struct KgmlPathway {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "@title")]
    title: Option<String>,
    #[serde(rename = "entry", default)]
    entries: Vec<KgmlEntry>,
    #[serde(rename = "reaction", default)]
    reactions: Vec<KgmlReaction>,
}

#[derive(Deserialize)]
struct KgmlEntry {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@type")]
    entry_type: String,
    /// Line-type entries may carry several graphics elements, only the first is used
    #[serde(default)]
    graphics: Vec<KgmlGraphics>,
}

#[derive(Deserialize)]
struct KgmlGraphics {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "@x")]
    x: Option<f64>,
    #[serde(rename = "@y")]
    y: Option<f64>,
    #[serde(rename = "@width")]
    width: Option<f64>,
    #[serde(rename = "@height")]
    height: Option<f64>,
    #[serde(rename = "@type")]
    shape: Option<String>,
    #[serde(rename = "@bgcolor")]
    bgcolor: Option<String>,
    #[serde(rename = "@fgcolor")]
    fgcolor: Option<String>,
}

#[derive(Deserialize)]
struct KgmlReaction {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@type")]
    reaction_type: String,
    #[serde(rename = "substrate", default)]
    substrates: Vec<KgmlEndpoint>,
    #[serde(rename = "product", default)]
    products: Vec<KgmlEndpoint>,
}

#[derive(Deserialize)]
struct KgmlEndpoint {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@name")]
    name: String,
}
// endregion KGML Document

// region Conversions
impl KgmlGraphics {
    /// Graphics without a position (e.g. line graphics) leave the entry unplaced
    fn into_graphics(self) -> Option<Graphics> {
        Some(Graphics {
            name: self.name,
            x: self.x?,
            y: self.y?,
            width: self.width,
            height: self.height,
            shape: self.shape,
            bgcolor: self.bgcolor,
            fgcolor: self.fgcolor,
        })
    }
}

impl TryFrom<KgmlEntry> for Entry {
    type Error = DiagramError;

    fn try_from(e: KgmlEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            entry_type: e.entry_type.parse::<EntryType>()?,
            id: e.id,
            name: e.name,
            graphics: e
                .graphics
                .into_iter()
                .next()
                .and_then(KgmlGraphics::into_graphics),
        })
    }
}

impl From<KgmlEndpoint> for ReactionEndpoint {
    fn from(e: KgmlEndpoint) -> Self {
        ReactionEndpoint {
            id: e.id,
            name: e.name,
        }
    }
}

impl TryFrom<KgmlReaction> for DiagramReaction {
    type Error = DiagramError;

    fn try_from(r: KgmlReaction) -> Result<Self, Self::Error> {
        Ok(Self {
            reaction_type: r.reaction_type.parse::<ReactionType>()?,
            id: r.id,
            name: r.name,
            substrates: r.substrates.into_iter().map(ReactionEndpoint::from).collect(),
            products: r.products.into_iter().map(ReactionEndpoint::from).collect(),
        })
    }
}

impl PathwayDiagram {
    pub fn read_kgml<P: AsRef<Path>>(path: P) -> Result<PathwayDiagram, DiagramError> {
        let kgml_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(DiagramError::UnableToRead(format!("{:?}", err))),
        };
        PathwayDiagram::from_kgml_str(&kgml_str)
    }

    /// Parse a KGML document, the resulting diagram is validated before it is returned
    pub fn from_kgml_str(kgml_str: &str) -> Result<PathwayDiagram, DiagramError> {
        let kgml = match quick_xml::de::from_str::<KgmlPathway>(kgml_str) {
            Ok(pathway) => pathway,
            Err(err) => return Err(DiagramError::UnableToParse(err.to_string())),
        };
        let mut entries: IndexMap<String, Entry> = IndexMap::new();
        for kgml_entry in kgml.entries {
            let id = kgml_entry.id.clone();
            match Entry::try_from(kgml_entry) {
                Ok(entry) => {
                    entries.insert(entry.id.clone(), entry);
                }
                // A reaction referencing a skipped entry still fails validation
                Err(DiagramError::UnknownEntryType(entry_type)) => {
                    warn!(entry = %id, %entry_type, "skipping entry of unknown type");
                }
                Err(err) => return Err(err),
            }
        }
        let reactions = kgml
            .reactions
            .into_iter()
            .map(DiagramReaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let diagram = PathwayDiagram {
            name: kgml.name,
            title: kgml.title,
            entries,
            reactions,
        };
        diagram.validate()?;
        Ok(diagram)
    }
}
// endregion Conversions

#[cfg(test)]
mod kgml_tests {
    use super::*;
    use std::path::PathBuf;

    fn test_pathway_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("test_pathways")
            .join("eco00010_fragment.xml")
    }

    #[test]
    fn read_kgml() {
        let diagram = PathwayDiagram::read_kgml(test_pathway_path()).unwrap();
        assert_eq!(diagram.name.clone().unwrap(), "path:eco00010");
        assert_eq!(
            diagram.title.clone().unwrap(),
            "Glycolysis / Gluconeogenesis"
        );
        // Entries on both sides of the relation element are kept
        assert_eq!(diagram.entries.len(), 8);
        assert_eq!(diagram.reactions.len(), 3);

        let glucose = &diagram.entries["20"];
        assert_eq!(glucose.entry_type, EntryType::Compound);
        assert_eq!(glucose.name, "cpd:C00031");
        let graphics = glucose.graphics.clone().unwrap();
        assert!((graphics.x - 483.).abs() < 1e-25);
        assert!((graphics.y - 362.).abs() < 1e-25);
        assert_eq!(graphics.renderer_shape(), "ellipse");
        assert_eq!(graphics.bgcolor.unwrap(), "#FFFFFF");

        assert_eq!(diagram.entries["11"].entry_type, EntryType::Ortholog);
        assert_eq!(diagram.entries["30"].entry_type, EntryType::Map);

        let hexokinase = &diagram.reactions[0];
        assert_eq!(hexokinase.id, "10");
        assert_eq!(hexokinase.name, "rn:R00299");
        assert_eq!(hexokinase.reaction_type, ReactionType::Irreversible);
        assert_eq!(
            hexokinase
                .substrates
                .iter()
                .map(|s| s.id.as_str())
                .collect::<Vec<_>>(),
            vec!["20", "23"]
        );
        assert_eq!(hexokinase.products[0].name, "cpd:C00092");
        assert_eq!(diagram.reactions[2].reaction_type, ReactionType::Reversible);
    }

    #[test]
    fn entry_without_graphics() {
        let data = r#"<pathway name="path:test">
    <entry id="1" name="cpd:C00031" type="compound"/>
</pathway>"#;
        let diagram = PathwayDiagram::from_kgml_str(data).unwrap();
        assert!(diagram.entries["1"].graphics.is_none());
        assert!(diagram.reactions.is_empty());
    }

    #[test]
    fn empty_pathway() {
        let diagram = PathwayDiagram::from_kgml_str(r#"<pathway name="path:empty"/>"#).unwrap();
        assert!(diagram.is_empty());
    }

    #[test]
    fn dangling_reaction() {
        let data = r#"<pathway name="path:test">
    <entry id="1" name="cpd:C00031" type="compound"/>
    <entry id="2" name="eco:b2388" type="gene" reaction="rn:R00299"/>
    <reaction id="2" name="rn:R00299" type="irreversible">
        <substrate id="1" name="cpd:C00031"/>
        <product id="3" name="cpd:C00092"/>
    </reaction>
</pathway>"#;
        assert!(matches!(
            PathwayDiagram::from_kgml_str(data),
            Err(DiagramError::UnknownEntry { .. })
        ));
    }

    #[test]
    fn other_entry_types() {
        let data = r#"<pathway name="path:test">
    <entry id="1" name="cpd:C00031" type="compound"/>
    <entry id="2" name="cpd:C00092" type="compound"/>
    <entry id="3" name="eco:b2388" type="gene" reaction="rn:R00299"/>
    <entry id="4" name="undefined" type="other"/>
    <entry id="5" name="br:ko01000" type="brite"/>
    <entry id="6" name="undefined" type="sideways"/>
    <reaction id="3" name="rn:R00299" type="irreversible">
        <substrate id="1" name="cpd:C00031"/>
        <product id="2" name="cpd:C00092"/>
    </reaction>
</pathway>"#;
        let diagram = PathwayDiagram::from_kgml_str(data).unwrap();
        assert_eq!(diagram.entries["4"].entry_type, EntryType::Other);
        assert_eq!(diagram.entries["5"].entry_type, EntryType::Brite);
        // Types outside KGML are left out of the diagram
        assert!(!diagram.entries.contains_key("6"));
        assert_eq!(diagram.entries.len(), 5);

        let config = crate::configuration::GraphConfiguration::default();
        let model = crate::metabolic_model::model::Model::new_empty();
        let rendered = crate::render_pathway(
            &diagram,
            &model,
            &crate::optimize::FluxSolution::empty(),
            &config,
            None,
        )
        .unwrap()
        .to_json_value()
        .unwrap();
        assert_eq!(rendered["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(rendered["edges"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn reaction_on_unknown_entry_type() {
        let data = r#"<pathway name="path:test">
    <entry id="1" name="cpd:C00031" type="compound"/>
    <entry id="2" name="cpd:C00092" type="sideways"/>
    <entry id="3" name="eco:b2388" type="gene"/>
    <reaction id="3" name="rn:R00299" type="irreversible">
        <substrate id="1" name="cpd:C00031"/>
        <product id="2" name="cpd:C00092"/>
    </reaction>
</pathway>"#;
        assert_eq!(
            PathwayDiagram::from_kgml_str(data),
            Err(DiagramError::UnknownEntry {
                reaction: "rn:R00299".to_string(),
                entry: "2".to_string()
            })
        );
    }

    #[test]
    fn malformed_xml() {
        assert!(matches!(
            PathwayDiagram::from_kgml_str("<pathway><entry"),
            Err(DiagramError::UnableToParse(_))
        ));
        assert!(matches!(
            PathwayDiagram::read_kgml("does/not/exist.xml"),
            Err(DiagramError::UnableToRead(_))
        ));
    }
}
