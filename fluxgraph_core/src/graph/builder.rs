//! Construction of graph documents from a pathway diagram or from a model alone
use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::configuration::GraphConfiguration;
use crate::graph::document::{
    crop_label, Edge, FluxSign, GraphDocument, Node, NodeKind, Position,
};
use crate::graph::xref::CrossReferenceIndex;
use crate::metabolic_model::model::Model;
use crate::optimize::FluxSolution;
use crate::pathway::diagram::{DiagramError, PathwayDiagram, ReactionEndpoint, ReactionType};

/// Stroke weight of an edge carrying no flux
const MIN_EDGE_WEIGHT: f64 = 1.;
/// Stroke weight of the edge carrying the largest absolute flux
const MAX_EDGE_WEIGHT: f64 = 10.;

/// Build a graph from a pathway diagram, reading fluxes through the cross-reference index
///
/// Reactions drawn by ortholog entries are skipped. Reactions which can not be matched to a
/// model reaction are still drawn, with zero flux and `matched: false`. Metabolites on the
/// configured hub denylist are left out, along with every edge touching them. Entries the
/// diagram does not place are put at `positions` (keyed by entry id) when given, otherwise at
/// random on the configured canvas.
///
/// # Errors
/// [`DiagramError::UnknownEntry`] when a reaction references an entry missing from the diagram
pub fn build_from_pathway(
    diagram: &PathwayDiagram,
    model: &Model,
    xref: &CrossReferenceIndex,
    solution: &FluxSolution,
    config: &GraphConfiguration,
    positions: Option<&IndexMap<String, Position>>,
) -> Result<GraphDocument, DiagramError> {
    diagram.validate()?;
    let mut graph = GraphAccumulator::new(config);
    for reaction in &diagram.reactions {
        if let Some(entry_type) = diagram.reaction_entry_type(reaction) {
            if !entry_type.is_concrete() {
                debug!(reaction = %reaction.name, entry = %reaction.id, %entry_type, "skipping non-concrete reaction");
                continue;
            }
        }
        let external_id = xref.normalize(&reaction.name);
        let model_reaction = xref.resolve_reaction(&reaction.name);
        let flux = match model_reaction {
            Some(id) => solution.flux_of(id),
            None => {
                warn!(reaction = %reaction.name, entry = %reaction.id, "no model reaction matches diagram reaction");
                0f64
            }
        };
        let step = ReactionStep {
            reaction: external_id.as_deref().unwrap_or(&reaction.name),
            model_reaction,
            flux,
            reversible: reaction.reaction_type == ReactionType::Reversible,
        };

        let mut substrates = Vec::with_capacity(reaction.substrates.len());
        for endpoint in &reaction.substrates {
            let seed = compound_seed(diagram, model, xref, positions, &reaction.name, endpoint)?;
            substrates.push(graph.admit(seed));
        }
        let mut products = Vec::with_capacity(reaction.products.len());
        for endpoint in &reaction.products {
            let seed = compound_seed(diagram, model, xref, positions, &reaction.name, endpoint)?;
            products.push(graph.admit(seed));
        }
        graph.connect(&step, &substrates, &products);
    }
    Ok(graph.finish())
}

/// Build a graph from a model alone, for when no pathway diagram is available
///
/// Nodes are placed at `positions` when given, otherwise at random on the configured canvas.
pub fn build_from_model(
    model: &Model,
    solution: &FluxSolution,
    config: &GraphConfiguration,
    positions: Option<&IndexMap<String, Position>>,
) -> GraphDocument {
    let mut graph = GraphAccumulator::new(config);
    for reaction in model.reactions.values() {
        let step = ReactionStep {
            reaction: &reaction.id,
            model_reaction: Some(&reaction.id),
            flux: solution.flux_of(&reaction.id),
            reversible: reaction.reversibility(),
        };
        let substrates: Vec<Option<String>> = reaction
            .reactants()
            .map(|id| graph.admit(metabolite_seed(model, positions, id)))
            .collect();
        let products: Vec<Option<String>> = reaction
            .products()
            .map(|id| graph.admit(metabolite_seed(model, positions, id)))
            .collect();
        graph.connect(&step, &substrates, &products);
    }
    graph.finish()
}

/// Node description for a compound entry of the diagram
fn compound_seed(
    diagram: &PathwayDiagram,
    model: &Model,
    xref: &CrossReferenceIndex,
    positions: Option<&IndexMap<String, Position>>,
    reaction_name: &str,
    endpoint: &ReactionEndpoint,
) -> Result<NodeSeed, DiagramError> {
    let entry = diagram
        .entries
        .get(&endpoint.id)
        .ok_or_else(|| DiagramError::UnknownEntry {
            reaction: reaction_name.to_string(),
            entry: endpoint.id.clone(),
        })?;
    let metabolite = xref
        .resolve_metabolite(&entry.name)
        .and_then(|id| model.metabolites.get(id));
    let name = match metabolite {
        Some(m) => m.display_name().to_string(),
        None => entry.label().to_string(),
    };
    let graphics = entry.graphics.as_ref();
    Ok(NodeSeed {
        id: entry.id.clone(),
        name,
        kind: NodeKind::Compound,
        position: graphics
            .map(|g| Position::new(g.x, g.y))
            .or_else(|| positions.and_then(|p| p.get(&entry.id)).copied()),
        metabolite: metabolite.map(|m| m.id.clone()),
        width: graphics.and_then(|g| g.width),
        height: graphics.and_then(|g| g.height),
        shape: graphics.map(|g| g.renderer_shape().to_string()),
        color: graphics.and_then(|g| g.bgcolor.clone()),
    })
}

/// Node description for a model metabolite, which may be missing from the model's metabolites
fn metabolite_seed(
    model: &Model,
    positions: Option<&IndexMap<String, Position>>,
    id: &str,
) -> NodeSeed {
    let name = model
        .metabolites
        .get(id)
        .map(|m| m.display_name())
        .unwrap_or(id);
    NodeSeed {
        id: id.to_string(),
        name: name.to_string(),
        kind: NodeKind::Metabolite,
        position: positions.and_then(|p| p.get(id)).copied(),
        metabolite: Some(id.to_string()),
        width: None,
        height: None,
        shape: None,
        color: None,
    }
}

/// Everything needed to create a node on first encounter
struct NodeSeed {
    id: String,
    name: String,
    kind: NodeKind,
    position: Option<Position>,
    metabolite: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    shape: Option<String>,
    color: Option<String>,
}

/// A reaction about to be drawn as edges
struct ReactionStep<'a> {
    reaction: &'a str,
    model_reaction: Option<&'a str>,
    flux: f64,
    reversible: bool,
}

/// Running state of a build, nodes are created once and fluxes accumulated per node
struct GraphAccumulator<'a> {
    config: &'a GraphConfiguration,
    nodes: IndexMap<String, Node>,
    totals: HashMap<String, f64>,
    edges: Vec<Edge>,
    edge_ids: HashSet<String>,
    flux_min: Option<f64>,
    flux_max: Option<f64>,
    rng: StdRng,
}

impl<'a> GraphAccumulator<'a> {
    fn new(config: &'a GraphConfiguration) -> Self {
        let rng = match config.layout.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GraphAccumulator {
            config,
            nodes: IndexMap::new(),
            totals: HashMap::new(),
            edges: Vec::new(),
            edge_ids: HashSet::new(),
            flux_min: None,
            flux_max: None,
            rng,
        }
    }

    fn random_position(&mut self) -> Position {
        let width = self.config.layout.width.max(0f64);
        let height = self.config.layout.height.max(0f64);
        Position::new(
            self.rng.gen::<f64>() * width,
            self.rng.gen::<f64>() * height,
        )
    }

    /// Create the node if it is not a hub and does not exist yet
    ///
    /// Returns the node id, or None for hub metabolites
    fn admit(&mut self, seed: NodeSeed) -> Option<String> {
        if self.config.hub_metabolites.is_hub(&seed.name) {
            debug!(id = %seed.id, name = %seed.name, "leaving out hub metabolite");
            return None;
        }
        if !self.nodes.contains_key(&seed.id) {
            let position = match seed.position {
                Some(position) => position,
                None => self.random_position(),
            };
            let node = Node {
                id: seed.id.clone(),
                label: crop_label(&seed.name, self.config.label_length),
                name: seed.name,
                x: position.x,
                y: position.y,
                cumulative_flux: 0,
                kind: seed.kind,
                metabolite: seed.metabolite,
                width: seed.width,
                height: seed.height,
                shape: seed.shape,
                color: seed.color,
            };
            self.nodes.insert(seed.id.clone(), node);
        }
        Some(seed.id)
    }

    /// Draw an edge for every (substrate, product) pair, hub endpoints are None and skipped
    fn connect(
        &mut self,
        step: &ReactionStep,
        substrates: &[Option<String>],
        products: &[Option<String>],
    ) {
        for (i, substrate) in substrates.iter().enumerate() {
            let Some(substrate) = substrate else {
                continue;
            };
            for (j, product) in products.iter().enumerate() {
                let Some(product) = product else {
                    continue;
                };
                self.add_edge(step, (substrate, i), (product, j));
            }
        }
    }

    fn add_edge(&mut self, step: &ReactionStep, substrate: (&str, usize), product: (&str, usize)) {
        let flux = if step.flux.is_finite() {
            step.flux
        } else {
            warn!(reaction = %step.reaction, flux = step.flux, "non-finite flux drawn as zero");
            0f64
        };
        let id = self.unique_edge_id(format!(
            "{}_{}-{}_{}",
            substrate.0, substrate.1, product.0, product.1
        ));
        // Negative flux runs from the products back to the substrates
        let (source, target) = if flux < 0f64 {
            (product.0, substrate.0)
        } else {
            (substrate.0, product.0)
        };
        for endpoint in [source, target] {
            *self.totals.entry(endpoint.to_string()).or_insert(0f64) += flux.abs();
        }
        self.flux_min = Some(self.flux_min.map_or(flux, |m| m.min(flux)));
        self.flux_max = Some(self.flux_max.map_or(flux, |m| m.max(flux)));
        self.edges.push(Edge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            flux,
            reversible: step.reversible,
            sign: FluxSign::from_flux(flux),
            weight: MIN_EDGE_WEIGHT,
            reaction: step.reaction.to_string(),
            model_reaction: step.model_reaction.map(str::to_string),
            matched: step.model_reaction.is_some(),
        });
    }

    /// Suffix `#n` onto ids which are already taken
    fn unique_edge_id(&mut self, base: String) -> String {
        let mut id = base.clone();
        let mut n = 1;
        while self.edge_ids.contains(&id) {
            id = format!("{}#{}", base, n);
            n += 1;
        }
        if n > 1 {
            debug!(base = %base, id = %id, "edge id collision");
        }
        self.edge_ids.insert(id.clone());
        id
    }

    fn finish(mut self) -> GraphDocument {
        for (id, node) in self.nodes.iter_mut() {
            let total = self.totals.get(id).copied().unwrap_or(0f64);
            node.cumulative_flux = total.trunc() as u64;
        }
        let max_abs_flux = self
            .edges
            .iter()
            .map(|e| e.flux.abs())
            .fold(0f64, f64::max);
        if max_abs_flux > 0f64 {
            for edge in self.edges.iter_mut() {
                edge.weight = MIN_EDGE_WEIGHT
                    + (MAX_EDGE_WEIGHT - MIN_EDGE_WEIGHT) * edge.flux.abs() / max_abs_flux;
            }
        }
        info!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            flux_min = ?self.flux_min,
            flux_max = ?self.flux_max,
            "built graph document"
        );
        GraphDocument {
            nodes: self.nodes.into_values().collect(),
            edges: self.edges,
            flux_min: self.flux_min,
            flux_max: self.flux_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::document::FluxSign;
    use crate::graph::hub::HubFilter;
    use crate::metabolic_model::metabolite::MetaboliteBuilder;
    use crate::metabolic_model::reaction::ReactionBuilder;
    use crate::pathway::diagram::DiagramReactionBuilder;
    use crate::pathway::entry::{EntryBuilder, EntryType, GraphicsBuilder};
    use std::path::PathBuf;

    fn test_data(parts: &[&str]) -> PathBuf {
        parts
            .iter()
            .fold(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_data"), |p, part| {
                p.join(part)
            })
    }

    fn seeded_config() -> GraphConfiguration {
        let mut config = GraphConfiguration::default();
        config.layout.seed = Some(42);
        config
    }

    fn compound(id: &str, name: &str, x: f64, y: f64) -> crate::pathway::entry::Entry {
        EntryBuilder::default()
            .id(id.to_string())
            .name(name.to_string())
            .entry_type(EntryType::Compound)
            .graphics(Some(
                GraphicsBuilder::default()
                    .name(Some(id.to_string()))
                    .x(x)
                    .y(y)
                    .shape(Some("circle".to_string()))
                    .build()
                    .unwrap(),
            ))
            .build()
            .unwrap()
    }

    fn gene(id: &str, entry_type: EntryType) -> crate::pathway::entry::Entry {
        EntryBuilder::default()
            .id(id.to_string())
            .name(format!("eco:{}", id))
            .entry_type(entry_type)
            .build()
            .unwrap()
    }

    /// One reversible reaction A -> B, where R1 cross-references rn:R00001
    fn single_reaction() -> (PathwayDiagram, Model) {
        let mut diagram = PathwayDiagram::new_empty();
        diagram.add_entry(compound("A", "cpd:C00001x", 10., 20.));
        diagram.add_entry(compound("B", "cpd:C00002x", 30., 40.));
        diagram.add_entry(gene("g1", EntryType::Gene));
        diagram.add_reaction(
            DiagramReactionBuilder::default()
                .id("g1".to_string())
                .name("rn:R00001".to_string())
                .reaction_type(ReactionType::Reversible)
                .substrates(vec![ReactionEndpoint::new("A", "cpd:C00001x")])
                .products(vec![ReactionEndpoint::new("B", "cpd:C00002x")])
                .build()
                .unwrap(),
        );
        let mut model = Model::new_empty();
        let mut metabolites = IndexMap::new();
        metabolites.insert("a_c".to_string(), -1.);
        metabolites.insert("b_c".to_string(), 1.);
        model.add_reaction(
            ReactionBuilder::default()
                .id("R1".to_string())
                .metabolites(metabolites)
                .annotation(Some(r#"{"kegg.reaction": "R00001"}"#.to_string()))
                .build()
                .unwrap(),
        );
        (diagram, model)
    }

    fn solution(fluxes: &[(&str, f64)]) -> FluxSolution {
        FluxSolution::new(
            0.,
            fluxes
                .iter()
                .map(|(id, flux)| (id.to_string(), *flux))
                .collect(),
        )
    }

    #[test]
    fn negative_flux_swaps_direction() {
        let (diagram, model) = single_reaction();
        let config = seeded_config();
        let xref = CrossReferenceIndex::build(&model, &config);
        let doc = build_from_pathway(&diagram, &model, &xref, &solution(&[("R1", -3.5)]), &config, None)
            .unwrap();

        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.node("A").unwrap().cumulative_flux, 3);
        assert_eq!(doc.node("B").unwrap().cumulative_flux, 3);
        assert_eq!(doc.edges.len(), 1);
        let edge = &doc.edges[0];
        assert_eq!(edge.source, "B");
        assert_eq!(edge.target, "A");
        assert!((edge.flux + 3.5).abs() < 1e-25);
        assert_eq!(edge.sign, FluxSign::Neg);
        assert!(edge.reversible);
        assert!(edge.matched);
        assert_eq!(edge.reaction, "R00001");
        assert_eq!(edge.model_reaction.as_deref(), Some("R1"));
        assert_eq!(edge.id, "A_0-B_0");
        assert!((edge.weight - MAX_EDGE_WEIGHT).abs() < 1e-12);
        assert_eq!(doc.flux_min, Some(-3.5));
        assert_eq!(doc.flux_max, Some(-3.5));
    }

    #[test]
    fn positive_flux_keeps_direction() {
        let (diagram, model) = single_reaction();
        let config = seeded_config();
        let xref = CrossReferenceIndex::build(&model, &config);
        let doc = build_from_pathway(&diagram, &model, &xref, &solution(&[("R1", 2.0)]), &config, None)
            .unwrap();
        let edge = &doc.edges[0];
        assert_eq!(edge.source, "A");
        assert_eq!(edge.target, "B");
        assert_eq!(edge.sign, FluxSign::Pos);
        // Layout comes from the diagram
        let a = doc.node("A").unwrap();
        assert!((a.x - 10.).abs() < 1e-25);
        assert!((a.y - 20.).abs() < 1e-25);
        assert_eq!(a.shape.as_deref(), Some("ellipse"));
        assert_eq!(a.kind, NodeKind::Compound);
    }

    #[test]
    fn unmatched_reaction_is_drawn_with_zero_flux() {
        let (diagram, _) = single_reaction();
        let model = Model::new_empty();
        let config = seeded_config();
        let xref = CrossReferenceIndex::build(&model, &config);
        let doc = build_from_pathway(&diagram, &model, &xref, &solution(&[("R1", 5.0)]), &config, None)
            .unwrap();
        assert_eq!(doc.edges.len(), 1);
        let edge = &doc.edges[0];
        assert_eq!(edge.flux, 0f64);
        assert_eq!(edge.sign, FluxSign::Zero);
        assert!(!edge.matched);
        assert!(edge.model_reaction.is_none());
        assert!((edge.weight - MIN_EDGE_WEIGHT).abs() < 1e-25);
        assert_eq!(doc.node("A").unwrap().cumulative_flux, 0);
    }

    #[test]
    fn failed_solution_gives_zero_flux() {
        let (diagram, model) = single_reaction();
        let config = seeded_config();
        let xref = CrossReferenceIndex::build(&model, &config);
        let mut failed = solution(&[("R1", 5.0)]);
        failed.status = crate::optimize::OptimizationStatus::Infeasible;
        let doc = build_from_pathway(&diagram, &model, &xref, &failed, &config, None).unwrap();
        assert!(doc.edges.iter().all(|e| e.sign == FluxSign::Zero));
        // The reaction still matched, only the flux is missing
        assert!(doc.edges[0].matched);
    }

    #[test]
    fn ortholog_reactions_are_skipped() {
        let (mut diagram, model) = single_reaction();
        diagram.add_entry(gene("k1", EntryType::Ortholog));
        diagram.add_reaction(
            DiagramReactionBuilder::default()
                .id("k1".to_string())
                .name("rn:R00001".to_string())
                .substrates(vec![ReactionEndpoint::new("B", "cpd:C00002x")])
                .products(vec![ReactionEndpoint::new("A", "cpd:C00001x")])
                .build()
                .unwrap(),
        );
        let config = seeded_config();
        let xref = CrossReferenceIndex::build(&model, &config);
        let doc = build_from_pathway(&diagram, &model, &xref, &solution(&[("R1", 1.0)]), &config, None)
            .unwrap();
        assert_eq!(doc.edges.len(), 1);
    }

    #[test]
    fn hub_metabolites_are_left_out() {
        let (mut diagram, model) = single_reaction();
        diagram.add_entry(compound("W", "cpd:C00001", 50., 50.));
        diagram.reactions[0]
            .substrates
            .push(ReactionEndpoint::new("W", "cpd:C00001"));
        let mut config = seeded_config();
        config.hub_metabolites = HubFilter::new(["W"]);
        let xref = CrossReferenceIndex::build(&model, &config);
        let doc = build_from_pathway(&diagram, &model, &xref, &solution(&[("R1", 1.0)]), &config, None)
            .unwrap();
        assert!(doc.node("W").is_none());
        assert_eq!(doc.edges.len(), 1);
        assert!(doc.edges.iter().all(|e| e.source != "W" && e.target != "W"));
    }

    #[test]
    fn repeated_pairs_get_unique_ids() {
        let (mut diagram, model) = single_reaction();
        let repeat = diagram.reactions[0].clone();
        diagram.add_reaction(repeat);
        let config = seeded_config();
        let xref = CrossReferenceIndex::build(&model, &config);
        let doc = build_from_pathway(&diagram, &model, &xref, &solution(&[("R1", 1.5)]), &config, None)
            .unwrap();
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.edges.len(), 2);
        assert_eq!(doc.edges[0].id, "A_0-B_0");
        assert_eq!(doc.edges[1].id, "A_0-B_0#1");
        // 1.5 from each of the two edges
        assert_eq!(doc.node("A").unwrap().cumulative_flux, 3);
    }

    #[test]
    fn dangling_reference_is_fatal() {
        let (mut diagram, model) = single_reaction();
        diagram.reactions[0]
            .products
            .push(ReactionEndpoint::new("missing", "cpd:C99999"));
        let config = seeded_config();
        let xref = CrossReferenceIndex::build(&model, &config);
        assert!(matches!(
            build_from_pathway(&diagram, &model, &xref, &FluxSolution::empty(), &config, None),
            Err(DiagramError::UnknownEntry { .. })
        ));
    }

    #[test]
    fn unplaced_entries_use_supplied_positions() {
        let (mut diagram, model) = single_reaction();
        diagram.add_entry(
            EntryBuilder::default()
                .id("C".to_string())
                .name("cpd:C00003x".to_string())
                .entry_type(EntryType::Compound)
                .build()
                .unwrap(),
        );
        diagram.reactions[0]
            .products
            .push(ReactionEndpoint::new("C", "cpd:C00003x"));
        let config = seeded_config();
        let xref = CrossReferenceIndex::build(&model, &config);
        let mut positions = IndexMap::new();
        positions.insert("C".to_string(), Position::new(-5., 7.5));
        // Diagram graphics win over supplied positions
        positions.insert("A".to_string(), Position::new(0., 0.));
        let doc = build_from_pathway(
            &diagram,
            &model,
            &xref,
            &solution(&[("R1", 1.0)]),
            &config,
            Some(&positions),
        )
        .unwrap();
        let c = doc.node("C").unwrap();
        assert_eq!(c.position(), Position::new(-5., 7.5));
        assert!(c.shape.is_none());
        assert_eq!(c.name, "cpd:C00003x");
        assert_eq!(doc.node("A").unwrap().position(), Position::new(10., 20.));

        // Without supplied positions the entry lands on the canvas
        let doc = build_from_pathway(
            &diagram,
            &model,
            &xref,
            &solution(&[("R1", 1.0)]),
            &config,
            None,
        )
        .unwrap();
        let c = doc.node("C").unwrap();
        assert!(c.x >= 0. && c.x <= config.layout.width);
        assert!(c.y >= 0. && c.y <= config.layout.height);
    }

    #[test]
    fn empty_inputs() {
        let config = seeded_config();
        let model = Model::new_empty();
        let xref = CrossReferenceIndex::build(&model, &config);
        let doc = build_from_pathway(
            &PathwayDiagram::new_empty(),
            &model,
            &xref,
            &FluxSolution::empty(),
            &config,
            None,
        )
        .unwrap();
        assert!(doc.is_empty());
        assert!(doc.flux_min.is_none());
        let doc = build_from_model(&model, &FluxSolution::empty(), &config, None);
        assert!(doc.is_empty());
    }

    #[test]
    fn glycolysis_fragment() {
        let diagram =
            PathwayDiagram::read_kgml(test_data(&["test_pathways", "eco00010_fragment.xml"]))
                .unwrap();
        let model = Model::read_json(test_data(&["test_models", "glycolysis_core.json"])).unwrap();
        let solution = FluxSolution::read_json(test_data(&[
            "test_solutions",
            "glycolysis_core_solution.json",
        ]))
        .unwrap();
        let config = seeded_config();
        let xref = CrossReferenceIndex::build(&model, &config);
        let doc = build_from_pathway(&diagram, &model, &xref, &solution, &config, None).unwrap();

        // ATP (entry 23) resolves to a hub metabolite and is left out
        let ids: Vec<&str> = doc.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["20", "21", "22"]);
        let glucose = doc.node("20").unwrap();
        assert_eq!(glucose.name, "D-Glucose");
        assert_eq!(glucose.metabolite.as_deref(), Some("glc__D_c"));
        assert_eq!(glucose.cumulative_flux, 5);
        let g6p = doc.node("21").unwrap();
        assert_eq!(g6p.label, "D-Glucose 6-phosphat...");
        assert_eq!(g6p.cumulative_flux, 7);
        assert_eq!(doc.node("22").unwrap().cumulative_flux, 2);

        assert_eq!(doc.edges.len(), 2);
        let hexokinase = &doc.edges[0];
        assert_eq!((hexokinase.source.as_str(), hexokinase.target.as_str()), ("20", "21"));
        assert_eq!(hexokinase.sign, FluxSign::Pos);
        assert!(!hexokinase.reversible);
        let isomerase = &doc.edges[1];
        assert_eq!((isomerase.source.as_str(), isomerase.target.as_str()), ("22", "21"));
        assert_eq!(isomerase.sign, FluxSign::Neg);
        assert!(isomerase.reversible);
        assert_eq!(isomerase.model_reaction.as_deref(), Some("PGI"));
        assert_eq!(doc.flux_min, Some(-2.5));
        assert_eq!(doc.flux_max, Some(5.0));
    }

    #[test]
    fn model_only_graph() {
        let model = Model::read_json(test_data(&["test_models", "glycolysis_core.json"])).unwrap();
        let solution = FluxSolution::read_json(test_data(&[
            "test_solutions",
            "glycolysis_core_solution.json",
        ]))
        .unwrap();
        let config = seeded_config();
        let mut positions = IndexMap::new();
        positions.insert("glc__D_c".to_string(), Position::new(1., 2.));
        let doc = build_from_model(&model, &solution, &config, Some(&positions));

        // ATP, ADP and H+ are hubs, ATPM only touches hubs
        let ids: Vec<&str> = doc.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["glc__D_c", "g6p_c", "f6p_c"]);
        assert_eq!(doc.edges.len(), 2);
        let glucose = doc.node("glc__D_c").unwrap();
        assert!((glucose.x - 1.).abs() < 1e-25);
        assert!((glucose.y - 2.).abs() < 1e-25);
        assert_eq!(glucose.kind, NodeKind::Metabolite);
        let g6p = doc.node("g6p_c").unwrap();
        assert!(g6p.x >= 0. && g6p.x <= config.layout.width);
        assert!(g6p.y >= 0. && g6p.y <= config.layout.height);

        let hexokinase = doc.edge("glc__D_c_0-g6p_c_0").unwrap();
        assert_eq!(hexokinase.source, "glc__D_c");
        assert!(hexokinase.matched);
        let isomerase = doc.edge("g6p_c_0-f6p_c_0").unwrap();
        assert_eq!(isomerase.source, "f6p_c");
        assert_eq!(isomerase.sign, FluxSign::Neg);
        assert!(isomerase.reversible);
        assert_eq!(doc.node("g6p_c").unwrap().cumulative_flux, 7);
    }

    #[test]
    fn seeded_layout_is_reproducible() {
        let mut model = Model::new_empty();
        let mut metabolites = IndexMap::new();
        metabolites.insert("x_c".to_string(), -1.);
        metabolites.insert("y_c".to_string(), 1.);
        model.add_reaction(
            ReactionBuilder::default()
                .id("XY".to_string())
                .metabolites(metabolites)
                .build()
                .unwrap(),
        );
        model.add_metabolite(
            MetaboliteBuilder::default()
                .id("x_c".to_string())
                .build()
                .unwrap(),
        );
        let config = seeded_config();
        let first = build_from_model(&model, &FluxSolution::empty(), &config, None);
        let second = build_from_model(&model, &FluxSolution::empty(), &config, None);
        assert_eq!(first, second);
        // Metabolites missing from the model are named by id
        assert_eq!(first.node("y_c").unwrap().name, "y_c");
    }
}
