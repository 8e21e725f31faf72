//! RON configuration loader and compiler
//!
//! Parses a `PropConfig` document, validates the cross-references the
//! schema cannot express (duplicate family names, dangling following and
//! trigger references), and compiles the declarative trees into runtime
//! objects.

use crate::error::{Error, Result};
use crate::schema::{PropConfig, StyleDef, TransitionDef};
use ember_core::{Color, Rng, Shade};
use ember_font::{EffectDescriptor, ResourceCatalog};
use ember_style::{Node, Sequencer, Style, Transition};
use std::fs;
use std::path::Path;
use tracing::info;

/// Loader for a prop configuration document
pub struct Loader {
    config: PropConfig,
}

impl Loader {
    /// Parse a configuration from a RON string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: PropConfig = ron::from_str(content)?;
        Ok(Self { config })
    }

    /// Parse a configuration from a RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// The parsed configuration
    pub fn config(&self) -> &PropConfig {
        &self.config
    }

    /// Font search paths in scan order
    pub fn search_paths(&self) -> &[String] {
        &self.config.font.search_paths
    }

    /// Build the effect registry from the font configuration
    ///
    /// Two passes: register every family, then resolve following and
    /// trigger references (which may point forward, or at the family
    /// itself).
    pub fn build_catalog(&self) -> Result<ResourceCatalog> {
        let font = &self.config.font;
        let mut catalog = ResourceCatalog::new(font.seed, font.anti_repeat);

        let mut ids = Vec::with_capacity(font.effects.len());
        for decl in &font.effects {
            let descriptor = EffectDescriptor::new(&decl.name, decl.kind);
            let Some(id) = catalog.add_effect(descriptor) else {
                return Err(Error::DuplicateDefinition(decl.name.clone()));
            };
            catalog.set_paired(id, decl.paired);
            catalog.set_volume(id, decl.volume);
            ids.push(id);
        }

        for (decl, id) in font.effects.iter().zip(&ids) {
            if let Some(followed) = &decl.following {
                let Some(other) = catalog.lookup(followed) else {
                    return Err(Error::UnknownEffect(followed.clone()));
                };
                catalog.set_following(*id, other);
            }
        }

        for binding in &font.triggers {
            let Some(id) = catalog.lookup(&binding.effect) else {
                return Err(Error::UnknownEffect(binding.effect.clone()));
            };
            catalog.bind_trigger(binding.trigger, id);
        }

        info!("loaded {} effect families", catalog.len());
        Ok(catalog)
    }

    /// Compile every declared style tree
    pub fn build_styles(&self) -> Vec<Style> {
        let mut seeds = Rng::new(self.config.style_seed);
        self.config
            .styles
            .iter()
            .map(|def| Style::new(compile_style(def, &mut seeds)))
            .collect()
    }
}

/// Compile a declarative style node into a runtime node
///
/// `seeds` feeds the internal randomness of flicker nodes so a configured
/// seed fully determines the tree's behavior.
pub fn compile_style(def: &StyleDef, seeds: &mut Rng) -> Node {
    match def {
        StyleDef::Solid(color) => Node::solid(*color),
        StyleDef::Alpha { color, alpha } => Node::solid_shade(Shade::with_alpha(*color, *alpha)),
        StyleDef::RandomFlicker { a, b } => {
            let a = compile_style(a, seeds);
            let b = compile_style(b, seeds);
            let seed = seeds.next_u64();
            Node::random_flicker(a, b, seed)
        }
        StyleDef::AudioFlicker { a, b } => {
            Node::audio_flicker(compile_style(a, seeds), compile_style(b, seeds))
        }
        StyleDef::BatteryGauge { low, high } => {
            Node::battery_gauge(compile_style(low, seeds), compile_style(high, seeds))
        }
        StyleDef::Layers(defs) => {
            Node::layers(defs.iter().map(|d| compile_style(d, seeds)).collect())
        }
        StyleDef::TriggerTransition {
            trigger,
            transition,
        } => Node::trigger_transition(*trigger, compile_transition(transition, seeds)),
        StyleDef::InOut {
            ignite,
            retract,
            base,
            off,
        } => Node::in_out(
            compile_transition(ignite, seeds),
            compile_transition(retract, seeds),
            compile_style(base, seeds),
            Shade::opaque((*off).unwrap_or(Color::BLACK)),
        ),
    }
}

/// Compile a declarative transition into a runtime transition
pub fn compile_transition(def: &TransitionDef, seeds: &mut Rng) -> Transition {
    match def {
        TransitionDef::Instant => Transition::instant(),
        TransitionDef::Fade(ms) => Transition::fade(*ms),
        TransitionDef::Delay(ms) => Transition::delay(*ms),
        TransitionDef::Wipe(ms) => Transition::wipe(*ms),
        TransitionDef::WipeIn(ms) => Transition::wipe_in(*ms),
        TransitionDef::Concat { steps, last } => Transition::concat(Sequencer::new(
            steps
                .iter()
                .map(|(t, n)| (compile_transition(t, seeds), compile_style(n, seeds)))
                .collect(),
            compile_transition(last, seeds),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::Trigger;

    const CONFIG: &str = r#"
    (
        font: (
            search_paths: ["fonts/alpha"],
            anti_repeat: true,
            seed: 42,
            effects: [
                (name: "hum", following: Some("hum"), paired: true),
                (name: "out", following: Some("in"), paired: true),
                (name: "in"),
                (name: "clsh"),
            ],
            triggers: [
                (trigger: Clash, effect: "clsh"),
                (trigger: Ignition, effect: "out"),
                (trigger: Retraction, effect: "in"),
            ],
        ),
        styles: [
            Layers([
                Solid((r: 0.0, g: 0.2, b: 1.0)),
                TriggerTransition(
                    trigger: Clash,
                    transition: Concat(
                        steps: [(Instant, Solid((r: 1.0, g: 1.0, b: 1.0)))],
                        last: Fade(200),
                    ),
                ),
            ]),
        ],
        style_seed: 7,
    )
    "#;

    #[test]
    fn test_build_catalog() {
        let loader = Loader::from_str(CONFIG).unwrap();
        let catalog = loader.build_catalog().unwrap();

        assert_eq!(catalog.len(), 4);
        let hum = catalog.lookup("hum").unwrap();
        let out = catalog.lookup("out").unwrap();
        let in_ = catalog.lookup("in").unwrap();

        // Self- and forward references both resolve
        assert_eq!(catalog.effect(hum).unwrap().following(), Some(hum));
        assert_eq!(catalog.effect(out).unwrap().following(), Some(in_));
        assert!(catalog.effect(out).unwrap().paired());

        assert_eq!(catalog.effect_for(Trigger::Clash), catalog.lookup("clsh"));
    }

    #[test]
    fn test_build_styles() {
        let loader = Loader::from_str(CONFIG).unwrap();
        let styles = loader.build_styles();
        assert_eq!(styles.len(), 1);

        // Untriggered tree shows the base color
        let style = &styles[0];
        assert_eq!(style.color_at(0), Color::new(0.0, 0.2, 1.0));
    }

    #[test]
    fn test_duplicate_effect_rejected() {
        let loader = Loader::from_str(
            r#"(
                font: (
                    search_paths: [],
                    effects: [(name: "hum"), (name: "hum")],
                ),
                styles: [],
            )"#,
        )
        .unwrap();
        assert!(matches!(
            loader.build_catalog(),
            Err(Error::DuplicateDefinition(name)) if name == "hum"
        ));
    }

    #[test]
    fn test_unknown_following_rejected() {
        let loader = Loader::from_str(
            r#"(
                font: (
                    search_paths: [],
                    effects: [(name: "hum", following: Some("nope"))],
                ),
                styles: [],
            )"#,
        )
        .unwrap();
        assert!(matches!(
            loader.build_catalog(),
            Err(Error::UnknownEffect(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_unknown_trigger_effect_rejected() {
        let loader = Loader::from_str(
            r#"(
                font: (
                    search_paths: [],
                    effects: [(name: "hum")],
                    triggers: [(trigger: Clash, effect: "clsh")],
                ),
                styles: [],
            )"#,
        )
        .unwrap();
        assert!(matches!(
            loader.build_catalog(),
            Err(Error::UnknownEffect(name)) if name == "clsh"
        ));
    }

    #[test]
    fn test_bad_ron_rejected() {
        assert!(matches!(Loader::from_str("(nonsense"), Err(Error::Ron(_))));
    }

    #[test]
    fn test_compiled_flickers_are_seeded_deterministically() {
        let loader = Loader::from_str(
            r#"(
                font: (search_paths: [], effects: []),
                styles: [
                    RandomFlicker(
                        a: Solid((r: 0.0, g: 0.0, b: 0.0)),
                        b: Solid((r: 1.0, g: 1.0, b: 1.0)),
                    ),
                ],
                style_seed: 99,
            )"#,
        )
        .unwrap();

        let mut one = loader.build_styles().remove(0);
        let mut two = loader.build_styles().remove(0);
        let frame = ember_core::FrameClock::new(10).frame(10);
        for _ in 0..20 {
            one.run(&frame);
            two.run(&frame);
            assert_eq!(one.color_at(0), two.color_at(0));
        }
    }
}
