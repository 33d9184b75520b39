mod common;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use spore_blocks::RegistryError;
use spore_feature::{
    BlockStateProvider, ConfigError, Feature, FeaturePlaceContext, FeatureRegistry, LogDiagnostics,
    TAG_TREE, TagTreeConfiguration,
};
use spore_geom::BlockPos;
use spore_world::WorldGenLevel;

use common::{block, loc, marker, registry, stone_world, store, template};

const OAK: &str = r#"
[weighted_lists]
bodies = [
    { structure = "spore:oak/body_small", weight = 3 },
    { structure = "spore:oak/body_tall", weight = 1 },
]
canopies = [{ structure = "spore:oak/crown", weight = 1 }]

[log]
type = "rotated_block_provider"
state = "oak_log"

[leaves]
type = "simple_state_provider"
state = "oak_leaves"

[[decorators]]
type = "attached_to_logs"
probability = 0.25
block_provider = { type = "weighted_state_provider", entries = [{ data = "moss", weight = 2 }, { data = "vine", weight = 1 }] }
directions = ["north", "south"]

[[decorators]]
type = "minecraft:alter_ground"
provider = { type = "simple_state_provider", state = "podzol" }
"#;

#[test]
fn parses_full_configuration() {
    let reg = registry();
    let cfg = TagTreeConfiguration::from_toml_str(OAK, &reg).unwrap();
    let bodies = cfg.bodies().unwrap();
    assert_eq!(bodies.entries().len(), 2);
    assert_eq!(bodies.total_weight(), 4);
    assert_eq!(bodies.entries()[0].structure, loc("spore:oak/body_small"));
    assert_eq!(cfg.canopies().unwrap().entries().len(), 1);
    assert_eq!(cfg.decorators().len(), 2);
    assert_eq!(cfg.leaves(), &BlockStateProvider::Simple(block(&reg, "oak_leaves")));
    match cfg.log() {
        BlockStateProvider::Rotated(variants) => {
            let ty = reg.get(variants[0].id).unwrap();
            let axes: Vec<&str> = variants
                .iter()
                .map(|b| ty.state_prop_value(b.state, "axis").unwrap())
                .collect();
            assert_eq!(axes, ["x", "y", "z"]);
        }
        other => panic!("unexpected log provider {other:?}"),
    }
}

fn with_lists(lists: &str) -> String {
    format!(
        "[weighted_lists]\n{lists}\n\n[log]\ntype = \"simple_state_provider\"\nstate = \"oak_log\"\n\n\
         [leaves]\ntype = \"simple_state_provider\"\nstate = \"oak_leaves\"\n"
    )
}

#[test]
fn bodies_list_is_required() {
    let reg = registry();
    let err = TagTreeConfiguration::from_toml_str(
        &with_lists(r#"canopies = [{ structure = "spore:c", weight = 1 }]"#),
        &reg,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::MissingList("bodies")));
}

#[test]
fn singular_keys_are_not_accepted_as_lists() {
    let reg = registry();
    let err = TagTreeConfiguration::from_toml_str(
        &with_lists(
            r#"body = [{ structure = "spore:b", weight = 1 }]
canopy = [{ structure = "spore:c", weight = 1 }]"#,
        ),
        &reg,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::MissingList("bodies")));
}

#[test]
fn empty_bodies_are_rejected() {
    let reg = registry();
    let err = TagTreeConfiguration::from_toml_str(
        &with_lists("bodies = []\ncanopies = []"),
        &reg,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::NoBodies));
    assert_eq!(err.to_string(), "At least one tree body is required.");
}

#[test]
fn canopies_list_is_required_but_may_be_empty() {
    let reg = registry();
    let err = TagTreeConfiguration::from_toml_str(
        &with_lists(r#"bodies = [{ structure = "spore:b", weight = 1 }]"#),
        &reg,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::MissingList("canopies")));

    let cfg = TagTreeConfiguration::from_toml_str(
        &with_lists(
            r#"bodies = [{ structure = "spore:b", weight = 1 }]
canopies = []"#,
        ),
        &reg,
    )
    .unwrap();
    assert!(cfg.canopies().unwrap().is_empty());
    assert!(cfg.decorators().is_empty());
}

#[test]
fn extra_lists_are_kept() {
    let reg = registry();
    let cfg = TagTreeConfiguration::from_toml_str(
        &with_lists(
            r#"bodies = [{ structure = "spore:b", weight = 1 }]
canopies = []
roots = [{ structure = "spore:r", weight = 1 }]"#,
        ),
        &reg,
    )
    .unwrap();
    assert_eq!(cfg.weighted_lists().len(), 3);
}

#[test]
fn negative_weight_fails_to_parse() {
    let reg = registry();
    let err = TagTreeConfiguration::from_toml_str(
        &with_lists(
            r#"bodies = [{ structure = "spore:b", weight = -2 }]
canopies = []"#,
        ),
        &reg,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn bad_identifier_fails_to_parse() {
    let reg = registry();
    let err = TagTreeConfiguration::from_toml_str(
        &with_lists(
            r#"bodies = [{ structure = "Spore:Upper Case", weight = 1 }]
canopies = []"#,
        ),
        &reg,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn unknown_provider_block_is_reported() {
    let reg = registry();
    let toml = with_lists(
        r#"bodies = [{ structure = "spore:b", weight = 1 }]
canopies = []"#,
    )
    .replace("state = \"oak_leaves\"", "state = \"birch_leaves\"");
    let err = TagTreeConfiguration::from_toml_str(&toml, &reg).unwrap_err();
    assert!(matches!(err, ConfigError::Block(RegistryError::UnknownBlock(_))));
}

#[test]
fn decorator_settings_are_validated() {
    let reg = registry();
    let base = with_lists(
        r#"bodies = [{ structure = "spore:b", weight = 1 }]
canopies = []"#,
    );

    let bad_direction = format!(
        "{base}\n[[decorators]]\ntype = \"attached_to_logs\"\nprobability = 0.5\n\
         block_provider = {{ type = \"simple_state_provider\", state = \"moss\" }}\n\
         directions = [\"sideways\"]\n"
    );
    assert!(matches!(
        TagTreeConfiguration::from_toml_str(&bad_direction, &reg),
        Err(ConfigError::Decorator(_))
    ));

    let bad_probability = format!(
        "{base}\n[[decorators]]\ntype = \"leave_vine\"\nprobability = 1.5\n\
         block_provider = {{ type = \"simple_state_provider\", state = \"vine\" }}\n"
    );
    assert!(matches!(
        TagTreeConfiguration::from_toml_str(&bad_probability, &reg),
        Err(ConfigError::Decorator(_))
    ));

    let unknown_type = format!("{base}\n[[decorators]]\ntype = \"beehive\"\nprobability = 0.1\n");
    assert!(matches!(
        TagTreeConfiguration::from_toml_str(&unknown_type, &reg),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn zero_weight_state_provider_is_rejected() {
    let reg = registry();
    let toml = with_lists(
        r#"bodies = [{ structure = "spore:b", weight = 1 }]
canopies = []"#,
    )
    .replace(
        "[log]\ntype = \"simple_state_provider\"\nstate = \"oak_log\"",
        "[log]\ntype = \"weighted_state_provider\"\nentries = [{ data = \"oak_log\", weight = 0 }]",
    );
    assert!(matches!(
        TagTreeConfiguration::from_toml_str(&toml, &reg),
        Err(ConfigError::Provider(_))
    ));
}

#[test]
fn configured_feature_places_through_registry() {
    let reg = registry();
    let features = FeatureRegistry::with_builtin().unwrap();
    assert!(features.contains(&loc(TAG_TREE)));

    let doc = format!(
        "type = \"{TAG_TREE}\"\n\n{}",
        with_lists(
            r#"bodies = [{ structure = "spore:stump", weight = 1 }]
canopies = []"#,
        )
        .replace("[weighted_lists]", "[config.weighted_lists]")
        .replace("[log]", "[config.log]")
        .replace("[leaves]", "[config.leaves]")
    );
    let configured = features.load_configured(&doc, &reg).unwrap();
    assert_eq!(configured.feature_type, loc(TAG_TREE));
    assert!(format!("{configured:?}").contains("tag_tree"));

    let templates = store(vec![("spore:stump", template([1, 1, 1], vec![marker(&reg, 0, 0, 0)]))]);
    let mut world = stone_world(&reg, 63);
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let origin = BlockPos::new(2, 64, 2);
    let mut ctx = FeaturePlaceContext {
        level: &mut world,
        templates: &templates,
        random: &mut rng,
        origin,
        diagnostics: &LogDiagnostics,
    };
    assert!(configured.feature.place(&mut ctx).unwrap());
    assert_eq!(world.block(origin), block(&reg, "oak_log"));
}

#[test]
fn unknown_feature_type_is_rejected() {
    let reg = registry();
    let features = FeatureRegistry::with_builtin().unwrap();
    let err = features
        .load_configured("type = \"spore:mushroom\"\n[config]\n", &reg)
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownFeature(ref id) if *id == loc("spore:mushroom")));
}

#[test]
fn builtin_registry_holds_only_tag_tree() {
    let mut features = FeatureRegistry::with_builtin().unwrap();
    assert!(features.contains(&loc(TAG_TREE)));
    assert!(!features.contains(&loc("spore:other")));
    let err = features
        .register(loc(TAG_TREE), |_, _| Err(ConfigError::Provider("unused".into())))
        .unwrap_err();
    assert_eq!(err.to_string(), format!("feature type `{TAG_TREE}` is already registered"));
}

#[test]
fn duplicate_feature_registration_fails() {
    let mut features = FeatureRegistry::with_builtin().unwrap();
    fn never(
        _: toml::Value,
        _: &spore_blocks::BlockRegistry,
    ) -> Result<Box<dyn Feature>, ConfigError> {
        Err(ConfigError::Provider("unused".into()))
    }
    assert!(matches!(
        features.register(loc(TAG_TREE), never),
        Err(ConfigError::DuplicateFeature(_))
    ));
    features.register(loc("spore:other"), never).unwrap();
    assert!(features.contains(&loc("spore:other")));
}
