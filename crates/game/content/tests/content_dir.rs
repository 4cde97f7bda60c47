use std::fs;

use bathala_content::{ContentFactory, DamageProfile};
use bathala_core::{DifficultyTier, PersonalityArchetype};

#[test]
fn data_dir_overrides_builtin_tables() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[ai]\nmax_pool_size = 9\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("roster.ron"),
        r#"[
            (
                name: "Sarimanok",
                archetype: Elemental,
                flavor_text: Some("A bird of fortune."),
                deck_theme: fire,
                damage_profile: Steady(multiplier: 1.2),
                signature_effect: Some("Fortune: +2 damage"),
            ),
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("narrative.ron"),
        r#"[(struggling, ["The moon smiles on you."])]"#,
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    assert_eq!(config.ai.max_pool_size, 9);

    let tables = factory.load_tables().unwrap();
    assert_eq!(tables.roster.len(), 1);
    assert_eq!(
        tables.roster.archetype_for("Sarimanok"),
        PersonalityArchetype::Elemental
    );
    assert_eq!(
        tables.roster.damage_profile("Sarimanok"),
        DamageProfile::Steady { multiplier: 1.2 }
    );
    assert_eq!(
        tables.roster.archetype_for("Tikbalang"),
        PersonalityArchetype::Calculating
    );
    assert_eq!(
        tables.narrative.lines(DifficultyTier::Struggling),
        ["The moon smiles on you."]
    );
    // abilities.ron absent
    assert!(!tables.abilities.is_empty());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("roster.ron"), "[ (name: ").unwrap();
    let err = ContentFactory::new(dir.path()).load_roster().unwrap_err();
    assert!(err.to_string().contains("roster"));
}
