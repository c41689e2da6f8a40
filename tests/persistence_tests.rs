//! Save/load integration tests.
//!
//! Configurations are written to a [`Section`], optionally pushed through
//! JSON the way a host would store them, and loaded back through the
//! registry.

use minigame_rules::catalog::{MatchTeamCondition, RewardAction, RuleRegistry, SetEnabledAction};
use minigame_rules::core::{AreaState, ComponentKind, ParticipantId, ParticipantSnapshot, RuleError, RuleRng, RulesConfig};
use minigame_rules::rewards::{Rarity, RewardEntry, Rewards, ITEM_REWARD, MONEY_REWARD};
use minigame_rules::store::Section;
use minigame_rules::triggers::{AreaRules, ConfiguredCondition, TriggerExecutor, TriggerType};

fn sample_rewards() -> Rewards {
    let mut rewards = Rewards::new();
    rewards.add_reward(RewardEntry::item("EMERALD", Rarity::Normal));
    rewards.add_reward(RewardEntry::money(12.5, Rarity::VeryCommon));
    rewards
        .add_group("kit", Rarity::Rare)
        .unwrap()
        .add_item(RewardEntry::item("HELMET", Rarity::Common));
    rewards
}

fn sample_executor() -> TriggerExecutor {
    TriggerExecutor::new(TriggerType::new("WIN"), "arena")
        .with_condition(ConfiguredCondition::new(Box::new(MatchTeamCondition::new("BLUE"))).inverted())
        .with_action(Box::new(SetEnabledAction::new(false)))
        .with_action(Box::new(RewardAction::new(sample_rewards())))
        .per_player()
        .with_trigger_count(2)
}

fn through_json(section: &Section) -> Section {
    let json = serde_json::to_string(section).unwrap();
    serde_json::from_str(&json).unwrap()
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_executor_round_trip() {
    let registry = RuleRegistry::with_defaults();
    let original = sample_executor();
    let mut saved = Section::new();
    original.save(&mut saved);
    let saved = through_json(&saved);

    let mut loaded = TriggerExecutor::new(TriggerType::new("WIN"), "arena");
    let report = loaded.load(&saved, &registry).unwrap();

    assert!(report.is_clean());
    assert!(loaded.is_trigger_per_player());
    assert_eq!(loaded.trigger_count(), 2);

    let names: Vec<_> = loaded.actions().iter().map(|a| a.name().to_string()).collect();
    assert_eq!(names, vec!["SET_ENABLED", "REWARD"]);
    assert_eq!(loaded.conditions().len(), 1);
    assert!(loaded.conditions()[0].is_inverted());

    let mut resaved = Section::new();
    loaded.save(&mut resaved);
    assert_eq!(resaved, saved);
}

#[test]
fn test_executor_defaults_restore() {
    let registry = RuleRegistry::with_defaults();
    let mut saved = Section::new();
    TriggerExecutor::new(TriggerType::new("WIN"), "arena").save(&mut saved);
    assert!(saved.is_empty());

    let mut loaded = sample_executor();
    loaded.load(&saved, &registry).unwrap();
    assert!(!loaded.is_trigger_per_player());
    assert_eq!(loaded.trigger_count(), 0);
    assert!(loaded.actions().is_empty());
    assert!(loaded.conditions().is_empty());
}

#[test]
fn test_rewards_round_trip() {
    let registry = RuleRegistry::with_defaults();
    let original = sample_rewards();
    let mut saved = Section::new();
    original.save(&mut saved);

    let mut loaded = Rewards::new();
    let report = loaded.load(&through_json(&saved), registry.reward_kinds()).unwrap();

    assert!(report.is_clean());
    assert_eq!(loaded, original);
}

#[test]
fn test_area_rules_round_trip_and_dispatch() {
    let registry = RuleRegistry::with_defaults();
    let mut rules = AreaRules::new("arena", RulesConfig::default());
    rules.add(sample_executor());

    let mut saved = Section::new();
    rules.save(&mut saved);

    let mut loaded = AreaRules::new("arena", RulesConfig::default());
    loaded.load(&through_json(&saved), &registry).unwrap();
    assert_eq!(loaded.len(), 1);

    let red = ParticipantSnapshot::new(ParticipantId::new()).with_team("RED");
    let mut area = AreaState::new("arena");
    let mut rng = RuleRng::new(8);
    assert_eq!(loaded.dispatch(&TriggerType::new("WIN"), Some(&red), &mut area, &mut rng).unwrap(), 1);

    assert!(!area.enabled);
    // REWARD is skipped once SET_ENABLED has disabled the area.
    assert!(area.granted.is_empty());
}

// =============================================================================
// Legacy shapes
// =============================================================================

#[test]
fn test_legacy_entries_upgrade() {
    let registry = RuleRegistry::with_defaults();
    let mut section = Section::new();
    section.set("0.item", "GOLDEN_APPLE");
    section.set("0.rarity", "RARE");
    section.set("1.money", 40);
    section.set("1.rarity", "COMMON");

    let mut rewards = Rewards::new();
    let report = rewards.load(&section, registry.reward_kinds()).unwrap();
    assert!(report.is_clean());

    let entries = rewards.rewards();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind(), ITEM_REWARD);
    assert_eq!(entries[0].rarity(), Rarity::Rare);
    assert_eq!(entries[0].data().get_str("item"), Some("GOLDEN_APPLE"));
    assert_eq!(entries[1].kind(), MONEY_REWARD);
    assert_eq!(entries[1].rarity(), Rarity::Common);
    assert_eq!(entries[1].data().get_f64("money"), Some(40.0));

    let mut resaved = Section::new();
    rewards.save(&mut resaved);
    assert_eq!(resaved.get_str("0.type"), Some(ITEM_REWARD));
    assert!(!resaved.contains("0.item"));
}

#[test]
fn test_typeless_indexed_entry_is_not_a_group() {
    let registry = RuleRegistry::with_defaults();
    let mut section = Section::new();
    section.set("0.type", "ITEM");
    section.set("0.rarity", "COMMON");
    section.set("0.data.item", "BREAD");
    section.set("1.rarity", "RARE");
    section.set("1.data.item", "CAKE");

    let mut rewards = Rewards::new();
    let report = rewards.load(&section, registry.reward_kinds()).unwrap();

    assert_eq!(rewards.rewards().len(), 1);
    assert!(rewards.groups().is_empty());
    assert_eq!(report.skipped_count(), 1);
}

#[test]
fn test_reserved_and_duplicate_group_names_skipped() {
    let registry = RuleRegistry::with_defaults();
    let mut section = Section::new();
    section.set("rarity.rarity", "RARE");
    section.set("kit.rarity", "COMMON");
    section.set("kit.0.type", "ITEM");
    section.set("kit.0.rarity", "COMMON");
    section.set("kit.0.data.item", "SHIELD");

    let mut rewards = Rewards::new();
    rewards.add_group("kit", Rarity::Rare).unwrap();
    let report = rewards.load(&section, registry.reward_kinds()).unwrap();

    assert_eq!(rewards.groups().len(), 1);
    assert_eq!(rewards.group("kit").map(|g| g.rarity()), Some(Rarity::Rare));
    assert_eq!(report.skipped_count(), 2);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_unknown_action_aborts_load() {
    let registry = RuleRegistry::with_defaults();
    let mut section = Section::new();
    section.set("actions.0.type", "SET_ENABLED");
    section.set("actions.1.type", "TELEPORT");

    let mut exec = TriggerExecutor::new(TriggerType::new("WIN"), "arena");
    let err = exec.load(&section, &registry).unwrap_err();
    assert!(matches!(
        err,
        RuleError::UnknownRuleComponent { kind: ComponentKind::Action, ref name } if name == "TELEPORT"
    ));
}

#[test]
fn test_aborted_reload_keeps_executor() {
    let registry = RuleRegistry::with_defaults();
    let mut first = Section::new();
    first.set("actions.0.type", "SET_ENABLED");
    first.set("actions.1.type", "SET_ENABLED");
    first.set("actions.1.state", false);
    first.set("triggerCount", 2);

    let mut exec = TriggerExecutor::new(TriggerType::new("WIN"), "arena");
    exec.load(&first, &registry).unwrap();

    let mut broken = Section::new();
    broken.set("actions.0.type", "SET_ENABLED");
    broken.set("actions.1.type", "EXPLODE");
    assert!(exec.load(&broken, &registry).is_err());

    assert_eq!(exec.actions().len(), 2);
    assert_eq!(exec.trigger_count(), 2);
}

#[test]
fn test_aborted_reload_keeps_area_rules() {
    let registry = RuleRegistry::with_defaults();
    let mut rules = AreaRules::new("arena", RulesConfig::default());
    rules.add(sample_executor());

    let mut broken = Section::new();
    broken.set("executors.0.trigger", "LOSE");
    broken.set("executors.0.actions.0.type", "SET_ENABLED");
    broken.set("executors.1.trigger", "WIN");
    broken.set("executors.1.actions.0.type", "EXPLODE");
    assert!(rules.load(&broken, &registry).is_err());

    assert_eq!(rules.len(), 1);
    let red = ParticipantSnapshot::new(ParticipantId::new()).with_team("RED");
    let mut area = AreaState::new("arena");
    let mut rng = RuleRng::new(8);
    assert_eq!(rules.dispatch(&TriggerType::new("WIN"), Some(&red), &mut area, &mut rng).unwrap(), 1);
    assert_eq!(rules.dispatch(&TriggerType::new("LOSE"), Some(&red), &mut area, &mut rng).unwrap(), 0);
}

#[test]
fn test_unknown_condition_aborts_load() {
    let registry = RuleRegistry::with_defaults();
    let mut section = Section::new();
    section.set("conditions.0.type", "IS_RAINING");

    let mut exec = TriggerExecutor::new(TriggerType::new("WIN"), "arena");
    assert!(matches!(
        exec.load(&section, &registry),
        Err(RuleError::UnknownRuleComponent { kind: ComponentKind::Condition, .. })
    ));
}

#[test]
fn test_unknown_reward_kind_aborts_load() {
    let registry = RuleRegistry::with_defaults();
    let mut section = Section::new();
    section.set("0.type", "EXPERIENCE");
    section.set("0.rarity", "COMMON");

    let mut rewards = Rewards::new();
    assert!(matches!(
        rewards.load(&section, registry.reward_kinds()),
        Err(RuleError::UnknownRuleComponent { kind: ComponentKind::Reward, .. })
    ));
}

#[test]
fn test_malformed_entries_skipped_and_counted() {
    let registry = RuleRegistry::with_defaults();
    let mut section = Section::new();
    section.set("actions.0.type", "SET_ENABLED");
    section.set("actions.1.state", true);
    section.set("actions.2", "garbage");
    section.set("conditions.0.type", "MINIGAME_TIMER");
    section.set("conditions.0.minTime", -3);
    section.set("triggerCount", "many");

    let mut exec = TriggerExecutor::new(TriggerType::new("WIN"), "arena");
    let report = exec.load(&section, &registry).unwrap();

    assert_eq!(exec.actions().len(), 1);
    assert!(exec.conditions().is_empty());
    assert_eq!(exec.trigger_count(), 0);
    assert_eq!(report.loaded, 1);
    assert_eq!(report.skipped_count(), 4);
}

#[test]
fn test_nested_reward_skips_reach_executor_report() {
    let registry = RuleRegistry::with_defaults();
    let mut section = Section::new();
    section.set("actions.0.type", "REWARD");
    section.set("actions.0.rewards.0.type", "MONEY");
    section.set("actions.0.rewards.0.rarity", "COMMON");
    section.set("actions.0.rewards.0.data.money", 5);
    section.set("actions.0.rewards.1.type", "ITEM");
    section.set("actions.0.rewards.1.rarity", "LEGENDARY");

    let mut exec = TriggerExecutor::new(TriggerType::new("WIN"), "arena");
    let report = exec.load(&section, &registry).unwrap();

    assert_eq!(exec.actions().len(), 1);
    assert_eq!(report.skipped_count(), 1);
}
