//! Loot resolution: weighted enemy selection and post-victory drop rolls.

use crate::combat::Actor;
use crate::combatant::CombatantTemplate;
use crate::env::{ItemDefinition, ItemOracle, RngOracle, compute_seed};

/// Errors raised by weighted enemy selection.
///
/// All of these mean the authored enemy pool is unusable; an encounter must
/// abort rather than start a battle against undefined data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("enemy pool is empty")]
    EmptyPool,

    #[error("enemy '{name}' has negative encounter weight {weight}")]
    NegativeWeight { name: String, weight: i32 },

    #[error("enemy pool total encounter weight must be positive")]
    NonPositiveTotalWeight,
}

/// One validated loot-table entry on a spawned combatant.
///
/// Entries without an item reference are legal and never drop anything.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropEntry {
    pub item: Option<String>,
    pub chance: u32,
    pub min_quantity: u32,
    pub max_quantity: u32,
}

/// Roll a defeated combatant's loot table.
///
/// Each entry is rolled independently: a uniform draw in [0, 100) drops the
/// item iff it is below the entry's chance, and the quantity is drawn
/// uniformly from [min, max] inclusive. The result holds one
/// [`ItemDefinition`] copy per dropped unit. An empty table yields an empty
/// result.
///
/// Entries whose reference the oracle cannot resolve are skipped; the
/// encounter trigger validates references up front so this only arises for
/// fixtures that bypass it.
pub fn roll_drops(
    entries: &[DropEntry],
    items: &(impl ItemOracle + ?Sized),
    rng: &(impl RngOracle + ?Sized),
    base_seed: u64,
    nonce: u64,
) -> Vec<ItemDefinition> {
    let mut dropped = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(item_id) = entry.item.as_deref() else {
            continue;
        };
        let Some(definition) = items.definition(item_id) else {
            continue;
        };

        // Two independent draws per entry: drop check, then quantity.
        let check_seed = compute_seed(base_seed, nonce, Actor::Enemy.id(), (index as u32) * 2);
        if rng.roll_percent(check_seed) >= entry.chance {
            continue;
        }

        let quantity_seed =
            compute_seed(base_seed, nonce, Actor::Enemy.id(), (index as u32) * 2 + 1);
        let quantity = rng.range(quantity_seed, entry.min_quantity, entry.max_quantity);

        for _ in 0..quantity {
            dropped.push(definition.clone());
        }
    }

    dropped
}

/// Select an enemy template by encounter weight.
///
/// Draws a uniform integer in [0, total weight) and walks the pool
/// accumulating weights, returning the first template whose cumulative
/// weight exceeds the draw. Heavier templates are proportionally more
/// likely.
///
/// # Errors
///
/// An empty pool, a negative individual weight, or a non-positive total
/// weight is a configuration error. There is deliberately no fallback pick:
/// battling an arbitrary template would hide the broken data.
pub fn select_weighted<'a>(
    templates: &'a [CombatantTemplate],
    rng: &(impl RngOracle + ?Sized),
    seed: u64,
) -> Result<&'a CombatantTemplate, SelectionError> {
    if templates.is_empty() {
        return Err(SelectionError::EmptyPool);
    }

    let mut total: u32 = 0;
    for template in templates {
        if template.encounter_weight < 0 {
            return Err(SelectionError::NegativeWeight {
                name: template.name.clone(),
                weight: template.encounter_weight,
            });
        }
        total += template.encounter_weight as u32;
    }
    if total == 0 {
        return Err(SelectionError::NonPositiveTotalWeight);
    }

    let draw = rng.range(seed, 0, total - 1);

    let mut cumulative = 0;
    for template in templates {
        cumulative += template.encounter_weight as u32;
        if draw < cumulative {
            return Ok(template);
        }
    }

    unreachable!("draw {draw} below total weight {total} must land on a template")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ItemKind, PcgRng};
    use std::collections::HashMap;

    struct FixtureItems(HashMap<String, ItemDefinition>);

    impl FixtureItems {
        fn with(ids: &[&str]) -> Self {
            let mut map = HashMap::new();
            for id in ids {
                map.insert(
                    (*id).to_owned(),
                    ItemDefinition::new(
                        *id,
                        "",
                        10,
                        ItemKind::Consumable {
                            health_restore: 20,
                            mana_restore: 0,
                        },
                    ),
                );
            }
            Self(map)
        }
    }

    impl ItemOracle for FixtureItems {
        fn definition(&self, id: &str) -> Option<ItemDefinition> {
            self.0.get(id).cloned()
        }
    }

    fn entry(item: Option<&str>, chance: u32, min: u32, max: u32) -> DropEntry {
        DropEntry {
            item: item.map(str::to_owned),
            chance,
            min_quantity: min,
            max_quantity: max,
        }
    }

    #[test]
    fn zero_chance_never_drops() {
        let items = FixtureItems::with(&["health_potion"]);
        let entries = [entry(Some("health_potion"), 0, 1, 1)];
        for nonce in 0..10_000u64 {
            let drops = roll_drops(&entries, &items, &PcgRng, 99, nonce);
            assert!(drops.is_empty(), "chance 0 dropped at nonce {nonce}");
        }
    }

    #[test]
    fn full_chance_always_drops() {
        let items = FixtureItems::with(&["health_potion"]);
        let entries = [entry(Some("health_potion"), 100, 1, 1)];
        for nonce in 0..10_000u64 {
            let drops = roll_drops(&entries, &items, &PcgRng, 99, nonce);
            assert_eq!(drops.len(), 1, "chance 100 failed at nonce {nonce}");
        }
    }

    #[test]
    fn quantity_stays_in_authored_range() {
        let items = FixtureItems::with(&["wolf_pelt"]);
        let entries = [entry(Some("wolf_pelt"), 100, 2, 4)];
        for nonce in 0..1_000u64 {
            let drops = roll_drops(&entries, &items, &PcgRng, 7, nonce);
            assert!((2..=4).contains(&drops.len()));
        }
    }

    #[test]
    fn empty_table_and_missing_references_yield_nothing() {
        let items = FixtureItems::with(&[]);
        assert!(roll_drops(&[], &items, &PcgRng, 1, 0).is_empty());

        // Entry without a reference, entry with an unresolvable one
        let entries = [
            entry(None, 100, 1, 1),
            entry(Some("not_authored"), 100, 1, 1),
        ];
        assert!(roll_drops(&entries, &items, &PcgRng, 1, 0).is_empty());
    }

    #[test]
    fn entries_roll_independently() {
        let items = FixtureItems::with(&["health_potion", "wolf_pelt"]);
        let entries = [
            entry(Some("health_potion"), 100, 1, 1),
            entry(Some("wolf_pelt"), 100, 1, 1),
        ];
        let drops = roll_drops(&entries, &items, &PcgRng, 5, 0);
        assert_eq!(drops.len(), 2);
    }

    #[test]
    fn empty_pool_is_rejected() {
        assert_eq!(
            select_weighted(&[], &PcgRng, 0).unwrap_err(),
            SelectionError::EmptyPool
        );
    }

    #[test]
    fn zero_total_weight_is_rejected() {
        let pool = [CombatantTemplate::builder().encounter_weight(0).build()];
        assert_eq!(
            select_weighted(&pool, &PcgRng, 0).unwrap_err(),
            SelectionError::NonPositiveTotalWeight
        );
    }

    #[test]
    fn negative_weight_is_rejected() {
        let pool = [
            CombatantTemplate::builder().encounter_weight(10).build(),
            CombatantTemplate::builder()
                .name("Ghost")
                .encounter_weight(-5)
                .build(),
        ];
        assert!(matches!(
            select_weighted(&pool, &PcgRng, 0).unwrap_err(),
            SelectionError::NegativeWeight { weight: -5, .. }
        ));
    }

    #[test]
    fn selection_tracks_weights_statistically() {
        let pool = [
            CombatantTemplate::builder()
                .name("Slime")
                .encounter_weight(10)
                .build(),
            CombatantTemplate::builder()
                .name("Goblin")
                .encounter_weight(30)
                .build(),
            CombatantTemplate::builder()
                .name("Dire Wolf")
                .encounter_weight(60)
                .build(),
        ];

        const TRIALS: u32 = 30_000;
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for seed in 0..TRIALS as u64 {
            let picked = select_weighted(&pool, &PcgRng, seed).unwrap();
            *counts.entry(picked.name.as_str()).or_default() += 1;
        }

        // Expected frequencies 10%, 30%, 60% with a 2-point tolerance.
        for (name, weight) in [("Slime", 10u32), ("Goblin", 30), ("Dire Wolf", 60)] {
            let observed = counts[name] as f64 / TRIALS as f64 * 100.0;
            let expected = weight as f64;
            assert!(
                (observed - expected).abs() < 2.0,
                "{name}: observed {observed:.1}%, expected {expected}%"
            );
        }
    }
}
