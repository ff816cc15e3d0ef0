//! Scenario tests for the turn engine, driven through the public API.

use burrow::{
    create_armor, create_monster, create_weapon, ArmorTemplate, BurrowError, BurrowResult,
    Catalog, Command, Creature, Direction, GameEvent, GamePlay, GenerationConfig, Item, Level,
    MonsterTemplate, Occupant, Position, ScriptedRoller, Terrain, WeaponTemplate,
};
use proptest::prelude::*;

/// A walled 9x11 arena with an open interior.
fn arena() -> BurrowResult<Level> {
    let mut level = Level::new(9, 11)?;
    for row in 1..8 {
        for col in 1..10 {
            level.carve(Position::new(row, col))?;
        }
    }
    Ok(level)
}

fn start(config: GenerationConfig, rolls: Vec<i32>) -> BurrowResult<GamePlay<ScriptedRoller>> {
    GamePlay::on_level(
        "Tester",
        Catalog::builtin()?,
        config,
        arena()?,
        Position::new(4, 5),
        ScriptedRoller::new(rolls),
    )
}

fn goblin(health: i32) -> MonsterTemplate {
    MonsterTemplate {
        name: "goblin".to_string(),
        accuracy: 40,
        damage: 8,
        armor_class: 2,
        health,
        symbol: 'g',
    }
}

fn dagger() -> Item {
    Item::Weapon(create_weapon(&WeaponTemplate {
        name: "dagger".to_string(),
        accuracy: 5,
        damage: 15,
        symbol: ')',
    }))
}

fn leather() -> Item {
    Item::Armor(create_armor(&ArmorTemplate {
        name: "leather armor".to_string(),
        armor_class: 3,
        symbol: '[',
    }))
}

#[test]
fn test_passing_with_no_monsters_changes_nothing() -> BurrowResult<()> {
    let mut game = start(GenerationConfig::for_testing(1), vec![])?;
    let level = game.level().clone();
    let hero_at = game.hero().position();

    for _ in 0..5 {
        assert!(game.apply(Command::Pass)?);
    }
    assert_eq!(game.level(), &level);
    assert_eq!(game.hero().position(), hero_at);
    assert!(game.drain_events().iter().all(|event| *event == GameEvent::Rested));
    Ok(())
}

#[test]
fn test_equipping_keeps_item_count() -> BurrowResult<()> {
    let mut game = start(GenerationConfig::for_testing(1), vec![])?;
    let here = Position::new(4, 5);

    game.level_mut().set_item(here, Some(dagger()))?;
    game.pick_up()?;
    game.level_mut().set_item(here, Some(leather()))?;
    game.pick_up()?;
    assert_eq!(game.hero().inventory().item_count(), 2);

    game.equip_item(0)?;
    game.equip_item(1)?;
    assert_eq!(game.hero().inventory().item_count(), 0);
    assert_eq!(game.hero().damage(), 15);
    assert_eq!(game.hero().accuracy(), 85);
    assert_eq!(game.hero().armor_class(), 3);

    let lines: Vec<String> = game.drain_events().iter().map(ToString::to_string).collect();
    assert!(lines.contains(&"You wield the dagger.".to_string()));
    assert!(lines.contains(&"You put on the leather armor.".to_string()));

    // A second dagger swaps with the wielded one.
    game.level_mut().set_item(here, Some(dagger()))?;
    game.pick_up()?;
    game.equip_item(0)?;
    assert_eq!(game.hero().inventory().item_count(), 1);
    assert!(game.hero().has_item(&dagger()));
    Ok(())
}

#[test]
fn test_walking_onto_an_owned_item() -> BurrowResult<()> {
    let mut game = start(GenerationConfig::for_testing(1), vec![])?;
    game.level_mut().set_item(Position::new(4, 5), Some(dagger()))?;
    game.pick_up()?;
    game.level_mut().set_item(Position::new(4, 6), Some(dagger()))?;
    game.drain_events();

    game.step(Direction::East)?;
    assert_eq!(
        game.drain_events(),
        vec![
            GameEvent::ItemSighted { name: "dagger".to_string() },
            GameEvent::AlreadyOwned,
        ]
    );
    Ok(())
}

#[test]
fn test_attacking_by_walking_into_a_monster() -> BurrowResult<()> {
    // Hero attack: accuracy 80, evasion 0, damage 10, armor 2.
    let mut game = start(GenerationConfig::for_testing(1), vec![80, 0, 10, 2])?;
    let id = game.spawn_monster(create_monster(&goblin(30)), Position::new(4, 6))?;

    assert!(game.step(Direction::East)?);
    assert_eq!(game.hero().position(), Some(Position::new(4, 5)));
    let goblin = game.monster(id).expect("goblin survives");
    assert_eq!(goblin.health(), 22);

    let lines: Vec<String> = game.drain_events().iter().map(ToString::to_string).collect();
    assert_eq!(lines[0], "Tester is attacking the goblin");
    assert_eq!(lines[1], "Tester hits the goblin.");
    assert_eq!(lines[2], "(Accuracy roll 80/80 versus evasion roll 0/50)");
    assert_eq!(lines[3], "The armor of the goblin absorbs 2 damage.");
    assert_eq!(lines[4], "the goblin takes 8 damage (out of a maximum of 10).");
    assert_eq!(lines[5], "the goblin has 22 hit points remaining.");
    // The goblin then swings back and misses on the exhausted script.
    assert_eq!(lines[6], "the goblin is attacking Tester");
    assert_eq!(game.killer(), Some("goblin"));
    Ok(())
}

#[test]
fn test_rigged_kill_removes_monster_everywhere() -> BurrowResult<()> {
    let mut game = start(GenerationConfig::for_testing(1), vec![80, 0, 10, 0])?;
    let at = Position::new(3, 4);
    let id = game.spawn_monster(create_monster(&goblin(10)), at)?;

    game.initiate_fight(Occupant::Hero, Occupant::Monster(id))?;
    assert!(game.monster(id).is_none());
    assert_eq!(game.monster_count(), 0);
    assert_eq!(game.level().occupant_at(at), None);
    assert_eq!(game.statistics().monsters_killed, 1);
    assert!(game
        .events()
        .contains(&GameEvent::Killed { name: "the goblin".to_string() }));

    let stale = game.initiate_fight(Occupant::Hero, Occupant::Monster(id));
    assert!(matches!(stale, Err(BurrowError::InvalidAction(_))));
    game.check_occupancy()
}

#[test]
fn test_monsters_fight_each_other_when_asked() -> BurrowResult<()> {
    let mut game = start(GenerationConfig::for_testing(1), vec![40, 0, 8, 0])?;
    let a = game.spawn_monster(create_monster(&goblin(10)), Position::new(1, 1))?;
    let b = game.spawn_monster(create_monster(&goblin(5)), Position::new(1, 2))?;

    let result = game.initiate_fight(Occupant::Monster(a), Occupant::Monster(b))?;
    assert!(result.is_hit());
    assert!(game.monster(b).is_none());
    assert_eq!(game.statistics().monsters_killed, 0);
    assert_eq!(game.killer(), Some("goblin"));
    Ok(())
}

#[test]
fn test_monster_blocked_by_another_monster_sidesteps() -> BurrowResult<()> {
    let mut game = start(GenerationConfig::for_testing(1), vec![])?;
    // Hero at (4, 5); the front goblin already stands next to the hero.
    let front = game.spawn_monster(create_monster(&goblin(50)), Position::new(4, 4))?;
    let back = game.spawn_monster(create_monster(&goblin(50)), Position::new(4, 3))?;

    game.move_monsters()?;
    assert_eq!(game.monster(front).unwrap().position(), Some(Position::new(4, 4)));
    let moved = game.monster(back).unwrap().position().unwrap();
    assert_ne!(moved, Position::new(4, 3));
    assert_ne!(moved, Position::new(4, 4));
    game.check_occupancy()
}

#[test]
fn test_escape_ends_the_session() -> BurrowResult<()> {
    let config = GenerationConfig {
        max_depth: 1,
        ..GenerationConfig::for_testing(1)
    };
    let mut game = start(config, vec![])?;
    game.level_mut().set_terrain(Position::new(4, 5), Terrain::StairsDown)?;

    assert!(game.apply(Command::Descend)?);
    assert!(game.has_escaped());
    assert!(game.is_over());
    let lines: Vec<String> = game.drain_events().iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec!["You are exiting the bottom level of the dungeon.", "You have escaped!"]
    );

    assert!(matches!(game.move_hero(0, 1), Err(BurrowError::SessionEnded)));
    assert!(matches!(game.move_monsters(), Err(BurrowError::SessionEnded)));
    assert!(matches!(game.equip_item(0), Err(BurrowError::SessionEnded)));
    Ok(())
}

#[test]
fn test_drop_from_empty_slot() -> BurrowResult<()> {
    let mut game = start(GenerationConfig::for_testing(1), vec![])?;
    assert!(!game.apply(Command::Drop(3))?);
    assert_eq!(
        game.drain_events().pop().map(|event| event.to_string()),
        Some("You aren't holding anything in that slot.".to_string())
    );
    Ok(())
}

#[test]
fn test_gold_is_collected() -> BurrowResult<()> {
    let mut game = start(GenerationConfig::for_testing(1), vec![])?;
    game.level_mut().set_gold(Position::new(4, 6), 25)?;

    game.step(Direction::East)?;
    assert!(game.pick_up()?);
    assert_eq!(game.hero().gold(), 25);
    assert_eq!(game.statistics().gold_collected, 25);
    assert_eq!(game.level().cell(Position::new(4, 6)).unwrap().gold(), 0);
    Ok(())
}

#[test]
fn test_descending_needs_stairs() -> BurrowResult<()> {
    let mut game = GamePlay::new("Delver", Catalog::builtin()?, GenerationConfig::for_testing(21))?;

    // The hero is always placed on plain floor, never on the staircase.
    assert!(!game.descend_stairs()?);
    assert_eq!(game.depth(), 1);
    assert_eq!(game.events().last(), Some(&GameEvent::NoStairsHere));
    game.check_occupancy()
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => prop::sample::select(Direction::all()).prop_map(Command::Move),
        1 => Just(Command::Pass),
        1 => Just(Command::PickUp),
        1 => (0..12usize).prop_map(Command::Drop),
        1 => (0..12usize).prop_map(Command::Equip),
        1 => Just(Command::Descend),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn occupancy_holds_after_every_command(
        seed in any::<u64>(),
        commands in prop::collection::vec(command_strategy(), 1..80),
    ) {
        let mut game = GamePlay::new("Tester", Catalog::builtin().unwrap(), GenerationConfig::for_testing(seed)).unwrap();
        game.check_occupancy().unwrap();

        for command in commands {
            if game.is_over() {
                prop_assert!(matches!(game.apply(command), Err(BurrowError::SessionEnded)));
                break;
            }
            let _ = game.apply(command);
            game.drain_events();
            prop_assert!(game.check_occupancy().is_ok(), "after {:?}: {:?}", command, game.check_occupancy());
        }
    }
}
