use engine_core::{
    Action, AttackAction, AttackAttribute, Attributes, BuildAction, Capabilities, DeadAction,
    DecayAction, Engine, EngineConfig, Env, FoundationAction, GarrisonAction, GatherAction,
    GatherAttribute, GraphicSet, GraphicSetId, GraphicType, HealAction, HealAttribute,
    IdleAction, MoveAction, Path, PathOracle, Phys, Phys3, PlayerId, ProjectileAction,
    PushError, RepairAction, ResearchAction, ResourceBundle, ResourceKind, ResourceNode,
    SimState, TechId, TemplateOracle, TrainAction, UngarrisonAction, UnitId, UnitTemplate,
    UnitTypeId,
};

// ===== test oracles =====

struct StraightPaths;

impl PathOracle for StraightPaths {
    fn find_path(&self, _from: Phys3, to: Phys3, _within: Phys) -> Option<Path> {
        Some(Path::new(vec![to]))
    }
}

struct NoPaths;

impl PathOracle for NoPaths {
    fn find_path(&self, _from: Phys3, _to: Phys3, _within: Phys) -> Option<Path> {
        None
    }
}

struct Catalogue(Vec<UnitTemplate>);

impl TemplateOracle for Catalogue {
    fn template(&self, type_id: UnitTypeId) -> Option<&UnitTemplate> {
        self.0.iter().find(|t| t.type_id == type_id)
    }
}

// ===== template fixtures =====

const VILLAGER: UnitTypeId = UnitTypeId(1);
const MILITIA: UnitTypeId = UnitTypeId(2);
const ARCHER: UnitTypeId = UnitTypeId(3);
const MONK: UnitTypeId = UnitTypeId(4);
const HOUSE: UnitTypeId = UnitTypeId(5);
const CAMP: UnitTypeId = UnitTypeId(6);
const TREE: UnitTypeId = UnitTypeId(7);
const ARROW: UnitTypeId = UnitTypeId(8);

fn death_graphics() -> Vec<(GraphicType, GraphicSet)> {
    let set = |id, frame_count| GraphicSet {
        id: GraphicSetId(id),
        frame_count,
        frame_rate: 1.0,
    };
    vec![
        (GraphicType::Dying, set(90, 4)),
        (GraphicType::Decaying, set(91, 4)),
    ]
}

fn template(type_id: UnitTypeId, name: &str, max_hp: u32, attributes: Attributes) -> UnitTemplate {
    UnitTemplate {
        type_id,
        name: name.into(),
        max_hp,
        attributes,
        cost: ResourceBundle::EMPTY,
        train_time: 5,
        graphics: death_graphics(),
    }
}

fn catalogue() -> Catalogue {
    let villager = template(
        VILLAGER,
        "villager",
        25,
        Attributes {
            speed: Some(Phys::ONE),
            gather: Some(GatherAttribute {
                rate: 5,
                capacity: 3,
            }),
            build_rate: Some(0.05),
            repair_rate: Some(1),
            capabilities: Capabilities::MOVE
                | Capabilities::GATHER
                | Capabilities::BUILD
                | Capabilities::REPAIR,
            ..Attributes::default()
        },
    );
    let militia = template(
        MILITIA,
        "militia",
        10,
        Attributes {
            speed: Some(Phys::ONE),
            attack: Some(AttackAttribute {
                damage: 5,
                range: None,
                rate: 10,
                projectile: None,
            }),
            capabilities: Capabilities::MOVE | Capabilities::ATTACK,
            ..Attributes::default()
        },
    );
    let archer = template(
        ARCHER,
        "archer",
        20,
        Attributes {
            speed: Some(Phys::ONE),
            attack: Some(AttackAttribute {
                damage: 3,
                range: Some(Phys::from_int(5)),
                rate: 50,
                projectile: Some(ARROW),
            }),
            capabilities: Capabilities::MOVE | Capabilities::ATTACK,
            ..Attributes::default()
        },
    );
    let monk = template(
        MONK,
        "monk",
        30,
        Attributes {
            speed: Some(Phys::ONE),
            heal: Some(HealAttribute {
                amount: 5,
                range: Some(Phys::from_int(2)),
                rate: 2,
            }),
            capabilities: Capabilities::MOVE | Capabilities::HEAL,
            ..Attributes::default()
        },
    );
    let mut house = template(
        HOUSE,
        "house",
        100,
        Attributes {
            garrison_capacity: 2,
            capabilities: Capabilities::GARRISON | Capabilities::TRAIN | Capabilities::RESEARCH,
            ..Attributes::default()
        },
    );
    house.cost = ResourceBundle::of(ResourceKind::Wood, 200);
    let camp = template(
        CAMP,
        "camp",
        50,
        Attributes {
            dropsite: ResourceKind::Wood.into(),
            ..Attributes::default()
        },
    );
    let tree = template(TREE, "tree", 1, Attributes::default());
    let arrow = template(
        ARROW,
        "arrow",
        1,
        Attributes {
            speed: Some(Phys::from_int(2)),
            ..Attributes::default()
        },
    );
    let mut militia_priced = militia;
    militia_priced.cost = ResourceBundle::of(ResourceKind::Food, 50);
    Catalogue(vec![
        villager,
        militia_priced,
        archer,
        monk,
        house,
        camp,
        tree,
        arrow,
    ])
}

fn spawn(
    state: &mut SimState,
    catalogue: &Catalogue,
    type_id: UnitTypeId,
    owner: PlayerId,
    position: Phys3,
) -> UnitId {
    let template = catalogue.template(type_id).unwrap();
    state.spawn_from_template(template, owner, position)
}

fn push(state: &mut SimState, unit: UnitId, action: Action) {
    state.units.get_mut(unit).unwrap().stack.push(action).unwrap();
}

fn top_name(state: &SimState, unit: UnitId) -> &'static str {
    state
        .units
        .get(unit)
        .and_then(|u| u.stack.top())
        .map(|a| a.name())
        .unwrap_or("<gone>")
}

fn run(state: &mut SimState, env: Env<'_>, ticks: u32) {
    for _ in 0..ticks {
        Engine::update(state, env, 1).unwrap();
    }
}

// ===== scenarios =====

#[test]
fn move_arrives_and_unit_returns_to_idle() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let unit = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::ORIGIN);
    let goal = Phys3::on_ground(10, 0);
    push(&mut state, unit, Action::Move(MoveAction::to_point(goal)));

    run(&mut state, env, 15);

    assert_eq!(state.units.get(unit).unwrap().position, Some(goal));
    assert_eq!(top_name(&state, unit), "idle");
}

#[test]
fn melee_attack_kills_and_corpse_decays_away() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let attacker = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::ORIGIN);
    let victim = spawn(&mut state, &cat, MILITIA, PlayerId(2), Phys3::on_ground(2, 0));
    // Melee: no ranged attribute, so engagement uses the touching distance.
    push(
        &mut state,
        attacker,
        Action::Attack(AttackAction::new(victim, config.adjacent_range, 10)),
    );

    // Close in (2 tiles), two strokes of 5 on 10 hp, then dying + decaying
    // animations (4 frames each at one frame per tick).
    run(&mut state, env, 40);

    assert!(state.units.get(victim).is_none());
    assert_eq!(top_name(&state, attacker), "idle");
}

#[test]
fn exclusive_top_action_rejects_orders() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let _env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let site = spawn(&mut state, &cat, HOUSE, PlayerId(1), Phys3::ORIGIN);
    let building = state.units.get_mut(site).unwrap();
    building
        .stack
        .force_push(Action::Foundation(FoundationAction::new(false)))
        .unwrap();

    let order = Action::Move(MoveAction::to_point(Phys3::on_ground(1, 1)));
    assert_eq!(
        building.stack.push(order),
        Err(PushError::Exclusive("foundation"))
    );
}

#[test]
fn builder_raises_foundation_then_both_idle() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let site = spawn(&mut state, &cat, HOUSE, PlayerId(1), Phys3::ORIGIN);
    state
        .units
        .get_mut(site)
        .unwrap()
        .stack
        .force_push(Action::Foundation(FoundationAction::new(false)))
        .unwrap();
    let builder = spawn(&mut state, &cat, VILLAGER, PlayerId(1), Phys3::ORIGIN);
    push(
        &mut state,
        builder,
        Action::Build(BuildAction::new(site, config.adjacent_range)),
    );

    // 0.05 progress per tick: 20 in-range ticks to finish.
    run(&mut state, env, 30);

    let building = state.units.get(site).unwrap();
    assert!(building.build_progress >= 1.0);
    assert_eq!(building.hp, building.max_hp);
    assert_eq!(top_name(&state, site), "idle");
    assert_eq!(top_name(&state, builder), "idle");
}

#[test]
fn gather_cycle_delivers_everything_to_the_bank() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let _camp = spawn(&mut state, &cat, CAMP, PlayerId(1), Phys3::ORIGIN);
    let tree = spawn(&mut state, &cat, TREE, PlayerId(0), Phys3::on_ground(2, 0));
    state.units.get_mut(tree).unwrap().resource = Some(ResourceNode {
        kind: ResourceKind::Wood,
        amount: 10,
    });
    let villager = spawn(&mut state, &cat, VILLAGER, PlayerId(1), Phys3::ORIGIN);
    push(
        &mut state,
        villager,
        Action::Gather(GatherAction::new(tree, config.adjacent_range, 5)),
    );

    run(&mut state, env, 400);

    assert_eq!(state.bank(PlayerId(1)).stock[ResourceKind::Wood], 10);
    // The exhausted node is gone and the villager is back to idling.
    assert!(state.units.get(tree).is_none());
    assert_eq!(top_name(&state, villager), "idle");
}

#[test]
fn training_blocks_until_the_cost_is_covered() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let hall = spawn(&mut state, &cat, HOUSE, PlayerId(1), Phys3::ORIGIN);
    push(&mut state, hall, Action::Train(TrainAction::new(MILITIA)));

    run(&mut state, env, 10);
    // Nothing affordable yet: no recruit, order still pending.
    assert_eq!(state.units.len(), 1);
    assert_eq!(top_name(&state, hall), "train");

    // Training is not interruptible.
    let cancelled = Engine::interrupt(&mut state, env, hall).unwrap();
    assert_eq!(cancelled, 0);

    state
        .bank_mut(PlayerId(1))
        .credit(&ResourceBundle::of(ResourceKind::Food, 50));
    run(&mut state, env, 10);

    assert_eq!(state.units.len(), 2);
    assert_eq!(state.bank(PlayerId(1)).stock[ResourceKind::Food], 0);
    assert_eq!(top_name(&state, hall), "idle");
}

#[test]
fn research_marks_the_owner_bank() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let hall = spawn(&mut state, &cat, HOUSE, PlayerId(1), Phys3::ORIGIN);
    let tech = TechId(7);
    push(
        &mut state,
        hall,
        Action::Research(ResearchAction::new(tech, ResourceBundle::EMPTY, 5)),
    );

    run(&mut state, env, 8);

    assert!(state.bank(PlayerId(1)).has_researched(tech));
    assert_eq!(top_name(&state, hall), "idle");
}

#[test]
fn zero_elapsed_update_changes_nothing() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let unit = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::ORIGIN);
    push(
        &mut state,
        unit,
        Action::Move(MoveAction::to_point(Phys3::on_ground(10, 0))),
    );
    run(&mut state, env, 3);

    let before = state.clone();
    Engine::update(&mut state, env, 0).unwrap();
    assert_eq!(state, before);
}

#[test]
fn exhausted_repath_budget_ends_the_move() {
    let cat = catalogue();
    let mut config = EngineConfig::new();
    config.repath_attempts = 3;
    let env = Env::with_all(&NoPaths, &cat, &config);
    let mut state = SimState::new();
    let unit = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::ORIGIN);
    push(
        &mut state,
        unit,
        Action::Move(MoveAction::to_point(Phys3::on_ground(10, 0))),
    );

    run(&mut state, env, 5);

    assert_eq!(state.units.get(unit).unwrap().position, Some(Phys3::ORIGIN));
    assert_eq!(top_name(&state, unit), "idle");
}

#[test]
fn kill_stops_pending_work_and_removes_the_unit() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let unit = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::ORIGIN);
    push(
        &mut state,
        unit,
        Action::Move(MoveAction::to_point(Phys3::on_ground(10, 0))),
    );
    run(&mut state, env, 2);

    Engine::kill(&mut state, unit, None);
    assert_eq!(top_name(&state, unit), "dead");
    let frozen = state.units.get(unit).unwrap().position;

    // Dying (4 frames) then decaying (4 frames), then removal.
    run(&mut state, env, 12);
    assert!(state.units.get(unit).is_none());
    // The corpse never moved again.
    assert_ne!(frozen, Some(Phys3::on_ground(10, 0)));
}

#[test]
fn attack_on_a_vanished_target_ends_cleanly() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let attacker = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::ORIGIN);
    let victim = spawn(&mut state, &cat, MILITIA, PlayerId(2), Phys3::on_ground(8, 0));
    push(
        &mut state,
        attacker,
        Action::Attack(AttackAction::new(victim, config.adjacent_range, 10)),
    );
    run(&mut state, env, 2);

    state.units.remove(victim);
    run(&mut state, env, 2);

    assert_eq!(top_name(&state, attacker), "idle");
}

#[test]
fn ranged_attack_flies_a_projectile_into_the_target() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let archer = spawn(&mut state, &cat, ARCHER, PlayerId(1), Phys3::ORIGIN);
    // A building: it will not fight back or chase.
    let target = spawn(&mut state, &cat, CAMP, PlayerId(2), Phys3::on_ground(4, 0));
    push(
        &mut state,
        archer,
        Action::Attack(AttackAction::new(target, Phys::from_int(5), 50)),
    );

    // Stroke on the first in-range tick spawns the arrow; flight takes two
    // ticks at speed 2 over 4 tiles.
    run(&mut state, env, 1);
    assert_eq!(state.units.len(), 3);

    run(&mut state, env, 6);
    assert_eq!(state.units.get(target).unwrap().hp, 50 - 3);
    // The spent arrow removed itself.
    assert_eq!(state.units.len(), 2);
}

#[test]
fn garrison_and_ungarrison_round_trip() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let house = spawn(&mut state, &cat, HOUSE, PlayerId(1), Phys3::on_ground(2, 0));
    let infantry = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::ORIGIN);
    push(
        &mut state,
        infantry,
        Action::Garrison(GarrisonAction::new(house, config.adjacent_range)),
    );

    run(&mut state, env, 5);
    assert_eq!(state.units.get(infantry).unwrap().position, None);
    assert_eq!(state.units.get(house).unwrap().garrisoned.len(), 1);

    let rally = Phys3::on_ground(5, 5);
    push(
        &mut state,
        house,
        Action::Ungarrison(UngarrisonAction::new(rally)),
    );
    run(&mut state, env, 2);

    assert!(state.units.get(house).unwrap().garrisoned.is_empty());
    let released = state.units.get(infantry).unwrap();
    assert!(released.position.is_some());
    assert_eq!(top_name(&state, infantry), "move");
}

#[test]
fn idle_fighter_engages_a_nearby_enemy() {
    let cat = catalogue();
    let mut config = EngineConfig::new();
    config.idle_scan_interval = 1;
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let guard = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::ORIGIN);
    let _intruder = spawn(&mut state, &cat, MILITIA, PlayerId(2), Phys3::on_ground(3, 0));

    run(&mut state, env, 3);

    assert_eq!(top_name(&state, guard), "attack");
}

#[test]
fn heal_completes_at_full_health() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let monk = spawn(&mut state, &cat, MONK, PlayerId(1), Phys3::ORIGIN);
    let wounded = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::on_ground(1, 0));
    state.units.get_mut(wounded).unwrap().hp = 2;
    push(
        &mut state,
        monk,
        Action::Heal(HealAction::new(wounded, Phys::from_int(2), 2)),
    );

    run(&mut state, env, 10);

    let patient = state.units.get(wounded).unwrap();
    assert_eq!(patient.hp, patient.max_hp);
    assert_eq!(top_name(&state, monk), "idle");
}

#[test]
fn repair_freezes_when_the_stockpile_runs_dry() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    // House costs 200 wood over 100 hp: one wood per repaired hit point.
    let house = spawn(&mut state, &cat, HOUSE, PlayerId(1), Phys3::ORIGIN);
    state.units.get_mut(house).unwrap().hp = 90;
    state
        .bank_mut(PlayerId(1))
        .credit(&ResourceBundle::of(ResourceKind::Wood, 5));
    let villager = spawn(&mut state, &cat, VILLAGER, PlayerId(1), Phys3::ORIGIN);
    push(
        &mut state,
        villager,
        Action::Repair(RepairAction::new(house, config.adjacent_range)),
    );

    run(&mut state, env, 20);

    assert_eq!(state.units.get(house).unwrap().hp, 95);
    assert_eq!(state.bank(PlayerId(1)).stock[ResourceKind::Wood], 0);
    // Out of wood: the repair waits instead of completing.
    assert_eq!(top_name(&state, villager), "repair");
}

#[test]
fn units_without_repair_skill_give_up() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let house = spawn(&mut state, &cat, HOUSE, PlayerId(1), Phys3::ORIGIN);
    state.units.get_mut(house).unwrap().hp = 90;
    // Monks have no repair_rate attribute.
    let monk = spawn(&mut state, &cat, MONK, PlayerId(1), Phys3::ORIGIN);
    push(
        &mut state,
        monk,
        Action::Repair(RepairAction::new(house, config.adjacent_range)),
    );

    run(&mut state, env, 3);

    assert_eq!(state.units.get(house).unwrap().hp, 90);
    assert_eq!(top_name(&state, monk), "idle");
}

#[test]
fn move_near_stops_within_range_of_the_target() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let unit = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::ORIGIN);
    let target = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::on_ground(5, 0));
    push(
        &mut state,
        unit,
        Action::Move(MoveAction::near_unit(target, Phys::ONE)),
    );

    run(&mut state, env, 10);

    // Arrival at the edge of the range, not on top of the target.
    assert_eq!(
        state.units.get(unit).unwrap().position,
        Some(Phys3::on_ground(4, 0))
    );
    assert_eq!(top_name(&state, unit), "idle");
}

#[test]
fn depleting_stroke_hands_off_to_the_dropsite_in_the_same_tick() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let _camp = spawn(&mut state, &cat, CAMP, PlayerId(1), Phys3::ORIGIN);
    let tree = spawn(&mut state, &cat, TREE, PlayerId(0), Phys3::on_ground(2, 0));
    state.units.get_mut(tree).unwrap().resource = Some(ResourceNode {
        kind: ResourceKind::Wood,
        amount: 1,
    });
    // Start on top of the node: the primed first stroke drains it at once.
    let villager = spawn(&mut state, &cat, VILLAGER, PlayerId(1), Phys3::on_ground(2, 0));
    push(
        &mut state,
        villager,
        Action::Gather(GatherAction::new(tree, config.adjacent_range, 5)),
    );

    run(&mut state, env, 1);

    // The node is gone, but the same tick already retargeted the camp.
    assert!(state.units.get(tree).is_none());
    let worker = state.units.get(villager).unwrap();
    assert_eq!(worker.carrying.map(|c| c.amount), Some(1));
    assert_eq!(top_name(&state, villager), "gather");

    run(&mut state, env, 5);

    assert_eq!(state.bank(PlayerId(1)).stock[ResourceKind::Wood], 1);
    assert!(state.units.get(villager).unwrap().carrying.is_none());
    assert_eq!(top_name(&state, villager), "idle");
}

#[test]
fn host_death_releases_the_garrison() {
    let cat = catalogue();
    let config = EngineConfig::new();
    let env = Env::with_all(&StraightPaths, &cat, &config);
    let mut state = SimState::new();
    let house = spawn(&mut state, &cat, HOUSE, PlayerId(1), Phys3::on_ground(2, 0));
    let infantry = spawn(&mut state, &cat, MILITIA, PlayerId(1), Phys3::ORIGIN);
    push(
        &mut state,
        infantry,
        Action::Garrison(GarrisonAction::new(house, config.adjacent_range)),
    );

    run(&mut state, env, 5);
    assert_eq!(state.units.get(infantry).unwrap().position, None);

    Engine::kill(&mut state, house, None);

    assert!(state.units.get(house).unwrap().garrisoned.is_empty());
    let released = state.units.get(infantry).unwrap();
    assert!(released.is_alive());
    assert_eq!(released.position, Some(Phys3::on_ground(2, 0)));

    // The corpse decays away while the passenger goes back to idling.
    run(&mut state, env, 12);
    assert!(state.units.get(house).is_none());
    assert_eq!(top_name(&state, infantry), "idle");
}

#[test]
fn control_policy_matches_the_action_kinds() {
    let exclusive = [
        Action::Dead(DeadAction::new(None)),
        Action::Decay(DecayAction::new()),
        Action::Foundation(FoundationAction::new(false)),
        Action::Projectile(ProjectileAction::launch(
            UnitId::default(),
            Phys3::ORIGIN,
            Phys3::on_ground(1, 0),
            1,
            Phys::ONE,
        )),
    ];
    for action in &exclusive {
        assert!(!action.allow_control(), "{} must be exclusive", action.name());
    }
    // A foundation can still be cancelled; the rest of the exclusive set
    // cannot.
    assert!(exclusive[2].allow_interrupt());
    for action in [&exclusive[0], &exclusive[1], &exclusive[3]] {
        assert!(
            !action.allow_interrupt(),
            "{} must not be interruptible",
            action.name()
        );
    }

    let controllable = [
        Action::Idle(IdleAction::new(25)),
        Action::Move(MoveAction::to_point(Phys3::ORIGIN)),
        Action::Attack(AttackAction::new(UnitId::default(), Phys::ONE, 1)),
        Action::Train(TrainAction::new(MILITIA)),
    ];
    for action in &controllable {
        assert!(action.allow_control(), "{} must accept orders", action.name());
    }
    // Orders in progress can be cancelled; production cannot.
    assert!(controllable[1].allow_interrupt());
    assert!(!controllable[0].allow_interrupt());
    assert!(!controllable[3].allow_interrupt());
}
