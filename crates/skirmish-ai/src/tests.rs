//! Tests for the decision strategies, run against a hand-built query fixture.

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::*;
use skirmish_core::query::{nearest_of, UnitQuery};
use skirmish_core::types::*;

use crate::chase::ChaseDecision;
use crate::decision::{Decision, DecisionKind};
use crate::player::PlayerDecision;
use crate::timer::countdown;

/// Minimal `UnitQuery` over a vector of views, in vector order.
struct Fixture {
    units: Vec<UnitView>,
}

impl Fixture {
    fn new(units: Vec<UnitView>) -> Self {
        Self { units }
    }

    fn kill(&mut self, id: UnitId) {
        for unit in &mut self.units {
            if unit.id == id {
                unit.hp = 0.0;
                unit.alive = false;
            }
        }
    }

    fn remove(&mut self, id: UnitId) {
        self.units.retain(|u| u.id != id);
    }
}

impl UnitQuery for Fixture {
    fn unit(&self, id: UnitId) -> Option<UnitView> {
        self.units.iter().find(|u| u.id == id).copied()
    }

    fn alive_units_in_range(&self, point: DVec2, range: f64) -> Vec<UnitView> {
        self.units
            .iter()
            .filter(|u| u.alive && u.position.distance(point) <= range)
            .copied()
            .collect()
    }

    fn alive_nearest_unit(
        &self,
        point: DVec2,
        range: f64,
        faction: Option<Faction>,
    ) -> Option<UnitView> {
        nearest_of(self.alive_units_in_range(point, range), point, faction)
    }
}

fn view(id: u64, faction: Faction, x: f64, y: f64) -> UnitView {
    UnitView {
        id: UnitId(id),
        faction,
        position: DVec2::new(x, y),
        heading: 0.0,
        speed: 0.0,
        hp: 10.0,
        max_hp: 10.0,
        alive: true,
    }
}

fn spec(faction: Faction) -> UnitSpec {
    UnitSpec {
        max_hp: 10.0,
        max_speed: 5.0,
        detect_range: 50.0,
        attack_range: 5.0,
        attack_interval: 1.0,
        attack_damage: 1.0,
        intersect_range: 2.0,
        faction,
    }
}

fn assert_move_vel(intent: MoveIntent, expected: DVec2) {
    match intent {
        MoveIntent::MoveVel { vel } => assert!(
            (vel - expected).length() < 1e-9,
            "Expected velocity {expected:?}, got {vel:?}"
        ),
        other => panic!("Expected MoveVel, got {other:?}"),
    }
}

fn assert_move_to(intent: MoveIntent, expected: DVec2) {
    match intent {
        MoveIntent::MoveTo { point, speed } => {
            assert!((point - expected).length() < 1e-9);
            assert!(speed.is_none(), "Targets are chased at full speed");
        }
        other => panic!("Expected MoveTo, got {other:?}"),
    }
}

fn is_random_walk(intent: MoveIntent) -> bool {
    matches!(intent, MoveIntent::RandomWalk { speed: None })
}

// ---- Player strategy: route following ----

#[test]
fn test_player_follows_route_segments() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let world = Fixture::new(vec![owner]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();
    player.set_route(&[
        DVec2::new(100.0, 100.0),
        DVec2::new(110.0, 100.0),
        DVec2::new(110.0, 110.0),
    ]);
    assert!(!player.route_complete());

    assert_move_vel(
        player.decide(&owner, &spec, &world, 1.0),
        DVec2::new(5.0, 0.0),
    );
    assert_move_vel(
        player.decide(&owner, &spec, &world, 1.0),
        DVec2::new(0.0, 5.0),
    );
    assert_eq!(player.segment_index(), 1);

    assert_move_vel(
        player.decide(&owner, &spec, &world, 1.0),
        DVec2::new(0.0, 5.0),
    );
    let intent = player.decide(&owner, &spec, &world, 1.0);
    assert!(player.route_complete());
    assert!(is_random_walk(intent), "Exhausted route wanders: {intent:?}");
}

#[test]
fn test_player_large_dt_consumes_several_segments() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let world = Fixture::new(vec![owner]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();
    player.set_route(&[
        DVec2::new(0.0, 0.0),
        DVec2::new(4.0, 0.0),
        DVec2::new(4.0, 4.0),
        DVec2::new(0.0, 4.0),
    ]);

    // 15 units of travel covers all three 4-unit segments in one tick.
    let intent = player.decide(&owner, &spec, &world, 3.0);
    assert_eq!(player.segment_index(), 3);
    assert!(player.route_complete());
    assert!(is_random_walk(intent));

    let mut player = PlayerDecision::new();
    player.set_route(&[
        DVec2::new(0.0, 0.0),
        DVec2::new(10.0, 0.0),
        DVec2::new(10.0, 10.0),
    ]);
    let intent = player.decide(&owner, &spec, &world, 3.0);
    assert_eq!(player.segment_index(), 1);
    assert!((player.traveled_on_segment() - 5.0).abs() < 1e-9);
    assert_move_vel(intent, DVec2::new(0.0, 5.0));
}

#[test]
fn test_player_skips_zero_length_segment() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let world = Fixture::new(vec![owner]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();
    player.set_route(&[
        DVec2::new(0.0, 0.0),
        DVec2::new(0.0, 0.0),
        DVec2::new(10.0, 0.0),
    ]);

    let intent = player.decide(&owner, &spec, &world, 0.1);
    assert_eq!(player.segment_index(), 1);
    assert_move_vel(intent, DVec2::new(5.0, 0.0));
}

#[test]
fn test_player_route_edge_cases() {
    let mut player = PlayerDecision::new();
    assert!(player.route_complete(), "No route means nothing to follow");

    player.set_route(&[DVec2::ZERO, DVec2::new(10.0, 0.0)]);
    player.set_route(&[]);
    assert!(!player.route_complete(), "Empty route is ignored");

    player.set_route(&[DVec2::new(3.0, 3.0)]);
    assert!(player.route_complete(), "Single point gives no segments");
}

#[test]
fn test_player_new_route_resets_cursor() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let world = Fixture::new(vec![owner]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();
    player.set_route(&[DVec2::ZERO, DVec2::new(10.0, 0.0), DVec2::new(10.0, 10.0)]);
    player.decide(&owner, &spec, &world, 3.0);
    assert_eq!(player.segment_index(), 1);

    player.set_route(&[DVec2::ZERO, DVec2::new(0.0, -10.0)]);
    assert_eq!(player.segment_index(), 0);
    assert_eq!(player.traveled_on_segment(), 0.0);
}

// ---- Player strategy: enemy search ----

#[test]
fn test_player_diverts_to_enemy_in_range() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let world = Fixture::new(vec![
        owner,
        view(1, Faction::Player, 1.0, 0.0),
        view(2, Faction::Enemy, 20.0, 0.0),
        view(3, Faction::Enemy, 40.0, 0.0),
    ]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();
    player.set_route(&[DVec2::ZERO, DVec2::new(0.0, 100.0)]);

    let intent = player.decide(&owner, &spec, &world, 0.1);
    assert_eq!(player.target(), Some(UnitId(2)));
    assert_move_to(intent, DVec2::new(20.0, 0.0));
}

#[test]
fn test_player_ignores_enemy_out_of_detect_range() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let world = Fixture::new(vec![owner, view(1, Faction::Enemy, 50.1, 0.0)]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();

    let intent = player.decide(&owner, &spec, &world, 0.1);
    assert!(player.target().is_none());
    assert!(is_random_walk(intent));
}

#[test]
fn test_player_route_odometer_runs_while_chasing() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let world = Fixture::new(vec![owner, view(1, Faction::Enemy, 30.0, 0.0)]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();
    player.set_route(&[DVec2::ZERO, DVec2::new(0.0, 10.0)]);

    assert_move_to(
        player.decide(&owner, &spec, &world, 1.0),
        DVec2::new(30.0, 0.0),
    );
    assert_move_to(
        player.decide(&owner, &spec, &world, 1.0),
        DVec2::new(30.0, 0.0),
    );
    assert!(
        player.route_complete(),
        "Route progress is consumed during the chase"
    );
}

#[test]
fn test_player_dead_target_falls_back_before_next_search() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let mut world = Fixture::new(vec![owner, view(1, Faction::Enemy, 30.0, 0.0)]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();
    player.set_route(&[DVec2::ZERO, DVec2::new(0.0, 100.0)]);

    assert_move_to(
        player.decide(&owner, &spec, &world, 0.1),
        DVec2::new(30.0, 0.0),
    );
    world.kill(UnitId(1));

    assert_move_vel(
        player.decide(&owner, &spec, &world, 0.1),
        DVec2::new(0.0, 5.0),
    );
    assert!(player.target().is_none(), "Dead target is forgotten");
}

#[test]
fn test_player_removed_target_cleared() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let mut world = Fixture::new(vec![owner, view(1, Faction::Enemy, 30.0, 0.0)]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();

    player.decide(&owner, &spec, &world, 0.1);
    assert_eq!(player.target(), Some(UnitId(1)));

    world.remove(UnitId(1));
    assert!(is_random_walk(player.decide(&owner, &spec, &world, 0.1)));
    assert!(player.target().is_none());
    assert_eq!(
        Decision::Player(player).target(),
        None,
        "Capability agrees with the strategy"
    );
}

#[test]
fn test_player_search_timer_catches_up() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let world = Fixture::new(vec![owner]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();

    player.decide(&owner, &spec, &world, 1.7);
    let timer = player.search_timer();
    assert!(
        timer > 0.0 && timer <= PLAYER_SEARCH_INTERVAL,
        "Timer back in (0, interval] after catch-up: {timer}"
    );
    assert!((timer - 0.3).abs() < 1e-9);
}

#[test]
fn test_player_huge_dt_terminates() {
    let owner = view(0, Faction::Player, 0.0, 0.0);
    let world = Fixture::new(vec![owner, view(1, Faction::Enemy, 30.0, 0.0)]);
    let spec = spec(Faction::Player);
    let mut player = PlayerDecision::new();
    player.set_route(&[DVec2::ZERO, DVec2::new(10.0, 0.0)]);

    assert_move_to(
        player.decide(&owner, &spec, &world, 1e16),
        DVec2::new(30.0, 0.0),
    );
    let timer = player.search_timer();
    assert!(timer > 0.0 && timer <= PLAYER_SEARCH_INTERVAL, "timer={timer}");
    assert!(player.route_complete());
}

#[test]
fn test_player_bind_phase_is_seeded() {
    let mut rng_a = ChaCha8Rng::seed_from_u64(7);
    let mut rng_b = ChaCha8Rng::seed_from_u64(7);
    let mut a = PlayerDecision::new();
    let mut b = PlayerDecision::new();
    a.bind(&mut rng_a);
    b.bind(&mut rng_b);
    assert_eq!(a.search_timer(), b.search_timer());
    assert!((0.0..PLAYER_SEARCH_INTERVAL).contains(&a.search_timer()));

    let mut c = PlayerDecision::new();
    c.bind(&mut rng_a);
    assert_ne!(a.search_timer(), c.search_timer(), "Later binds draw new phases");
}

// ---- Chase strategy ----

#[test]
fn test_chase_targets_nearest_opponent_without_range_limit() {
    let owner = view(0, Faction::Enemy, 0.0, 0.0);
    let world = Fixture::new(vec![
        owner,
        view(1, Faction::Enemy, 1.0, 0.0),
        view(2, Faction::Player, 1000.0, 0.0),
        view(3, Faction::Player, 0.0, -500.0),
    ]);
    let mut chase = ChaseDecision::new();

    let intent = chase.decide(&owner, &world, 0.1);
    assert_eq!(chase.target(), Some(UnitId(3)));
    assert_move_to(intent, DVec2::new(0.0, -500.0));
}

#[test]
fn test_chase_without_opponents_wanders() {
    let owner = view(0, Faction::Enemy, 0.0, 0.0);
    let world = Fixture::new(vec![owner, view(1, Faction::Enemy, 5.0, 0.0)]);
    let mut chase = ChaseDecision::new();

    assert!(is_random_walk(chase.decide(&owner, &world, 0.1)));
    assert!(chase.target().is_none());
}

#[test]
fn test_chase_dead_target_falls_back_until_rescan() {
    let owner = view(0, Faction::Enemy, 0.0, 0.0);
    let mut world = Fixture::new(vec![
        owner,
        view(1, Faction::Player, 10.0, 0.0),
        view(2, Faction::Player, 80.0, 0.0),
    ]);
    let mut chase = ChaseDecision::new();

    assert_move_to(chase.decide(&owner, &world, 0.1), DVec2::new(10.0, 0.0));
    world.kill(UnitId(1));

    for _ in 0..3 {
        let intent = chase.decide(&owner, &world, 0.1);
        assert!(is_random_walk(intent), "Stale target must not be chased: {intent:?}");
        assert!(chase.target().is_none());
    }

    // Next rescan picks up the remaining opponent.
    assert_move_to(chase.decide(&owner, &world, 2.0), DVec2::new(80.0, 0.0));
    assert_eq!(chase.target(), Some(UnitId(2)));
}

#[test]
fn test_chase_removed_target_falls_back() {
    let owner = view(0, Faction::Enemy, 0.0, 0.0);
    let mut world = Fixture::new(vec![owner, view(1, Faction::Player, 10.0, 0.0)]);
    let mut chase = ChaseDecision::new();

    chase.decide(&owner, &world, 0.1);
    world.remove(UnitId(1));
    assert!(is_random_walk(chase.decide(&owner, &world, 0.1)));
    assert!(chase.target().is_none());
}

#[test]
fn test_chase_follows_moving_target_between_rescans() {
    let owner = view(0, Faction::Enemy, 0.0, 0.0);
    let mut world = Fixture::new(vec![owner, view(1, Faction::Player, 10.0, 0.0)]);
    let mut chase = ChaseDecision::new();

    chase.decide(&owner, &world, 0.1);
    world.units[1].position = DVec2::new(12.0, 3.0);
    assert_move_to(chase.decide(&owner, &world, 0.1), DVec2::new(12.0, 3.0));
}

#[test]
fn test_chase_rescan_timer_catches_up() {
    let owner = view(0, Faction::Enemy, 0.0, 0.0);
    let world = Fixture::new(vec![owner]);
    let mut chase = ChaseDecision::new();

    chase.decide(&owner, &world, 7.0);
    assert!((chase.rescan_timer() - 1.0).abs() < 1e-9);
}

#[test]
fn test_chase_huge_dt_terminates() {
    let owner = view(0, Faction::Enemy, 0.0, 0.0);
    let world = Fixture::new(vec![owner, view(1, Faction::Player, 10.0, 0.0)]);
    let mut chase = ChaseDecision::new();

    assert_move_to(chase.decide(&owner, &world, 1e17), DVec2::new(10.0, 0.0));
    let timer = chase.rescan_timer();
    assert!(timer > 0.0 && timer <= CHASE_RESCAN_INTERVAL, "timer={timer}");
}

#[test]
fn test_countdown_fires_once_per_call() {
    let mut timer = 0.2;
    assert!(!countdown(&mut timer, 0.1, 0.5));
    assert!((timer - 0.1).abs() < 1e-9);

    // Lands exactly on zero: fires and restarts a full interval.
    assert!(countdown(&mut timer, 0.1, 0.5));
    assert!((timer - 0.5).abs() < 1e-9);

    // Several periods missed at once still fire a single time.
    assert!(countdown(&mut timer, 1.7, 0.5));
    assert!((timer - 0.3).abs() < 1e-9);
}

#[test]
fn test_chase_bind_phase_in_interval() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..50 {
        let mut chase = ChaseDecision::new();
        chase.bind(&mut rng);
        assert!((0.0..CHASE_RESCAN_INTERVAL).contains(&chase.rescan_timer()));
    }
}

// ---- Decision dispatch ----

#[test]
fn test_decision_capabilities() {
    let mut player = DecisionKind::Player.build();
    let mut chase = DecisionKind::Chase.build();
    assert_eq!(player.kind(), DecisionKind::Player);
    assert_eq!(chase.kind(), DecisionKind::Chase);
    assert!(player.is_player_controlled());
    assert!(!chase.is_player_controlled());

    assert!(!player.route_active());
    assert!(player.set_route(&[DVec2::ZERO, DVec2::new(5.0, 0.0)]));
    assert!(player.route_active());

    assert!(!chase.set_route(&[DVec2::ZERO, DVec2::new(5.0, 0.0)]));
    assert!(!chase.route_active());
}

#[test]
fn test_decision_dispatches_decide() {
    let owner = view(0, Faction::Enemy, 0.0, 0.0);
    let world = Fixture::new(vec![owner, view(1, Faction::Player, 3.0, 4.0)]);
    let mut decision = Decision::Chase(ChaseDecision::new());

    let intent = decision.decide(&owner, &spec(Faction::Enemy), &world, 0.1);
    assert_move_to(intent, DVec2::new(3.0, 4.0));
    assert_eq!(decision.target(), Some(UnitId(1)));
}
