//! Euler integration and collision push-out.
//!
//! Push-out is a penalty step, not a solver: each tick an overlapping unit
//! is nudged a fixed distance away from its contact points. Deep overlaps
//! take several ticks to clear.

use glam::DVec2;

use skirmish_core::geometry::Circle;
use skirmish_core::obstacle::Obstacle;
use skirmish_core::types::UnitId;

use crate::roster::Roster;
use crate::unit::Unit;

/// Integrate one unit, then push it out of whatever it overlaps.
pub fn run(roster: &mut Roster, obstacles: &[Obstacle], id: UnitId, dt: f64, push_coefficient: f64) {
    let Some(unit) = roster.get_mut(id) else {
        return;
    };
    integrate(unit, dt);

    let body = Circle::new(unit.position, unit.spec().intersect_range);
    let contacts = contact_points(roster, obstacles, id, &body);
    if let Some(direction) = push_direction(body.center, &contacts) {
        if let Some(unit) = roster.get_mut(id) {
            unit.position += direction * push_coefficient;
        }
    }
}

/// position += heading direction * speed * dt. No acceleration, no drag.
pub fn integrate(unit: &mut Unit, dt: f64) {
    let speed = unit.speed.min(unit.spec().max_speed);
    unit.position += DVec2::from_angle(unit.heading) * speed * dt;
}

/// Boundary crossings of `body` with every obstacle and every other living unit.
pub fn contact_points(
    roster: &Roster,
    obstacles: &[Obstacle],
    id: UnitId,
    body: &Circle,
) -> Vec<DVec2> {
    let mut contacts: Vec<DVec2> = obstacles
        .iter()
        .flat_map(|obstacle| obstacle.intersect_points(body.center, body.radius))
        .collect();

    for other in roster.iter() {
        if other.id() == id || !other.is_alive() {
            continue;
        }
        let other_body = Circle::new(other.position(), other.spec().intersect_range);
        contacts.extend(body.circle_intersections(&other_body));
    }
    contacts
}

/// Unit direction away from the contacts, each weighted by 1 / distance.
/// `None` when there is nothing to push against or the pushes cancel.
pub fn push_direction(center: DVec2, contacts: &[DVec2]) -> Option<DVec2> {
    contacts
        .iter()
        .filter_map(|&contact| {
            let away = center - contact;
            let dist = away.length();
            (dist > 0.0).then(|| away / (dist * dist))
        })
        .fold(DVec2::ZERO, |sum, push| sum + push)
        .try_normalize()
}
