//! Overlap detection and classification.

use super::field::{ObstacleField, ObstaclePair, ObstacleVolume, ScoreZone};
use super::types::{Aabb, Classification, EntityId};

/// Anything the flyer can run into.
pub trait Collidable {
    fn bounds(&self) -> Aabb;
    fn classification(&self) -> Classification;
}

impl Collidable for ObstacleVolume {
    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn classification(&self) -> Classification {
        Classification::Lethal
    }
}

impl Collidable for ScoreZone {
    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn classification(&self) -> Classification {
        Classification::Scoring
    }
}

impl ObstaclePair {
    /// Every collidable volume belonging to this pair.
    pub fn volumes(&self) -> [&dyn Collidable; 3] {
        [&self.top, &self.bottom, &self.zone]
    }
}

/// One overlap between the flyer and a volume of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub pair: EntityId,
    pub classification: Classification,
}

impl Contact {
    pub fn is_lethal(&self) -> bool {
        self.classification == Classification::Lethal
    }
}

/// Stateless per-frame overlap check.
pub struct CollisionClassifier;

impl CollisionClassifier {
    /// Every volume the flyer currently overlaps, in field order.
    pub fn classify(flyer: &Aabb, field: &ObstacleField) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for pair in field.pairs() {
            for volume in pair.volumes() {
                if volume.bounds().overlaps(flyer) {
                    contacts.push(Contact {
                        pair: pair.id,
                        classification: volume.classification(),
                    });
                }
            }
        }
        contacts
    }

    /// Whether any contact is lethal.
    pub fn any_lethal(contacts: &[Contact]) -> bool {
        contacts.iter().any(Contact::is_lethal)
    }

    /// Pairs whose score zone the flyer is inside, including already-scored ones.
    pub fn scoring_pairs(contacts: &[Contact]) -> impl Iterator<Item = EntityId> + '_ {
        contacts
            .iter()
            .filter(|c| c.classification == Classification::Scoring)
            .map(|c| c.pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SessionConfig;
    use crate::game::types::Vec3;

    fn field_with_pair(gap_center: f64, lane: f64) -> (ObstacleField, EntityId) {
        let config = SessionConfig::default();
        let mut field = ObstacleField::new();
        let id = field.spawn(gap_center, lane, &config, 0.0);
        (field, id)
    }

    #[test]
    fn test_classifications() {
        let (field, _) = field_with_pair(0.0, 10.0);
        let pair = &field.pairs()[0];
        let kinds: Vec<Classification> = pair.volumes().iter().map(|v| v.classification()).collect();
        assert_eq!(
            kinds,
            vec![
                Classification::Lethal,
                Classification::Lethal,
                Classification::Scoring
            ]
        );
    }

    #[test]
    fn test_no_contact_far_away() {
        let (field, _) = field_with_pair(0.0, 10.0);
        let flyer = Aabb::cube(Vec3::ZERO, 0.3);
        assert!(CollisionClassifier::classify(&flyer, &field).is_empty());
    }

    #[test]
    fn test_flying_through_gap_scores() {
        let (field, id) = field_with_pair(0.0, 10.0);
        let flyer = Aabb::cube(Vec3::new(0.0, 0.0, 10.0), 0.3);
        let contacts = CollisionClassifier::classify(&flyer, &field);
        assert!(!CollisionClassifier::any_lethal(&contacts));
        assert_eq!(
            CollisionClassifier::scoring_pairs(&contacts).collect::<Vec<_>>(),
            vec![id]
        );
    }

    #[test]
    fn test_hitting_bottom_is_lethal() {
        let (field, id) = field_with_pair(2.0, 10.0);
        // Gap spans 0..4, flyer well below it
        let flyer = Aabb::cube(Vec3::new(0.0, -1.5, 10.0), 0.3);
        let contacts = CollisionClassifier::classify(&flyer, &field);
        assert!(CollisionClassifier::any_lethal(&contacts));
        assert!(contacts.iter().all(|c| c.pair == id));
    }

    #[test]
    fn test_grazing_edge_hits_both() {
        let (field, _) = field_with_pair(0.0, 10.0);
        // Straddles the top inner face at y = 2.0
        let flyer = Aabb::cube(Vec3::new(0.0, 2.0, 10.0), 0.3);
        let contacts = CollisionClassifier::classify(&flyer, &field);
        assert!(CollisionClassifier::any_lethal(&contacts));
        assert_eq!(CollisionClassifier::scoring_pairs(&contacts).count(), 1);
    }

    #[test]
    fn test_already_scored_zone_still_reported() {
        let (mut field, id) = field_with_pair(0.0, 10.0);
        field.mark_scored(id);
        let flyer = Aabb::cube(Vec3::new(0.0, 0.0, 10.0), 0.3);
        let contacts = CollisionClassifier::classify(&flyer, &field);
        // Classification is stateless; the scored flag is enforced by the session
        assert_eq!(CollisionClassifier::scoring_pairs(&contacts).count(), 1);
    }
}
