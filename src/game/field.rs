//! Live obstacle pairs and their score zones.
//!
//! The field is a plain arena owned by the session. Each pair carries its own
//! expiry timestamp on the session timeline, so clearing the field on restart
//! drops every pending expiry along with the entities.

use super::types::{Aabb, EntityId, Vec3};
use crate::core::config::SessionConfig;

/// One of the two solid halves of an obstacle pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleVolume {
    pub bounds: Aabb,
}

/// Trigger volume spanning the gap of an obstacle pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreZone {
    pub bounds: Aabb,
    /// Set on the first qualifying overlap; the zone never scores again.
    pub scored: bool,
}

/// Two lethal volumes straddling a gap, plus the co-located score zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstaclePair {
    pub id: EntityId,
    /// Height of the middle of the gap.
    pub gap_center: f64,
    pub gap_size: f64,
    /// Forward (z) coordinate of the pair.
    pub lane: f64,
    pub top: ObstacleVolume,
    pub bottom: ObstacleVolume,
    pub zone: ScoreZone,
    pub spawned_at: f64,
    pub expires_at: f64,
}

impl ObstaclePair {
    /// Lay out a pair whose gap is centered on `gap_center` at forward position `lane`.
    pub fn new(id: EntityId, gap_center: f64, lane: f64, config: &SessionConfig, now: f64) -> Self {
        let half_gap = config.gap_size / 2.0;
        let half_height = config.obstacle_height / 2.0;
        let half_width = config.obstacle_width / 2.0;
        let solid_extents = Vec3::new(half_width, half_height, half_width);

        let top = ObstacleVolume {
            bounds: Aabb::new(
                Vec3::new(0.0, gap_center + half_gap + half_height, lane),
                solid_extents,
            ),
        };
        let bottom = ObstacleVolume {
            bounds: Aabb::new(
                Vec3::new(0.0, gap_center - half_gap - half_height, lane),
                solid_extents,
            ),
        };
        let zone = ScoreZone {
            bounds: Aabb::new(
                Vec3::new(0.0, gap_center, lane),
                Vec3::new(half_width, half_gap, config.score_zone_depth / 2.0),
            ),
            scored: false,
        };

        Self {
            id,
            gap_center,
            gap_size: config.gap_size,
            lane,
            top,
            bottom,
            zone,
            spawned_at: now,
            expires_at: now + config.obstacle_lifetime,
        }
    }

    /// Lowest point of the gap.
    pub fn gap_bottom(&self) -> f64 {
        self.gap_center - self.gap_size / 2.0
    }

    /// Highest point of the gap.
    pub fn gap_top(&self) -> f64 {
        self.gap_center + self.gap_size / 2.0
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now >= self.expires_at
    }
}

/// Arena of live obstacle pairs, in spawn order.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    pairs: Vec<ObstaclePair>,
    next_id: u64,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pair and its zone. Returns the new pair's id.
    pub fn spawn(
        &mut self,
        gap_center: f64,
        lane: f64,
        config: &SessionConfig,
        now: f64,
    ) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.pairs
            .push(ObstaclePair::new(id, gap_center, lane, config, now));
        id
    }

    /// Remove every pair whose lifetime has run out. Returns the removed ids.
    pub fn expire(&mut self, now: f64) -> Vec<EntityId> {
        let mut expired = Vec::new();
        self.pairs.retain(|pair| {
            if pair.is_expired(now) {
                expired.push(pair.id);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Set the zone's scored flag. Returns true only the first time.
    pub fn mark_scored(&mut self, id: EntityId) -> bool {
        match self.pairs.iter_mut().find(|p| p.id == id) {
            Some(pair) if !pair.zone.scored => {
                pair.zone.scored = true;
                true
            }
            _ => false,
        }
    }

    /// Drop every live pair. Ids keep counting up so stale ids never alias.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn get(&self, id: EntityId) -> Option<&ObstaclePair> {
        self.pairs.iter().find(|p| p.id == id)
    }

    /// Lane of the most recently spawned live pair.
    pub fn last_lane(&self) -> Option<f64> {
        self.pairs.last().map(|p| p.lane)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
