//! Demo Stage
//!
//! The scene that ties the pool and camera together: a backdrop, a player
//! moved with WASD and clamped to the playfield, a camera that follows it,
//! scroll-wheel zoom, projectiles fired with space or launched toward a
//! clicked world position, and falling asteroids that projectiles shoot
//! down.
//!
//! Everything runs synchronously inside one tick: input snapshot in, update,
//! render. Update logic never queries the input backend directly so it can
//! be driven from tests.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{Config, DebugOptions};
use crate::input::InputState;

use super::camera::Camera;
use super::entity::{Entity, EntityKind};
use super::pool::{EntityId, EntityPool, Relocation};
use super::sprite::Sprite;
use super::transform::Transform;

/// Player movement speed in world units per second
const PLAYER_SPEED: f32 = 3.0;
/// Player half extent in world units, used for the playfield clamp
const PLAYER_HALF_EXTENT: f32 = 0.5;
/// Projectile speed in world units per second
const PROJECTILE_SPEED: f32 = 8.0;
/// Zoom change per scroll unit per second
const ZOOM_SPEED: f32 = 1.0;
/// Distance from the camera beyond which projectiles are destroyed
const PROJECTILE_RANGE: f32 = 12.0;

/// Asteroids kept in rotation
const ASTEROID_COUNT: usize = 10;
/// Asteroid fall speed range in world units per second
const ASTEROID_SPEED_MIN: f32 = 0.8;
const ASTEROID_SPEED_MAX: f32 = 3.1;
/// Initial spawn delay upper bound in seconds
const ASTEROID_SPAWN_DELAY_MAX: f32 = 5.0;
/// Respawn delay range after an asteroid is shot down, in seconds
const ASTEROID_RESPAWN_DELAY_MIN: f32 = 3.0;
const ASTEROID_RESPAWN_DELAY_MAX: f32 = 8.0;
/// Margin outside the playfield where asteroids enter and leave
const ASTEROID_MARGIN: f32 = 1.0;
/// Projectile-asteroid hit threshold, roughly the two radii summed
const COLLISION_DISTANCE: f32 = 0.6;

/// Atlas cell size in texture pixels
const ATLAS_CELL: f32 = 16.0;
/// Background texture source size
const BACKGROUND_SIZE: f32 = 1024.0;

/// The running scene: entity pool, active camera and loaded textures.
pub struct Stage {
    pool: EntityPool,
    pub camera: Camera,
    debug: DebugOptions,

    atlas: Option<Texture2D>,
    background: Option<Texture2D>,

    /// Handle of the player entity, kept fresh across relocations
    player: Option<EntityId>,
    /// Playfield half extent in world units (the backdrop coverage at zoom 1)
    world_bounds: Vec2,
    /// Countdown per pending asteroid; a timer reaching zero spawns one
    asteroid_timers: Vec<f32>,
}

impl Stage {
    /// Build a stage from config and (possibly missing) textures, with the
    /// initial entities spawned.
    pub fn new(config: &Config, atlas: Option<Texture2D>, background: Option<Texture2D>) -> Self {
        let viewport = vec2(config.window_width as f32, config.window_height as f32);
        let mut stage = Self {
            pool: EntityPool::new(config.entity_capacity),
            camera: Camera::new(config.pixels_per_unit, viewport),
            debug: config.debug,
            atlas,
            background,
            player: None,
            world_bounds: viewport / config.pixels_per_unit * 0.5,
            asteroid_timers: Vec::with_capacity(ASTEROID_COUNT),
        };
        stage.reset();
        stage
    }

    /// Clear all entities and rebuild the initial scene.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.camera.world_position = Vec2::ZERO;
        self.camera.zoom = 1.0;

        // Backdrop scaled to cover the viewport at zoom 1, centered on the
        // world origin
        let backdrop_scale = self.camera.viewport / self.camera.pixels_per_unit;
        let _ = self.spawn(Entity {
            kind: EntityKind::Background,
            transform: Transform::new(Vec2::ZERO, backdrop_scale),
            sprite: Sprite::new(
                self.background.clone(),
                Rect::new(0.0, 0.0, BACKGROUND_SIZE, BACKGROUND_SIZE),
            )
            .with_pivot(vec2(0.5, 0.5)),
            velocity: Vec2::ZERO,
        });

        // Player, pivot raised so its position sits near the sprite's
        // visual center
        self.player = self.spawn(Entity {
            kind: EntityKind::Player,
            transform: Transform::IDENTITY,
            sprite: Sprite::new(self.atlas.clone(), Sprite::sheet_cell(0, 9, ATLAS_CELL, ATLAS_CELL))
                .with_pivot(vec2(0.5, 0.3)),
            velocity: Vec2::ZERO,
        });

        // Stagger the first asteroid wave
        self.asteroid_timers.clear();
        for _ in 0..ASTEROID_COUNT {
            self.asteroid_timers
                .push(gen_range(0.0, ASTEROID_SPAWN_DELAY_MAX));
        }
    }

    /// Create an entity and populate its slot. Pool exhaustion is non-fatal:
    /// it logs a warning and the spawn is skipped.
    fn spawn(&mut self, entity: Entity) -> Option<EntityId> {
        match self.pool.create() {
            Ok(id) => {
                // The slot holds stale leftovers; overwrite the whole record
                *self.pool.get_mut(id)? = entity;
                Some(id)
            }
            Err(e) => {
                log::warn!("spawn skipped: {}", e);
                None
            }
        }
    }

    /// Destroy an entity, patching the cached player handle when the
    /// swap-remove relocated it. Returns the relocation so callers holding
    /// further handles can patch theirs too.
    fn despawn(&mut self, id: EntityId) -> Option<Relocation> {
        match self.pool.destroy(id) {
            Ok(relocation) => {
                if let Some(moved) = relocation {
                    if self.player == Some(moved.from) {
                        self.player = Some(moved.to);
                    }
                }
                relocation
            }
            Err(e) => {
                log::error!("despawn failed: {}", e);
                None
            }
        }
    }

    /// Advance the scene by `delta` seconds.
    pub fn update(&mut self, input: &InputState, delta: f32) {
        // Player movement, clamped to the playfield
        let clamp_limit = self.world_bounds - Vec2::splat(PLAYER_HALF_EXTENT);
        let player_position = self.player.and_then(|id| {
            let entity = self.pool.get_mut(id)?;
            entity
                .transform
                .translate(input.direction() * PLAYER_SPEED * delta);
            entity.transform.position = entity.transform.position.clamp(-clamp_limit, clamp_limit);
            Some(entity.transform.position)
        });

        // Fire straight up from the player
        if input.fire {
            if let Some(origin) = player_position {
                self.spawn_projectile(origin, vec2(0.0, PROJECTILE_SPEED));
            }
        }

        // Click: launch from the player toward the clicked world position.
        // A click with no usable direction (cursor on the player, zoom at
        // zero) spawns nothing rather than a parked projectile.
        if input.clicked {
            if let Some(origin) = player_position {
                let target = self.camera.screen_to_world(input.mouse);
                let direction = (target - origin).normalize_or_zero();
                if direction != Vec2::ZERO {
                    self.spawn_projectile(origin, direction * PROJECTILE_SPEED);
                }
            }
        }

        self.tick_asteroid_timers(delta);

        // Integrate velocities
        for (_, entity) in self.pool.iter_mut() {
            let step = entity.velocity * delta;
            entity.transform.translate(step);
        }

        // Camera follows the player; scroll adjusts zoom, no clamp
        if let Some(position) = player_position {
            self.camera.world_position = position;
        }
        self.camera.zoom += input.scroll * ZOOM_SPEED * delta;

        self.collide_projectiles();
        self.despawn_out_of_bounds();
    }

    fn spawn_projectile(&mut self, origin: Vec2, velocity: Vec2) {
        let _ = self.spawn(Entity {
            kind: EntityKind::Projectile,
            transform: Transform::from_position(origin).with_scale(vec2(0.25, 0.25)),
            sprite: Sprite::new(self.atlas.clone(), Sprite::sheet_cell(7, 8, ATLAS_CELL, ATLAS_CELL))
                .with_pivot(vec2(0.5, 0.5)),
            velocity,
        });
    }

    fn spawn_asteroid(&mut self) {
        let lane = self.world_bounds.x - ASTEROID_MARGIN;
        let _ = self.spawn(Entity {
            kind: EntityKind::Asteroid,
            transform: Transform::from_position(vec2(
                gen_range(-lane, lane),
                self.world_bounds.y + ASTEROID_MARGIN,
            )),
            sprite: Sprite::new(
                self.atlas.clone(),
                Sprite::sheet_cell(10, 8, ATLAS_CELL, ATLAS_CELL),
            )
            .with_pivot(vec2(0.5, 0.5)),
            velocity: vec2(0.0, -gen_range(ASTEROID_SPEED_MIN, ASTEROID_SPEED_MAX)),
        });
    }

    /// Count down pending asteroid timers, spawning one per expired timer.
    fn tick_asteroid_timers(&mut self, delta: f32) {
        let mut index = 0;
        while index < self.asteroid_timers.len() {
            self.asteroid_timers[index] -= delta;
            if self.asteroid_timers[index] > 0.0 {
                index += 1;
            } else {
                self.asteroid_timers.swap_remove(index);
                self.spawn_asteroid();
            }
        }
    }

    /// Squared-distance collision pass: a projectile within threshold of an
    /// asteroid destroys both, and the asteroid is queued for respawn.
    fn collide_projectiles(&mut self) {
        let threshold = COLLISION_DISTANCE * COLLISION_DISTANCE;
        let mut hits: Vec<(EntityId, EntityId)> = Vec::new();
        for (projectile_id, projectile) in self.pool.iter() {
            if projectile.kind != EntityKind::Projectile {
                continue;
            }
            let hit = self.pool.iter().find(|(_, other)| {
                other.kind == EntityKind::Asteroid
                    && projectile
                        .transform
                        .position
                        .distance_squared(other.transform.position)
                        < threshold
            });
            if let Some((asteroid_id, _)) = hit {
                hits.push((projectile_id, asteroid_id));
            }
        }

        while let Some((projectile_id, asteroid_id)) = hits.pop() {
            // An earlier pair may have consumed this asteroid already
            if !self.pool.is_alive(asteroid_id) {
                continue;
            }
            for id in [projectile_id, asteroid_id] {
                if !self.pool.is_alive(id) {
                    continue;
                }
                if let Some(relocation) = self.despawn(id) {
                    // Keep the remaining pairs' handles fresh
                    for (p, a) in hits.iter_mut() {
                        if *p == relocation.from {
                            *p = relocation.to;
                        }
                        if *a == relocation.from {
                            *a = relocation.to;
                        }
                    }
                }
            }
            self.asteroid_timers.push(gen_range(
                ASTEROID_RESPAWN_DELAY_MIN,
                ASTEROID_RESPAWN_DELAY_MAX,
            ));
        }
    }

    /// Remove entities that left the playfield: projectiles past their
    /// range, asteroids below the bottom edge (those re-enter the spawn
    /// rotation). Walks the live range backward because each destroy swaps
    /// the last live slot down. A non-finite position counts as gone so a
    /// poisoned entity cannot hold a slot forever.
    fn despawn_out_of_bounds(&mut self) {
        for index in (0..self.pool.live_count()).rev() {
            let Some(id) = self.pool.id_at(index) else {
                continue;
            };
            let Some(entity) = self.pool.get(id) else {
                continue;
            };
            let position = entity.transform.position;
            let gone = match entity.kind {
                EntityKind::Projectile => {
                    !position.is_finite()
                        || position.distance(self.camera.world_position) > PROJECTILE_RANGE
                }
                EntityKind::Asteroid => {
                    !position.is_finite() || position.y < -self.world_bounds.y - ASTEROID_MARGIN
                }
                _ => false,
            };
            if !gone {
                continue;
            }
            let recycle = entity.kind == EntityKind::Asteroid;
            self.despawn(id);
            if recycle {
                self.asteroid_timers
                    .push(gen_range(0.0, ASTEROID_SPAWN_DELAY_MAX));
            }
        }
    }

    /// Draw the live entities through the camera, plus debug overlays.
    pub fn render(&self) {
        for (_, entity) in self.pool.iter() {
            let dest = self.camera.world_to_screen(
                entity.transform.position,
                entity.transform.scale,
                entity.sprite.pivot,
            );

            if self.debug.render_textures {
                entity.sprite.draw(dest);
            }
            if self.debug.render_outlines {
                draw_rectangle_lines(dest.x, dest.y, dest.w, dest.h, 1.0, GREEN);
            }
        }

        // Viewport border
        draw_rectangle_lines(
            0.0,
            0.0,
            self.camera.viewport.x,
            self.camera.viewport.y,
            2.0,
            MAGENTA,
        );
    }

    /// Number of live entities (for the debug overlay)
    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    /// Whether the player entity is alive
    pub fn player_alive(&self) -> bool {
        self.player.is_some_and(|id| self.pool.is_alive(id))
    }

    #[cfg(test)]
    fn player_position(&self) -> Option<Vec2> {
        self.player
            .and_then(|id| self.pool.get(id))
            .map(|e| e.transform.position)
    }
}
