use std::fmt;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::StarfieldConfig,
    projection::{Viewport, NEAR_PLANE},
    render::{self, DrawingSurface, Rect},
    star::Star,
};

/// Upper bound on the simulated time of a single tick, in seconds.
pub const MAX_FRAME_DT: f32 = 0.05;

/// Pixels a star may stray outside the viewport before it is recycled.
pub const OFFSCREEN_MARGIN: f32 = 100.0;

/// Where a respawned star starts its flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpawnDepth {
    /// Anywhere in `(1, max_depth]`, used when (re)building the pool.
    Random,
    /// Exactly at the far plane, used for steady-state recycling.
    FarPlane,
}

/// Owns the star pool and advances it one host tick at a time.
///
/// The engine is driven by a single caller: `update` then `render`, once per
/// frame. The pool is rebuilt wholesale whenever the configured star count or
/// the viewport size changes and is otherwise mutated in place.
pub struct StarfieldEngine {
    config: StarfieldConfig,
    stars: Vec<Star>,
    viewport: Option<Viewport>,
    rng: StdRng,
}

impl StarfieldEngine {
    /// Creates an engine seeded from the operating system.
    pub fn new(config: StarfieldConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates an engine with reproducible star placement.
    pub fn with_seed(config: StarfieldConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: StarfieldConfig, rng: StdRng) -> Self {
        Self {
            config,
            stars: Vec::new(),
            viewport: None,
            rng,
        }
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    /// Replaces the configuration snapshot. The pool is only rebuilt on the
    /// next update if the star count differs from the current pool.
    pub fn set_config(&mut self, config: StarfieldConfig) {
        self.config = config;
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Viewport observed by the last pool rebuild.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Advances every star by `dt` seconds for a `width` x `height` viewport.
    ///
    /// An empty viewport makes the tick a no-op.
    pub fn update(&mut self, dt: f32, width: i32, height: i32) {
        let viewport = Viewport::new(width, height);
        if viewport.is_empty() {
            return;
        }

        if self.needs_rebuild(viewport) {
            self.rebuild(viewport);
        }

        let dt = dt.min(MAX_FRAME_DT);
        let Self {
            config, stars, rng, ..
        } = self;
        let travel = config.warp_speed * dt;

        for star in stars.iter_mut() {
            star.begin_tick();
            star.z -= travel;

            if star.z <= NEAR_PLANE {
                respawn(star, config, rng, viewport, SpawnDepth::FarPlane);
                continue;
            }

            star.project(viewport, config.field_of_view);

            if star.is_off_screen(viewport, OFFSCREEN_MARGIN) || star.z > config.max_depth {
                respawn(star, config, rng, viewport, SpawnDepth::FarPlane);
            }
        }
    }

    /// Paints the current pool onto `surface`. Always a full redraw.
    pub fn render<S>(&self, surface: &mut S, bounds: Rect)
    where
        S: DrawingSurface + ?Sized,
    {
        tracing::trace!(?bounds, stars = self.stars.len(), "rendering starfield");
        render::draw_stars(surface, &self.stars, &self.config);
    }

    fn needs_rebuild(&self, viewport: Viewport) -> bool {
        self.viewport != Some(viewport) || self.stars.len() != self.config.star_count
    }

    fn rebuild(&mut self, viewport: Viewport) {
        tracing::debug!(
            stars = self.config.star_count,
            width = viewport.width,
            height = viewport.height,
            "rebuilding star pool"
        );

        self.viewport = Some(viewport);
        self.stars = vec![Star::default(); self.config.star_count];
        for star in &mut self.stars {
            respawn(star, &self.config, &mut self.rng, viewport, SpawnDepth::Random);
        }
    }
}

/// Re-launches `star` from a random lateral offset.
///
/// The star starts from the viewport centre, is projected immediately, and
/// then has its trail origin pinned to the projected position. A freshly
/// spawned star therefore draws no streak on its first frame, instead of a
/// line from the centre out to its spawn point.
fn respawn(
    star: &mut Star,
    config: &StarfieldConfig,
    rng: &mut StdRng,
    viewport: Viewport,
    depth: SpawnDepth,
) {
    star.x = symmetric(rng) * config.spread;
    star.y = symmetric(rng) * config.spread;
    star.z = match depth {
        // (1, max_depth]
        SpawnDepth::Random => config.max_depth - rng.random::<f32>() * (config.max_depth - 1.0),
        SpawnDepth::FarPlane => config.max_depth,
    };

    star.reset_to_center(viewport);
    star.project(viewport, config.field_of_view);
    star.begin_tick();
}

/// Uniform sample in `[-1, 1)`.
fn symmetric(rng: &mut StdRng) -> f32 {
    rng.random::<f32>() * 2.0 - 1.0
}

impl fmt::Debug for StarfieldEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StarfieldEngine")
            .field("config", &self.config)
            .field("stars", &self.stars.len())
            .field("viewport", &self.viewport)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};

    fn engine_with(config: StarfieldConfig) -> StarfieldEngine {
        StarfieldEngine::with_seed(config, 7)
    }

    fn assert_depth_invariant(engine: &StarfieldEngine) {
        let max_depth = engine.config().max_depth;
        for star in engine.stars() {
            assert!(
                star.z == max_depth || star.z > NEAR_PLANE,
                "star escaped the viewing volume: z = {}",
                star.z
            );
        }
    }

    #[test]
    fn first_update_builds_the_pool() {
        let mut engine = engine_with(StarfieldConfig::default());
        assert!(engine.stars().is_empty());

        engine.update(0.016, 800, 600);
        assert_eq!(engine.stars().len(), 800);
        assert_eq!(engine.viewport(), Some(Viewport::new(800, 600)));
    }

    #[test]
    fn empty_viewport_is_a_no_op() {
        let mut engine = engine_with(StarfieldConfig::default());
        engine.update(0.016, 0, 600);
        engine.update(0.016, 800, -5);

        assert!(engine.stars().is_empty());
        assert_eq!(engine.viewport(), None);
    }

    #[test]
    fn depths_stay_inside_the_volume() {
        let mut engine = engine_with(StarfieldConfig::default());
        for frame in 0..600 {
            let dt = if frame % 97 == 0 { 1.0 } else { 0.016 };
            engine.update(dt, 1024, 768);
            assert_depth_invariant(&engine);
        }
    }

    #[test]
    fn single_centred_star_projects_to_center() {
        let config = StarfieldConfig {
            star_count: 1,
            spread: 0.0,
            field_of_view: 500.0,
            max_depth: 220.0,
            warp_speed: 120.0,
            ..Default::default()
        };
        let mut engine = engine_with(config);
        engine.update(0.016, 800, 600);

        let star = engine.stars()[0];
        assert_eq!((star.x, star.y), (0.0, 0.0));
        assert_eq!((star.px, star.py), (400.0, 300.0));
    }

    #[test]
    fn large_steps_are_capped() {
        let config = StarfieldConfig {
            star_count: 64,
            spread: 1.0,
            ..Default::default()
        };
        let mut engine = engine_with(config);
        engine.update(0.0, 800, 600);
        let before: Vec<f32> = engine.stars().iter().map(|star| star.z).collect();

        engine.update(1.0, 800, 600);
        let limit = engine.config().warp_speed * MAX_FRAME_DT;
        for (star, z) in engine.stars().iter().zip(before) {
            if star.z == engine.config().max_depth {
                continue;
            }
            let travelled = z - star.z;
            assert!(travelled <= limit + 1e-3, "travelled {travelled} > {limit}");
            assert!(travelled > 0.0);
        }
    }

    #[test]
    fn resize_reinitialises_around_the_new_center() {
        let config = StarfieldConfig {
            star_count: 16,
            spread: 0.0,
            ..Default::default()
        };
        let mut engine = engine_with(config);
        engine.update(0.016, 800, 600);
        engine.update(0.016, 1920, 1080);

        assert_eq!(engine.viewport(), Some(Viewport::new(1920, 1080)));
        assert_eq!(engine.stars().len(), 16);
        for star in engine.stars() {
            assert_eq!((star.prev_px, star.prev_py), (960.0, 540.0));
            assert_eq!((star.px, star.py), (960.0, 540.0));
        }
    }

    #[test]
    fn star_count_change_rebuilds_pool() {
        let mut engine = engine_with(StarfieldConfig {
            star_count: 10,
            ..Default::default()
        });
        engine.update(0.016, 640, 480);
        assert_eq!(engine.stars().len(), 10);

        engine.set_config(StarfieldConfig {
            star_count: 25,
            ..Default::default()
        });
        engine.update(0.016, 640, 480);
        assert_eq!(engine.stars().len(), 25);
    }

    #[test]
    fn unrelated_config_changes_keep_the_pool() {
        // A narrow spread keeps far-plane respawns on screen, so nothing is
        // recycled while the field stands still.
        let mut engine = engine_with(StarfieldConfig {
            star_count: 10,
            spread: 50.0,
            ..Default::default()
        });
        engine.update(0.016, 640, 480);
        let lateral: Vec<(f32, f32)> = engine.stars().iter().map(|s| (s.x, s.y)).collect();

        engine.set_config(StarfieldConfig {
            star_count: 10,
            spread: 50.0,
            warp_speed: 0.0,
            ..Default::default()
        });
        engine.update(0.016, 640, 480);

        let after: Vec<(f32, f32)> = engine.stars().iter().map(|s| (s.x, s.y)).collect();
        assert_eq!(lateral, after);
    }

    #[test]
    fn near_plane_crossing_respawns_with_no_trail() {
        let config = StarfieldConfig {
            star_count: 1,
            spread: 10.0,
            max_depth: 2.0,
            warp_speed: 100.0,
            ..Default::default()
        };
        let mut engine = engine_with(config);
        // Every initial depth lies in (1, 2]; one capped step moves 5 units.
        engine.update(1.0, 800, 600);

        let star = engine.stars()[0];
        assert_eq!(star.z, 2.0);
        assert_eq!((star.prev_px, star.prev_py), (star.px, star.py));
        assert_eq!(star.trail_length(), 0.0);
    }

    #[test]
    fn shrinking_the_far_plane_recycles_deep_stars() {
        let mut engine = engine_with(StarfieldConfig {
            star_count: 100,
            spread: 50.0,
            ..Default::default()
        });
        engine.update(0.016, 800, 600);
        assert!(engine.stars().iter().any(|star| star.z > 50.0));

        engine.set_config(StarfieldConfig {
            star_count: 100,
            spread: 50.0,
            max_depth: 50.0,
            ..Default::default()
        });
        engine.update(0.016, 800, 600);

        assert_eq!(engine.stars().len(), 100);
        for star in engine.stars() {
            assert!(star.z <= 50.0, "star left beyond the far plane: z = {}", star.z);
        }
        assert!(engine.stars().iter().any(|star| star.z == 50.0));
    }

    #[test]
    fn in_flight_trail_starts_at_previous_position() {
        let config = StarfieldConfig {
            star_count: 1,
            spread: 5.0,
            warp_speed: 10.0,
            ..Default::default()
        };
        let mut engine = engine_with(config);
        engine.update(0.0, 800, 600);
        let before = engine.stars()[0];

        engine.update(0.016, 800, 600);
        let after = engine.stars()[0];
        if after.z != engine.config().max_depth {
            assert_eq!((after.prev_px, after.prev_py), (before.px, before.py));
        }
    }

    #[test]
    fn off_screen_stars_are_recycled() {
        let config = StarfieldConfig {
            star_count: 200,
            spread: 5_000.0,
            ..Default::default()
        };
        let mut engine = engine_with(config);
        engine.update(0.016, 320, 240);

        let viewport = Viewport::new(320, 240);
        for star in engine.stars() {
            assert!(
                !star.is_off_screen(viewport, OFFSCREEN_MARGIN)
                    || star.z == engine.config().max_depth
            );
        }
    }

    #[test]
    fn same_seed_same_field() {
        let mut a = StarfieldEngine::with_seed(StarfieldConfig::default(), 99);
        let mut b = StarfieldEngine::with_seed(StarfieldConfig::default(), 99);
        for _ in 0..10 {
            a.update(0.016, 800, 600);
            b.update(0.016, 800, 600);
        }
        assert_eq!(a.stars(), b.stars());
    }

    #[test]
    fn render_clears_even_without_stars() {
        let config = StarfieldConfig {
            star_count: 0,
            background_color: crate::render::Color::rgb(1, 2, 3),
            ..Default::default()
        };
        let mut engine = engine_with(config);
        engine.update(0.016, 800, 600);

        let mut surface = RecordingSurface::new();
        engine.render(&mut surface, Rect::from_size(800, 600));
        assert_eq!(
            surface.commands(),
            &[DrawCommand::Clear(crate::render::Color::rgb(1, 2, 3))]
        );
    }

    #[test]
    fn render_draws_every_star() {
        let mut engine = engine_with(StarfieldConfig {
            star_count: 50,
            ..Default::default()
        });
        engine.update(0.016, 800, 600);

        let mut surface = RecordingSurface::new();
        engine.render(&mut surface, Rect::from_size(800, 600));
        assert_eq!(surface.line_count(), 50);
        assert_eq!(surface.circle_count(), 50);
    }
}
