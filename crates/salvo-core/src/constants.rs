//! Simulation constants and tuning parameters.

use crate::math::Vec3;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Fraction of wall time that elapses in the simulation per tick.
/// Projectiles move in slow motion so the defender has time to react.
pub const TIME_SCALE: f32 = 0.1;

/// Simulation seconds per tick.
pub const DT: f32 = TIME_SCALE / TICK_RATE as f32;

// --- Scene ---

/// Scene bounds center. The scene is 40 x 50 x 55 meters.
pub const SCENE_CENTER: Vec3 = Vec3::new(20.0, 25.0, -27.5);

/// Scene bounds half extents.
pub const SCENE_HALF_EXTENTS: Vec3 = Vec3::new(20.0, 25.0, 27.5);

/// Distance beyond the scene bounds at which projectiles are despawned.
pub const SCENE_DESPAWN_MARGIN: f32 = 10.0;

/// Gravity along Y (m/s²).
pub const GRAVITY: f32 = -9.8;

// --- Octree ---

/// Body count at which a leaf subdivides.
pub const OCTREE_CAPACITY: usize = 4;

/// Depth at which leaves stop subdividing.
pub const OCTREE_MAX_DEPTH: u8 = 16;

// --- Projectiles ---

/// Full size of a cannon shell's bounding box.
pub const SHELL_SIZE: Vec3 = Vec3::splat(0.5);

/// Full size of an interceptor's bounding box.
pub const INTERCEPTOR_SIZE: Vec3 = Vec3::splat(0.5);

/// Extra lifetime granted to an interceptor past its predicted intercept time.
pub const INTERCEPTOR_LIFESPAN_MARGIN: f32 = 0.5;

/// Number of segments in a trajectory preview.
pub const TRAJECTORY_STEPS: usize = 30;

// --- Cannons ---

/// Number of cannons in the default scene.
pub const CANNON_COUNT: usize = 5;

/// Ticks after start at which each cannon is enabled (staggered so the
/// cannons do not fire in lockstep).
pub const CANNON_ACTIVATION_TICKS: [u64; CANNON_COUNT] = [0, 60, 180, 360, 600];

/// Minimum delay between two shots of one cannon (ticks).
pub const FIRE_DELAY_MIN_TICKS: u64 = 60;

/// Maximum delay between two shots of one cannon (ticks).
pub const FIRE_DELAY_MAX_TICKS: u64 = 300;

/// Default cannon muzzle speed (m/s).
pub const CANNON_LAUNCH_SPEED: f32 = 15.0;

/// Default cannon elevation (degrees).
pub const CANNON_LAUNCH_ANGLE_DEG: f32 = 45.0;

// --- Defender ---

/// Defender position in the default scene.
pub const DEFENDER_POSITION: Vec3 = Vec3::new(20.0, 0.5, -25.0);

/// Radius within which the defender considers targets (m).
pub const DEFENDER_VISION_RADIUS: f32 = 10.0;

/// Defender muzzle speed (m/s).
pub const DEFENDER_LAUNCH_SPEED: f32 = 20.0;

/// Defender elevation (degrees).
pub const DEFENDER_LAUNCH_ANGLE_DEG: f32 = 30.0;

/// Ticks between two defender shots.
pub const DEFENDER_COOLDOWN_TICKS: u64 = 60;

// --- Intercept ---

/// Below this magnitude the quadratic coefficient `a` is treated as zero.
pub const QUADRATIC_EPSILON: f32 = 1.0e-4;
