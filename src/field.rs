//! Particle field simulation.
//!
//! Pure state + arithmetic: no browser types anywhere in this module, so the
//! whole simulation runs under plain `cargo test` on the host. Randomness is
//! injected as a `rand::Rng` handle; the web layer seeds it from
//! `performance.now()`, tests seed it with fixed values.

use std::fmt;

use rand::Rng;

/// Number of particles in the backdrop field.
pub const PARTICLE_COUNT: usize = 100;

// Per-axis drift speed, drawn once per particle from [-SPEED_LIMIT, SPEED_LIMIT).
const SPEED_LIMIT: f64 = 0.25;
// Dot radius range in canvas pixels.
const RADIUS_MIN: f64 = 0.5;
const RADIUS_MAX: f64 = 2.5;
// Per-particle fill alpha range.
const OPACITY_MIN: f64 = 0.2;
const OPACITY_MAX: f64 = 0.7;

// --- Errors ------------------------------------------------------------------

/// Errors that can occur when constructing or resizing a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldError {
    /// A field must hold at least one particle.
    EmptyField,
    /// Viewport dimensions must be finite and strictly positive.
    BadViewport { width: f64, height: f64 },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::EmptyField => write!(f, "particle field needs at least one particle"),
            FieldError::BadViewport { width, height } => {
                write!(f, "viewport {width}x{height} is not a positive finite size")
            }
        }
    }
}

impl std::error::Error for FieldError {}

fn check_viewport(width: f64, height: f64) -> Result<(), FieldError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(FieldError::BadViewport { width, height })
    }
}

// --- Particle ----------------------------------------------------------------

/// A single drifting dot. Velocity, radius and opacity are fixed at creation;
/// only the position changes afterwards, and only via [`ParticleField::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    radius: f64,
    opacity: f64,
}

impl Particle {
    /// Randomize a particle over a `width` x `height` viewport.
    fn new(rng: &mut impl Rng, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(0.0..height),
            vx: rng.gen_range(-SPEED_LIMIT..SPEED_LIMIT),
            vy: rng.gen_range(-SPEED_LIMIT..SPEED_LIMIT),
            radius: rng.gen_range(RADIUS_MIN..RADIUS_MAX),
            opacity: rng.gen_range(OPACITY_MIN..OPACITY_MAX),
        }
    }

    /// Build a particle from explicit attributes. Useful for deterministic
    /// setups (restoring state, pinning positions in tests).
    pub fn from_parts(x: f64, y: f64, vx: f64, vy: f64, radius: f64, opacity: f64) -> Self {
        Self { x, y, vx, vy, radius, opacity }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Drift speed per frame, (vx, vy).
    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}

// --- Field -------------------------------------------------------------------

/// A fixed-size pool of particles plus the viewport they drift inside.
///
/// The particle count is constant for the field's lifetime; a resize replaces
/// every particle with a freshly randomized one rather than repositioning the
/// existing pool.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    /// Construct a field of `count` randomized particles.
    ///
    /// Rejects `count == 0` and degenerate viewports outright rather than
    /// producing an empty or frozen animation.
    pub fn new(
        count: usize,
        width: f64,
        height: f64,
        rng: &mut impl Rng,
    ) -> Result<Self, FieldError> {
        if count == 0 {
            return Err(FieldError::EmptyField);
        }
        check_viewport(width, height)?;
        let particles = (0..count).map(|_| Particle::new(rng, width, height)).collect();
        Ok(Self { particles, width, height })
    }

    /// Construct a field from explicit particles (deterministic setups).
    pub fn from_particles(
        particles: Vec<Particle>,
        width: f64,
        height: f64,
    ) -> Result<Self, FieldError> {
        if particles.is_empty() {
            return Err(FieldError::EmptyField);
        }
        check_viewport(width, height)?;
        Ok(Self { particles, width, height })
    }

    /// Advance every particle one frame: drift by its velocity, then wrap
    /// toroidally so positions stay inside [0, width) x [0, height).
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.x = wrap(p.x + p.vx, self.width);
            p.y = wrap(p.y + p.vy, self.height);
        }
    }

    /// Adopt a new viewport: the entire pool is discarded and re-randomized
    /// over the new dimensions. The particle count is preserved.
    pub fn resize(
        &mut self,
        width: f64,
        height: f64,
        rng: &mut impl Rng,
    ) -> Result<(), FieldError> {
        check_viewport(width, height)?;
        self.width = width;
        self.height = height;
        for p in &mut self.particles {
            *p = Particle::new(rng, width, height);
        }
        Ok(())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Wrap `value` into [0, extent). `rem_euclid` can round up to exactly
/// `extent` for tiny negative inputs, hence the extra fold to zero.
fn wrap(value: f64, extent: f64) -> f64 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}
