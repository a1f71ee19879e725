//! Motion: property animation for retained scene graphs.
//!
//! Re-exports the animation engine and its configuration crate so hosts can
//! depend on a single package.
//!
//! ```
//! let config = motion::config::MotionConfig::default();
//! let animator = motion::Animator::from_motion_config(&config).unwrap();
//! assert_eq!(animator.effective_time_scale(), 1.0);
//! ```

pub use motion_animator::*;

pub use motion_config as config;

/// Build an animator from `motion.toml` and `MOTION_*` environment overrides.
pub fn animator_from_env() -> Result<Animator> {
    Animator::from_motion_config(&config::MotionConfig::load())
}
