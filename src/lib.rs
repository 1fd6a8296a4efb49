//! Scroll-driven staged gallery animation.
//!
//! A gallery of items moves through four arrangements as its container scrolls through the
//! viewport: scattered, straightened, settling and organized. The crate is headless and
//! deterministic; the host feeds it scroll geometry and timestamps and samples per-item
//! transforms for rendering:
//!
//! - Build an [`AnimatorConfig`] (or use a preset)
//! - Mount a [`GalleryAnimator`] and bind it to a [`ScrollObserver`] through a [`GalleryView`]
//! - Sample a [`GalleryFrame`] on every animation frame
//!
//! A second, continuous mechanism ([`ScrollReveal`]) maps progress through keyframed curves and
//! smooths every channel with a [`Spring`].
#![forbid(unsafe_code)]

mod foundation;

/// Tweens, easing and timing helpers.
pub mod animation;
/// Splash screen lifecycle and image slots.
pub mod app;
/// Gallery state machine and its configuration.
pub mod driver;
/// Continuous scroll-linked reveal: keyframed curves smoothed by springs.
pub mod reveal;
/// Scroll progress sources.
pub mod scroll;
/// Mounted views and headless replay.
pub mod session;
/// Stage classification, target placement and transform generation.
pub mod stage;

pub use crate::foundation::core::{
    Affine, Fps, MOBILE_BREAKPOINT_PX, ScrollProgress, Timestamp, Transform, Vec2, ViewportSize,
    VisualState,
};
pub use crate::foundation::error::{StageError, StageResult};
pub use crate::foundation::math::{Rng64, entropy_seed};

pub use crate::animation::anim::{Animated, Lerp, Tween, TweenSpec};
pub use crate::animation::ease::Ease;
pub use crate::app::image::{ImageSlot, ImageStatus, LoadOutcome, Placeholder, SlotContent};
pub use crate::app::splash::{
    AppController, DismissReason, PreloadTracker, SplashPhase, SplashPolicy,
};
pub use crate::driver::config::{AnimatorConfig, MotionConfig, TextConfig};
pub use crate::driver::gallery::{GalleryAnimator, GalleryFrame, StageChange, TextTransition};
pub use crate::driver::text::{TextElement, TextFrame, TextReveal, TextState};
pub use crate::reveal::keyframes::{ProgressMap, Stop};
pub use crate::reveal::section::{RevealCurves, RevealDimensions, RevealFrame, ScrollReveal};
pub use crate::reveal::spring::{Spring, SpringConfig};
pub use crate::scroll::geometry::ScrollGeometry;
pub use crate::scroll::observer::{ScrollObserver, Subscription};
pub use crate::scroll::resize::ResizeDebouncer;
pub use crate::session::gallery_view::{CHANGE_LOG_CAPACITY, GalleryView};
pub use crate::session::simulate::{
    ChangeRecord, FrameRecord, MAX_FRAMES, MAX_ITEMS, ScrollSample, ScrollScript,
    SimulationReport, simulate,
};
pub use crate::stage::classify::{Stage, StageThresholds};
pub use crate::stage::generate::{Span, TransformLimits};
pub use crate::stage::targets::TargetTable;
