use crate::foundation::core::{ScrollProgress, Timestamp, ViewportSize};
use crate::foundation::error::{StageError, StageResult};
use crate::reveal::keyframes::ProgressMap;
use crate::reveal::spring::{Spring, SpringConfig};

/// Scroll positions at which the section's phases begin and end.
///
/// The center card grows until `expand_end`, the side cards slide out between `emerge_start`
/// and `emerge_end`, shrink between `shrink_start` and `shrink_end`, testimonials arrive
/// between `testimonial_start` and `testimonial_end`, and from `release_start` the whole
/// section lifts away.
pub mod breakpoints {
    /// Height starts growing here.
    pub const GROW_START: f64 = 0.1;
    /// Center card reaches its expanded size.
    pub const EXPAND_END: f64 = 0.3;
    /// Side cards start sliding out.
    pub const EMERGE_START: f64 = 0.35;
    /// Side cards are fully out.
    pub const EMERGE_END: f64 = 0.5;
    /// Side cards start shrinking.
    pub const SHRINK_START: f64 = 0.55;
    /// Side cards reach their compact size.
    pub const SHRINK_END: f64 = 0.7;
    /// Testimonials start moving in.
    pub const TESTIMONIAL_START: f64 = 0.6;
    /// Testimonials are in place.
    pub const TESTIMONIAL_END: f64 = 0.75;
    /// Expanded size is held until here.
    pub const FINAL_HOLD_END: f64 = 0.9;
    /// Section starts lifting off.
    pub const RELEASE_START: f64 = 0.95;
}

use breakpoints::*;

/// Horizontal gap added between side cards once they shrink, per unit of shrink.
const SHRINK_GAP_PX: f64 = 2.0;
/// Testimonial cards are this much shorter than the side cards.
const TESTIMONIAL_INSET_PX: f64 = 20.0;
/// Distance testimonials travel on their way in.
const TESTIMONIAL_TRAVEL_PX: f64 = 150.0;
/// How far the section lifts at the very end, in percent of its own height.
const RELEASE_LIFT_PCT: f64 = -65.0;

/// Card sizes for one viewport, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealDimensions {
    /// Center card width before expanding.
    pub initial_width: f64,
    /// Center card width once expanded.
    pub expanded_width: f64,
    /// Center card height before expanding.
    pub initial_height: f64,
    /// Center card height once expanded.
    pub expanded_height: f64,
    /// Gap between cards.
    pub gap: f64,
}

impl RevealDimensions {
    /// Sizes for `viewport`, tiered at 480, 768, 1024 and 1440 px of width.
    pub fn for_viewport(viewport: ViewportSize) -> Self {
        let (vw, vh) = (viewport.width, viewport.height);
        let safe = vw - 32.0;

        if vw <= 480.0 {
            let card = (safe / 3.2).min(100.0);
            Self {
                initial_width: card.max(80.0),
                expanded_width: (card * 1.2).max(95.0),
                initial_height: (vh * 0.12).min(100.0),
                expanded_height: (vh * 0.35).min(250.0),
                gap: 8.0,
            }
        } else if vw <= 768.0 {
            let card = (safe / 3.5).min(140.0);
            Self {
                initial_width: card.max(120.0),
                expanded_width: (card * 1.3).max(150.0),
                initial_height: (vh * 0.15).min(120.0),
                expanded_height: (vh * 0.75).min(350.0),
                gap: 12.0,
            }
        } else if vw <= 1024.0 {
            let card = (safe / 3.8).min(300.0);
            Self {
                initial_width: card.max(200.0),
                expanded_width: (card * 1.15).max(200.0),
                initial_height: 250.0,
                expanded_height: (vh * 0.55).min(380.0),
                gap: 16.0,
            }
        } else if vw <= 1440.0 {
            let card = (safe / 4.0).min(350.0);
            Self {
                initial_width: card.max(280.0),
                expanded_width: (card * 1.2).max(320.0),
                initial_height: 150.0,
                expanded_height: (vh * 0.65).min(450.0),
                gap: 18.0,
            }
        } else {
            let card = (safe / 4.2).min(420.0);
            Self {
                initial_width: card.max(320.0),
                expanded_width: (card * 1.15).max(380.0),
                initial_height: 150.0,
                expanded_height: 450.0,
                gap: 20.0,
            }
        }
    }

    /// Finite, non-negative sizes.
    pub fn validate(self) -> StageResult<()> {
        let sizes = [
            self.initial_width,
            self.expanded_width,
            self.initial_height,
            self.expanded_height,
            self.gap,
        ];
        if !sizes.iter().all(|v| v.is_finite() && *v >= 0.0) {
            return Err(StageError::validation(format!(
                "reveal dimensions must be finite and non-negative: {self:?}"
            )));
        }
        Ok(())
    }
}

/// Placement of every part of the scroll-reveal section.
///
/// Offsets are in CSS pixels relative to the section center (positive y points down), except
/// `lift_pct` which is a percentage of the section height.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealFrame {
    /// Center card width.
    pub width: f64,
    /// Center card height.
    pub height: f64,
    /// Horizontal offset of the left side card.
    pub left_offset: f64,
    /// Horizontal offset of the right side card.
    pub right_offset: f64,
    /// Side card opacity.
    pub side_opacity: f64,
    /// Side card width.
    pub side_width: f64,
    /// Side card height.
    pub side_height: f64,
    /// Vertical offset of the left side card.
    pub left_card_y: f64,
    /// Vertical offset of the right side card.
    pub right_card_y: f64,
    /// Scale of the center card's caption.
    pub text_scale: f64,
    /// Scale of the side cards' captions.
    pub side_text_scale: f64,
    /// How far the side cards have shrunk, `0..=1`.
    pub shrink: f64,
    /// Vertical lift of the whole section.
    pub lift_pct: f64,
    /// Testimonial card height.
    pub testimonial_height: f64,
    /// Vertical offset of the left testimonial.
    pub left_testimonial_y: f64,
    /// Vertical offset of the right testimonial.
    pub right_testimonial_y: f64,
    /// Testimonial opacity.
    pub testimonial_opacity: f64,
    /// How far the testimonials have arrived, `0..=1`.
    pub testimonial_progress: f64,
}

/// Scroll-position curves of the section for one set of dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealCurves {
    dims: RevealDimensions,
    height: ProgressMap<f64>,
    width: ProgressMap<f64>,
    emerge: ProgressMap<f64>,
    shrink: ProgressMap<f64>,
    side_opacity: ProgressMap<f64>,
    text_scale: ProgressMap<f64>,
    side_text_scale: ProgressMap<f64>,
    lift: ProgressMap<f64>,
    testimonial: ProgressMap<f64>,
    testimonial_opacity: ProgressMap<f64>,
}

impl RevealCurves {
    /// Curves for `dims`.
    pub fn new(dims: RevealDimensions) -> StageResult<Self> {
        dims.validate()?;
        let (ih, eh) = (dims.initial_height, dims.expanded_height);
        let (iw, ew) = (dims.initial_width, dims.expanded_width);
        let unit = |from: f64, to: f64| ProgressMap::linear([(from, 0.0), (to, 1.0)]);

        Ok(Self {
            dims,
            height: ProgressMap::linear([
                (0.0, ih),
                (GROW_START, ih),
                (EXPAND_END, eh),
                (FINAL_HOLD_END, eh),
                (1.0, eh),
            ])?,
            width: ProgressMap::linear([
                (0.0, iw),
                (EXPAND_END, ew),
                (FINAL_HOLD_END, ew),
                (1.0, ew),
            ])?,
            emerge: unit(EMERGE_START, EMERGE_END)?,
            shrink: unit(SHRINK_START, SHRINK_END)?,
            side_opacity: ProgressMap::linear([(0.0, 0.0), (0.5, 0.8), (1.0, 1.0)])?,
            text_scale: ProgressMap::linear([(0.0, 0.7), (EXPAND_END, 1.0)])?,
            side_text_scale: ProgressMap::linear([(0.0, 1.0), (1.0, 0.8)])?,
            lift: ProgressMap::linear([(RELEASE_START, 0.0), (1.0, RELEASE_LIFT_PCT)])?,
            testimonial: unit(TESTIMONIAL_START, TESTIMONIAL_END)?,
            testimonial_opacity: ProgressMap::linear([(0.0, 0.0), (0.3, 0.5), (1.0, 1.0)])?,
        })
    }

    /// Dimensions the curves were built for.
    pub fn dimensions(&self) -> RevealDimensions {
        self.dims
    }

    /// Where everything belongs at `progress`, before smoothing.
    pub fn at(&self, progress: ScrollProgress) -> RevealFrame {
        let height = self.height.at(progress);
        let width = self.width.at(progress);
        let emerge = self.emerge.at(progress);
        let shrink = self.shrink.at(progress);
        let testimonial = self.testimonial.at(progress);

        let slide = (width + self.dims.gap) * emerge + shrink * SHRINK_GAP_PX;
        let side_height = height * (1.0 - shrink * 0.5);
        let card_shift = shrink * (height - side_height) / 2.0;
        let testimonial_height = side_height - TESTIMONIAL_INSET_PX;
        let rest = height / 2.0 - testimonial_height / 2.0;
        let travel = TESTIMONIAL_TRAVEL_PX * (1.0 - testimonial);

        RevealFrame {
            width,
            height,
            left_offset: -slide,
            right_offset: slide,
            side_opacity: self.side_opacity.map(emerge),
            side_width: width - shrink * SHRINK_GAP_PX,
            side_height,
            left_card_y: -card_shift,
            right_card_y: card_shift,
            text_scale: self.text_scale.at(progress),
            side_text_scale: self.side_text_scale.map(shrink),
            shrink,
            lift_pct: self.lift.at(progress),
            testimonial_height,
            left_testimonial_y: rest + travel,
            right_testimonial_y: -rest - travel,
            testimonial_opacity: self.testimonial_opacity.map(testimonial),
            testimonial_progress: testimonial,
        }
    }
}

macro_rules! sprung_channels {
    ($($field:ident),* $(,)?) => {
        #[derive(Clone, Copy, Debug)]
        struct Springs {
            $($field: Spring,)*
        }

        impl Springs {
            fn resting(at: &RevealFrame, config: SpringConfig) -> Self {
                Self { $($field: Spring::new(at.$field, config),)* }
            }

            fn set_targets(&mut self, now: Timestamp, to: &RevealFrame) {
                $(self.$field.set_target(now, to.$field);)*
            }

            fn sample_into(&self, now: Timestamp, out: &mut RevealFrame) {
                $(out.$field = self.$field.sample(now);)*
            }

            fn is_at_rest(&self, now: Timestamp) -> bool {
                true $(&& self.$field.is_at_rest(now))*
            }

            fn stop(&mut self, now: Timestamp) {
                $(self.$field.stop(now);)*
            }
        }
    };
}

// Side opacity follows the scroll position directly; everything else is smoothed.
sprung_channels!(
    width,
    height,
    left_offset,
    right_offset,
    side_width,
    side_height,
    left_card_y,
    right_card_y,
    text_scale,
    side_text_scale,
    shrink,
    lift_pct,
    testimonial_height,
    left_testimonial_y,
    right_testimonial_y,
    testimonial_opacity,
    testimonial_progress,
);

/// Scroll-linked reveal of a center card flanked by side cards and testimonials.
///
/// Unlike the staged gallery there are no discrete states: every progress sample moves each
/// channel's target along its curve and a spring per channel chases it, so the section trails
/// fast scrolling smoothly and catches up once scrolling stops.
#[derive(Clone, Debug)]
pub struct ScrollReveal {
    curves: RevealCurves,
    spring: SpringConfig,
    springs: Springs,
    target: RevealFrame,
    progress: ScrollProgress,
    disposed: bool,
}

impl ScrollReveal {
    /// Section at rest at `progress`.
    pub fn mount(
        dims: RevealDimensions,
        spring: SpringConfig,
        progress: ScrollProgress,
    ) -> StageResult<Self> {
        spring.validate()?;
        let curves = RevealCurves::new(dims)?;
        let target = curves.at(progress);
        tracing::debug!(p = progress.get(), "scroll reveal mounted");
        Ok(Self {
            springs: Springs::resting(&target, spring),
            curves,
            spring,
            target,
            progress,
            disposed: false,
        })
    }

    /// Move every target to where `progress` puts it.
    #[tracing::instrument(level = "trace", skip(self), fields(p = progress.get()))]
    pub fn on_progress(&mut self, now: Timestamp, progress: ScrollProgress) {
        if self.disposed {
            return;
        }
        self.progress = progress;
        self.target = self.curves.at(progress);
        self.springs.set_targets(now, &self.target);
    }

    /// Rebuild the curves for new card sizes (after a committed resize) and chase them.
    pub fn set_dimensions(&mut self, now: Timestamp, dims: RevealDimensions) -> StageResult<()> {
        if self.disposed {
            return Ok(());
        }
        self.curves = RevealCurves::new(dims)?;
        self.target = self.curves.at(self.progress);
        self.springs.set_targets(now, &self.target);
        tracing::debug!(?dims, "scroll reveal resized");
        Ok(())
    }

    /// Smoothed placement at `now`.
    pub fn sample(&self, now: Timestamp) -> RevealFrame {
        let mut frame = self.target;
        self.springs.sample_into(now, &mut frame);
        frame
    }

    /// Unsmoothed placement for the last progress.
    pub fn target(&self) -> RevealFrame {
        self.target
    }

    /// Last progress sample seen.
    pub fn progress(&self) -> ScrollProgress {
        self.progress
    }

    /// Curves in use.
    pub fn curves(&self) -> &RevealCurves {
        &self.curves
    }

    /// Spring parameters shared by every channel.
    pub fn spring(&self) -> SpringConfig {
        self.spring
    }

    /// `true` once every spring rests on its target.
    pub fn is_settled(&self, now: Timestamp) -> bool {
        self.springs.is_at_rest(now)
    }

    /// Freeze every channel where it is at `now` and ignore further input.
    pub fn dispose(&mut self, now: Timestamp) {
        if self.disposed {
            return;
        }
        self.springs.stop(now);
        self.target = self.sample(now);
        self.disposed = true;
        tracing::debug!("scroll reveal disposed");
    }

    /// Whether [`ScrollReveal::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/section.rs"]
mod tests;
