use crate::animation::anim::Animated;
use crate::animation::ops::{simultaneous, stagger};
use crate::driver::config::TextConfig;
use crate::foundation::core::Timestamp;

/// Call-to-action elements, in reveal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TextElement {
    /// Main heading, revealed first.
    Heading,
    /// Supporting line.
    Subheading,
    /// Action button, revealed last.
    Button,
}

impl TextElement {
    /// All elements in reveal order.
    pub const ALL: [TextElement; 3] = [Self::Heading, Self::Subheading, Self::Button];

    fn index(self) -> usize {
        match self {
            Self::Heading => 0,
            Self::Subheading => 1,
            Self::Button => 2,
        }
    }
}

/// Sampled placement of one text element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextState {
    /// Vertical offset from the rest position.
    pub y: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Sampled placement of the whole text block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextFrame {
    /// Logical visibility (flips immediately on a transition; the motion follows).
    pub visible: bool,
    /// Heading placement.
    pub heading: TextState,
    /// Subheading placement.
    pub subheading: TextState,
    /// Button placement.
    pub button: TextState,
}

#[derive(Clone, Debug)]
struct TextChannel {
    y: Animated<f64>,
    opacity: Animated<f64>,
}

/// Staggered reveal / simultaneous hide of the call-to-action block.
#[derive(Clone, Debug)]
pub struct TextReveal {
    config: TextConfig,
    channels: [TextChannel; 3],
    visible: bool,
}

impl TextReveal {
    /// Hidden block: every element off-screen and transparent, nothing animating.
    pub fn hidden(config: TextConfig) -> Self {
        let channel = |i: usize| TextChannel {
            y: Animated::new(config.hidden_offset[i]),
            opacity: Animated::new(0.0),
        };
        Self {
            config,
            channels: [channel(0), channel(1), channel(2)],
            visible: false,
        }
    }

    /// Logical visibility.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Slide and fade elements in one after another. Returns `false` if already visible.
    pub fn reveal(&mut self, now: Timestamp) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        let specs = stagger(self.config.reveal, &self.config.stagger_ms);
        for (channel, spec) in self.channels.iter_mut().zip(specs) {
            channel.y.animate_to(now, 0.0, spec);
            channel.opacity.animate_to(now, 1.0, spec);
        }
        true
    }

    /// Slide and fade every element out at once. Returns `false` if already hidden.
    pub fn hide(&mut self, now: Timestamp) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        let specs = simultaneous(self.config.hide, self.channels.len());
        for ((channel, spec), offset) in self
            .channels
            .iter_mut()
            .zip(specs)
            .zip(self.config.hidden_offset)
        {
            channel.y.animate_to(now, offset, spec);
            channel.opacity.animate_to(now, 0.0, spec);
        }
        true
    }

    /// Placement of `element` at `now`.
    pub fn sample(&self, element: TextElement, now: Timestamp) -> TextState {
        let channel = &self.channels[element.index()];
        TextState {
            y: channel.y.sample(now),
            opacity: channel.opacity.sample(now),
        }
    }

    /// Placement of every element at `now`.
    pub fn frame(&self, now: Timestamp) -> TextFrame {
        TextFrame {
            visible: self.visible,
            heading: self.sample(TextElement::Heading, now),
            subheading: self.sample(TextElement::Subheading, now),
            button: self.sample(TextElement::Button, now),
        }
    }

    /// `true` while any element is waiting or moving.
    pub fn is_animating(&self, now: Timestamp) -> bool {
        self.channels
            .iter()
            .any(|c| c.y.is_animating(now) || c.opacity.is_animating(now))
    }

    /// Drop finished tweens.
    pub fn settle(&mut self, now: Timestamp) {
        for c in &mut self.channels {
            c.y.settle(now);
            c.opacity.settle(now);
        }
    }

    /// Freeze every element where it is, cancelling pending staggered entries.
    pub fn stop(&mut self, now: Timestamp) {
        for c in &mut self.channels {
            c.y.stop(now);
            c.opacity.stop(now);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/text.rs"]
mod tests;
