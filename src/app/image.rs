/// Result of fetching one image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoadOutcome {
    /// Decoded and ready to show.
    Loaded,
    /// Network or decode failure.
    Failed,
}

/// Load status of an image slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ImageStatus {
    /// Still loading.
    #[default]
    Pending,
    /// Ready.
    Loaded,
    /// Replaced by the placeholder.
    Failed,
}

/// Neutral box drawn in place of an image that failed to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Placeholder {
    /// CSS background color.
    pub background: &'static str,
    /// CSS border color.
    pub border_color: &'static str,
    /// Border width in CSS pixels.
    pub border_width_px: u32,
    /// Whether the border is dashed.
    pub dashed: bool,
}

impl Placeholder {
    /// Light grey fill with a dashed grey border.
    pub const NEUTRAL: Self = Self {
        background: "#f3f4f6",
        border_color: "#d1d5db",
        border_width_px: 2,
        dashed: true,
    };
}

/// What a slot should draw right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotContent<'a> {
    /// Nothing yet; the slot keeps its layout box.
    Empty,
    /// The image at this source.
    Image(&'a str),
    /// The failure placeholder.
    Placeholder(Placeholder),
}

/// One gallery image.
///
/// A failure is logged and swapped for [`Placeholder::NEUTRAL`]; it never reaches the caller as
/// an error, so the gallery layout survives missing assets.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageSlot {
    source: String,
    status: ImageStatus,
}

impl ImageSlot {
    /// Pending slot for `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            status: ImageStatus::Pending,
        }
    }

    /// Image source (URL or asset path).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Current status.
    pub fn status(&self) -> ImageStatus {
        self.status
    }

    /// Apply a load result. Only the first result counts.
    pub fn resolve(&mut self, outcome: LoadOutcome) {
        if self.status != ImageStatus::Pending {
            return;
        }
        self.status = match outcome {
            LoadOutcome::Loaded => ImageStatus::Loaded,
            LoadOutcome::Failed => {
                tracing::warn!(source = %self.source, "image failed to load; showing placeholder");
                ImageStatus::Failed
            }
        };
    }

    /// What to draw.
    pub fn content(&self) -> SlotContent<'_> {
        match self.status {
            ImageStatus::Pending => SlotContent::Empty,
            ImageStatus::Loaded => SlotContent::Image(&self.source),
            ImageStatus::Failed => SlotContent::Placeholder(Placeholder::NEUTRAL),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/image.rs"]
mod tests;
