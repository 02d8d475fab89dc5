//! Multi-variant editing session: one [`GeneratedCreative`] per ratio, an active variant,
//! and revision-stamped rendering so stale rasters are never shown.

use crate::editor::input::InputEvent;
use crate::editor::ops::{self, FontTarget};
use crate::editor::state::{EditorState, EventOutcome, ViewportOpts};
use crate::foundation::error::{CreativeError, CreativeResult};
use crate::layout::engine::{LayoutRequest, generate};
use crate::layout::model::{AdCategory, AspectRatio, ElementRef, Layout, Palette, TemplateFamily};
use crate::layout::random::RandomSource;
use crate::providers::decorations::DecorationContentProvider;
use crate::render::backend::FrameRGBA;
use crate::render::compositor::{Compositor, CreativeAssets, CreativeText};
use crate::render::overlay::{Overlay, overlay_for};

/// One output format with its layout and, once rendered, its raster.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedCreative {
    /// Output format.
    pub ratio: AspectRatio,
    /// Current, possibly edited, layout.
    pub layout: Layout,
    /// Raster of the current revision; cleared by every edit.
    pub raster: Option<FrameRGBA>,
    revision: u64,
}

impl GeneratedCreative {
    /// Unrendered creative at revision 0.
    pub fn new(layout: Layout) -> Self {
        Self {
            ratio: layout.ratio,
            layout,
            raster: None,
            revision: 0,
        }
    }

    /// Creative with an already rendered raster.
    pub fn rendered(layout: Layout, raster: FrameRGBA) -> Self {
        Self {
            raster: Some(raster),
            ..Self::new(layout)
        }
    }

    /// Bumped on every layout mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn invalidate(&mut self) {
        self.revision += 1;
        self.raster = None;
    }
}

/// Identifies the layout revision a render was started for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderTicket {
    /// Index of the creative in the session.
    pub creative: usize,
    /// Revision of that creative when the render started.
    pub revision: u64,
}

/// Everything needed to lay out a creative again.
#[derive(Clone, Debug)]
pub struct SessionInputs {
    /// Packshot and logo.
    pub assets: CreativeAssets,
    /// Copy rendered into every variant.
    pub text: CreativeText,
    /// Palette the variants were generated with.
    pub palette: Palette,
    /// `None` for an unrecognized category.
    pub category: Option<AdCategory>,
    /// Decorative image references carried into regenerated layouts.
    pub decorative_images: Vec<String>,
}

/// Editing session over the creatives of one campaign.
pub struct EditorSession {
    creatives: Vec<GeneratedCreative>,
    active: usize,
    state: EditorState,
    inputs: SessionInputs,
}

impl EditorSession {
    /// Start editing with the first creative active.
    pub fn new(
        creatives: Vec<GeneratedCreative>,
        inputs: SessionInputs,
        viewport: ViewportOpts,
    ) -> CreativeResult<Self> {
        if creatives.is_empty() {
            return Err(CreativeError::validation("session needs at least one creative"));
        }
        Ok(Self {
            creatives,
            active: 0,
            state: EditorState::new(viewport),
            inputs,
        })
    }

    /// All variants.
    pub fn creatives(&self) -> &[GeneratedCreative] {
        &self.creatives
    }

    /// Inputs used for rendering and regeneration.
    pub fn inputs(&self) -> &SessionInputs {
        &self.inputs
    }

    /// Interaction state of the active variant.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Index of the variant being edited.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Variant being edited.
    pub fn active(&self) -> &GeneratedCreative {
        &self.creatives[self.active]
    }

    /// Make another variant active; selection, hover and drag are dropped.
    pub fn switch_variant(&mut self, index: usize) -> CreativeResult<()> {
        if index >= self.creatives.len() {
            return Err(CreativeError::validation(format!(
                "no creative at index {index} (have {})",
                self.creatives.len()
            )));
        }
        self.active = index;
        self.state.reset();
        self.state.fit_canvas(self.creatives[index].layout.canvas());
        Ok(())
    }

    /// Feed one input event to the active variant.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        let creative = &mut self.creatives[self.active];
        let outcome = self.state.handle(&mut creative.layout, event);
        if outcome.layout_changed {
            creative.invalidate();
        }
        outcome
    }

    /// Select an element of the active variant, or clear the selection.
    pub fn select(&mut self, element: Option<ElementRef>) {
        self.state.select(element);
    }

    /// Rotate the selected decoration. Returns the new rotation.
    pub fn rotate_selected(&mut self, delta_deg: f64) -> Option<f64> {
        let Some(ElementRef::Decoration(i)) = self.state.selection() else {
            return None;
        };
        let rotation =
            ops::rotate_decoration(&mut self.creatives[self.active].layout, i, delta_deg)?;
        self.creatives[self.active].invalidate();
        Some(rotation)
    }

    /// Delete the selected decoration and clear the selection. Returns whether anything
    /// was removed.
    pub fn delete_selected(&mut self) -> bool {
        let selected = self.state.selection();
        self.state.select(None);
        let Some(ElementRef::Decoration(i)) = selected else {
            return false;
        };
        let removed = ops::delete_decoration(&mut self.creatives[self.active].layout, i).is_some();
        if removed {
            self.creatives[self.active].invalidate();
        }
        removed
    }

    /// Set a font size on the active variant, clamped to the target's range.
    pub fn set_font_size(&mut self, target: FontTarget, size: f64) -> Option<f64> {
        let applied = ops::set_font_size(&mut self.creatives[self.active].layout, target, size)?;
        self.creatives[self.active].invalidate();
        Some(applied)
    }

    /// Step a font size on the active variant by `steps` increments.
    pub fn step_font_size(&mut self, target: FontTarget, steps: i32) -> Option<f64> {
        let applied = ops::step_font_size(&mut self.creatives[self.active].layout, target, steps)?;
        self.creatives[self.active].invalidate();
        Some(applied)
    }

    /// Replace the copy used by every variant. All rasters become stale.
    pub fn set_text(&mut self, text: CreativeText) {
        self.inputs.text = text;
        for creative in &mut self.creatives {
            creative.invalidate();
        }
    }

    /// Lay out the active variant again with a new template and primary color, keeping
    /// its ratio. Manual edits to that variant are discarded.
    pub fn regenerate_active(
        &mut self,
        template: TemplateFamily,
        primary: &str,
        content: &dyn DecorationContentProvider,
        rng: &mut dyn RandomSource,
    ) {
        let palette = Palette {
            primary: primary.to_owned(),
            ..self.inputs.palette.clone()
        };
        let ratio = self.creatives[self.active].ratio;
        let req = LayoutRequest {
            ratio,
            template: Some(template),
            palette: &palette,
            headline: &self.inputs.text.headline,
            decorative_images: &self.inputs.decorative_images,
            category: self.inputs.category,
            additional_text: self.inputs.text.additional_text.as_deref(),
        };
        let layout = generate(&req, content, rng);
        let creative = &mut self.creatives[self.active];
        creative.layout = layout;
        creative.invalidate();
        self.state.reset();
        tracing::debug!(%ratio, %template, primary, "variant regenerated");
    }

    /// Start rendering the active variant if its raster is stale.
    ///
    /// Returns the ticket and a snapshot of the layout to render, or `None` when the raster
    /// is current.
    pub fn begin_render(&self) -> Option<(RenderTicket, Layout)> {
        let creative = &self.creatives[self.active];
        if creative.raster.is_some() {
            return None;
        }
        Some((
            RenderTicket {
                creative: self.active,
                revision: creative.revision,
            },
            creative.layout.clone(),
        ))
    }

    /// Store a finished render. Results for an outdated revision are discarded and `false`
    /// is returned.
    pub fn complete_render(&mut self, ticket: RenderTicket, frame: FrameRGBA) -> bool {
        let Some(creative) = self.creatives.get_mut(ticket.creative) else {
            return false;
        };
        if creative.revision != ticket.revision {
            tracing::debug!(
                stale = ticket.revision,
                current = creative.revision,
                "discarding stale render"
            );
            return false;
        }
        creative.raster = Some(frame);
        true
    }

    /// Raster of a variant, rendering it first when stale.
    pub fn render_variant(
        &mut self,
        index: usize,
        compositor: &mut Compositor,
    ) -> CreativeResult<&FrameRGBA> {
        let creative = self
            .creatives
            .get_mut(index)
            .ok_or_else(|| CreativeError::validation(format!("no creative at index {index}")))?;
        let frame = match creative.raster.take() {
            Some(frame) => frame,
            None => compositor.render(&creative.layout, &self.inputs.assets, &self.inputs.text)?,
        };
        Ok(creative.raster.insert(frame))
    }

    /// Raster of the active variant, rendering it first when stale.
    pub fn render_active(&mut self, compositor: &mut Compositor) -> CreativeResult<&FrameRGBA> {
        self.render_variant(self.active, compositor)
    }

    /// Overlay for the active variant: selection, else hover, else drag target.
    pub fn overlay(&self) -> Option<Overlay> {
        overlay_for(
            &self.active().layout,
            self.state.selection(),
            self.state.hovered(),
            self.state.drag().target(),
        )
    }

    /// End the session, returning the creatives.
    pub fn into_creatives(self) -> Vec<GeneratedCreative> {
        self.creatives
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
