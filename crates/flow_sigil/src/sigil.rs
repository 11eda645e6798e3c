//! Sigil setup and drawing.
//!
//! [`Sigil::new`] derives everything that depends on the identifier, in a fixed order
//! on the random stream:
//!
//! 1. style ([`StyleConfiguration::select`]), palette index included
//! 2. noise detail ([`NoiseDetail::select`]); the lattice itself comes from the noise stream
//! 3. the angle quantization step `π / floor(uniform(3, 10))`, drawn even when unused
//! 4. the layout ([`LayoutStrategy::select`])
//!
//! [`Sigil::draw`] then continues on the same stream: seed sampling, crossing coins and
//! gradient jitter as the layout requires, and finally the texture overlay seed.
use std::f32::consts::PI;

use rand::rngs::ChaCha8Rng;
use rand::Rng;
use tracing::{debug, info};

use crate::config::SigilConfig;
use crate::error::{Error, Result};
use crate::field::VectorField;
use crate::frame::Frame;
use crate::layout::{self, LayoutStrategy};
use crate::noise::{CoherentNoise, NoiseDetail};
use crate::paint::painter::Painter;
use crate::paint::{ColorAssigner, Surface};
use crate::palette::{Palette, PALETTES};
use crate::random::rand_range;
use crate::seed::Seeds;
use crate::style::StyleConfiguration;

/// Everything derived from an identifier before drawing. Immutable once built.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorState {
    pub config: SigilConfig,
    pub frame: Frame,
    pub seeds: Seeds,
    pub style: StyleConfiguration,
    pub noise: CoherentNoise,
    /// Quantization step of the field angles, `None` for a continuous field.
    pub angle_step: Option<f32>,
    pub field: VectorField,
    pub layout: LayoutStrategy,
}

impl GeneratorState {
    /// The catalog entry picked by the style.
    ///
    /// # Panics
    ///
    /// If `style.palette_index` was edited past the end of [`PALETTES`] on a copy of the
    /// state. Selection only draws indices inside the catalog.
    pub fn palette(&self) -> &'static Palette {
        &PALETTES[self.style.palette_index]
    }
}

/// What a draw produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub layout: LayoutStrategy,
    /// Colored curves or shape runs, shadows excluded.
    pub curves: usize,
    /// Individual shapes, shadows excluded.
    pub shapes: usize,
    /// Seed points handed to the tracer, or queue pops for the spaced layout.
    pub seeds_considered: usize,
}

/// One identifier's image generator. Draws exactly once.
#[derive(Debug)]
pub struct Sigil {
    state: GeneratorState,
    rng: ChaCha8Rng,
    drawn: bool,
}

impl Sigil {
    /// Validate `config`, derive the seeds and build the field.
    pub fn new(identifier: &str, config: SigilConfig) -> Result<Self> {
        config.validate()?;

        let seeds = Seeds::derive(identifier)?;
        debug!(noise = seeds.noise, random = seeds.random, "Derived seeds.");

        let mut rng = seeds.random_stream();
        let frame = Frame::from_config(&config);

        let style = StyleConfiguration::select(
            &mut rng,
            &config.probabilities,
            config.stroke_range,
            frame.scale,
        );
        debug!(?style, "Selected style.");

        let detail = NoiseDetail::select(&mut rng, style.curl);
        let noise = CoherentNoise::new(&mut seeds.noise_stream(), detail);
        debug!(octaves = detail.octaves, falloff = detail.falloff, "Noise detail.");

        let step = PI / rand_range(&mut rng, 3.0, 10.0).floor();
        let angle_step = (!style.continuous).then_some(step);
        let field = VectorField::from_noise(&frame, &noise, config.noise_scale, angle_step);

        let drawn_layout = LayoutStrategy::select(&mut rng);
        let layout = config.layout.unwrap_or(drawn_layout);
        debug!(%layout, "Selected layout.");

        Ok(Self {
            state: GeneratorState {
                config,
                frame,
                seeds,
                style,
                noise,
                angle_step,
                field,
                layout,
            },
            rng,
            drawn: false,
        })
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    /// Emit the whole image into `surface`. A second call fails with
    /// [`Error::AlreadyDrawn`] and emits nothing.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<RenderSummary> {
        if self.drawn {
            return Err(Error::AlreadyDrawn);
        }
        self.drawn = true;

        let state = &self.state;
        let colors = ColorAssigner::new(state.style.color_style, state.palette(), &state.frame);
        let mut painter = Painter::new(surface, &state.style, colors, state.frame.scale);

        painter.background();
        let seeds_considered = layout::render(state, &mut self.rng, &mut painter);
        painter.texture_overlay(state.config.texture_amount, self.rng.next_u64());

        let summary = RenderSummary {
            layout: state.layout,
            curves: painter.curves(),
            shapes: painter.shapes(),
            seeds_considered,
        };
        info!(
            layout = %summary.layout,
            curves = summary.curves,
            shapes = summary.shapes,
            seeds = summary.seeds_considered,
            "Sigil drawn."
        );
        Ok(summary)
    }
}

/// Build a sigil for `identifier` on a `size`×`size` canvas and draw it into `surface`.
pub fn generate<S: Surface + ?Sized>(
    identifier: &str,
    size: u32,
    surface: &mut S,
) -> Result<RenderSummary> {
    Sigil::new(identifier, SigilConfig::new(size))?.draw(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{CommandBuffer, DrawCommand};

    const ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn setup_is_deterministic() {
        let a = Sigil::new(ID, SigilConfig::new(200)).unwrap();
        let b = Sigil::new(ID, SigilConfig::new(200)).unwrap();
        assert_eq!(a.state(), b.state());
        assert_eq!(a.state().seeds.noise, 0x123e4567e89b1);
    }

    #[test]
    fn palette_is_the_catalog_entry_of_the_style() {
        for id in [ID, "0f8fad5b-d9cb-469f-a165-70867728950e", "f47ac10b-58cc-4372-a567-0e02b2c3d479"] {
            let sigil = Sigil::new(id, SigilConfig::new(100)).unwrap();
            let state = sigil.state();
            assert!(state.style.palette_index < PALETTES.len());
            assert!(std::ptr::eq(state.palette(), &PALETTES[state.style.palette_index]));
        }
    }

    #[test]
    fn angle_step_tracks_continuity() {
        let sigil = Sigil::new(ID, SigilConfig::new(200)).unwrap();
        let state = sigil.state();
        assert_eq!(state.angle_step.is_none(), state.style.continuous);
        if let Some(step) = state.angle_step {
            let k = PI / step;
            assert!((3.0..10.0).contains(&k));
        }
    }

    #[test]
    fn forced_layout_keeps_the_rest_of_the_state() {
        let free = Sigil::new(ID, SigilConfig::new(200)).unwrap();
        for layout in LayoutStrategy::ALL {
            let forced = Sigil::new(ID, SigilConfig::new(200).with_layout(layout)).unwrap();
            assert_eq!(forced.state().layout, layout);
            assert_eq!(forced.state().style, free.state().style);
            assert_eq!(forced.state().field, free.state().field);
        }
    }

    #[test]
    fn draw_is_framed_by_background_and_overlay() {
        let mut sigil = Sigil::new(ID, SigilConfig::new(200)).unwrap();
        let mut buffer = CommandBuffer::new();
        let summary = sigil.draw(&mut buffer).unwrap();
        let commands = buffer.as_slice();

        assert!(matches!(commands.first(), Some(DrawCommand::Background(_))));
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::TextureOverlay { amount, .. }) if *amount == 50.0
        ));
        assert_eq!(summary.layout, sigil.state().layout);
        assert!(sigil.is_drawn());
    }

    #[test]
    fn second_draw_is_rejected() {
        let mut sigil = Sigil::new(ID, SigilConfig::new(100)).unwrap();
        sigil.draw(&mut ()).unwrap();
        let mut buffer = CommandBuffer::new();
        assert!(matches!(sigil.draw(&mut buffer), Err(Error::AlreadyDrawn)));
        assert!(buffer.is_empty());
    }

    #[test]
    fn invalid_inputs_fail_before_drawing() {
        assert!(matches!(
            Sigil::new("not-a-uuid", SigilConfig::new(100)),
            Err(Error::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            Sigil::new(ID, SigilConfig::new(0)),
            Err(Error::InvalidConfig(_))
        ));
    }
}
