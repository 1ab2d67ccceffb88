//! Layer rules: which art each trait draws, how it is recoloured, and where
//! it sits in the stack.
//!
//! Neutral art is authored with a flat key colour. Palette colours recolour
//! it with a chroma-key filter inside an isolated sub-surface; special
//! colours draw their own pre-rendered asset and are never filtered.

use crate::render::{DrawOp, FilterChain, Layer};
use crate::types::Colour;

use super::traits::{Accessory, Attributes, BodyColour, Head, PaletteColour, SpecialFeature};

/// Stacking positions, lowest first.
pub mod z {
    pub const BACKGROUND: i64 = i64::MIN;
    pub const BASE: i64 = -100_000;
    pub const TAIL_COLOUR: i64 = -1_000;
    pub const TAIL: i64 = -500;
    pub const ACCESSORY_BACK: i64 = 50_000;
    pub const ACCESSORY: i64 = 1_000_000;
    pub const HOODIE_ACCENT: i64 = 1_000_020;
    pub const HOODIE_LINE: i64 = 1_000_030;
    pub const ARMS_COLOUR: i64 = 1_000_100;
    pub const ARMS: i64 = 1_000_105;
    pub const SLEEVES: i64 = 1_000_500;
    pub const SLEEVES_LINE: i64 = 1_000_530;
    pub const EARS: i64 = 2_000_000;
    pub const EYES: i64 = 10_000_000;
    pub const MOUTH: i64 = 10_000_003;
    pub const HEAD: i64 = 10_000_005;
    pub const OUTLINE: i64 = 500_000_000;
    pub const SPECIAL: i64 = 1_000_000_000;
}

/// Which tone of a palette colour to recolour with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Base,
    Accent,
}

fn recolour(key: Colour, colour: &PaletteColour, tone: Tone) -> DrawOp {
    let replacement = match tone {
        Tone::Base => colour.base,
        Tone::Accent => colour.accent,
    };
    DrawOp::filter(FilterChain::new().chroma_key(key, replacement))
}

/// Neutral art recoloured in isolation.
fn recoloured(key: Colour, path: String, colour: &PaletteColour, tone: Tone) -> DrawOp {
    DrawOp::isolate([DrawOp::image(path), recolour(key, colour, tone)])
}

/// Build every layer for a creature, in the order the rules are applied.
pub fn build_layers(attrs: &Attributes, key: Colour) -> Vec<Layer> {
    let mut layers = vec![
        background_layer(&attrs.background),
        base_layer(key, &attrs.colour, attrs.split.as_ref()),
    ];
    layers.extend(accessory_layers(key, &attrs.accessory));
    layers.extend(arm_layers(&attrs.arm, &attrs.colour, attrs.split.as_ref()));
    layers.extend(head_area_layers(key, attrs));
    layers.push(outline_layer());
    layers.extend(tail_layers(&attrs.tail, attrs.dominant_colour()));
    layers
}

pub fn background_layer(background: &str) -> Layer {
    Layer::new(z::BACKGROUND, DrawOp::image(format!("{}.PNG", background)))
}

/// Body colour, with the split colour drawn over it in the same isolated
/// surface.
pub fn base_layer(key: Colour, colour: &BodyColour, split: Option<&BodyColour>) -> Layer {
    // Palette colours recolour `{dir}/{dir}.PNG`; specials use `{dir}/{label}.PNG`.
    fn tone_ops(key: Colour, colour: &BodyColour, dir: &str, tone: Tone) -> Vec<DrawOp> {
        match colour {
            BodyColour::Special(special) => {
                vec![DrawOp::image(format!("{}/{}.PNG", dir, special.label()))]
            }
            BodyColour::Palette(palette) => vec![
                DrawOp::image(format!("{}/{}.PNG", dir, dir)),
                recolour(key, palette, tone),
            ],
        }
    }

    let mut ops = tone_ops(key, colour, "BaseColor", Tone::Base);
    if let Some(split) = split {
        ops.extend(tone_ops(key, split, "SplitColor", Tone::Accent));
    }
    Layer::new(z::BASE, DrawOp::isolate(ops))
}

/// Pre-rendered tail colour under the tail art.
pub fn tail_layers(tail: &str, colour: &BodyColour) -> [Layer; 2] {
    [
        Layer::new(
            z::TAIL_COLOUR,
            DrawOp::image(format!("Tails/{}-Colors/{}.PNG", tail, colour.label())),
        ),
        Layer::new(z::TAIL, DrawOp::image(format!("Tails/{}.PNG", tail))),
    ]
}

pub fn outline_layer() -> Layer {
    Layer::new(z::OUTLINE, DrawOp::image("Base/Base.PNG"))
}

/// Arm art over pre-rendered base and split colour pieces.
pub fn arm_layers(arm: &str, colour: &BodyColour, split: Option<&BodyColour>) -> [Layer; 2] {
    let mut colour_ops = vec![DrawOp::image(format!(
        "Arms/{}-Colors/Base/{}.PNG",
        arm,
        colour.label()
    ))];
    if let Some(split) = split {
        colour_ops.push(DrawOp::image(format!(
            "Arms/{}-Colors/Split/{}.PNG",
            arm,
            split.label()
        )));
    }

    [
        Layer::new(z::ARMS, DrawOp::image(format!("Arms/{}.PNG", arm))),
        Layer::new(z::ARMS_COLOUR, DrawOp::sequence(colour_ops)),
    ]
}

pub fn accessory_layers(key: Colour, accessory: &Accessory) -> Vec<Layer> {
    match accessory {
        Accessory::None => Vec::new(),
        Accessory::Flamingo => vec![
            Layer::new(z::ACCESSORY_BACK, DrawOp::image("Accessories/FlamingoB.PNG")),
            Layer::new(z::ACCESSORY, DrawOp::image("Accessories/FlamingoT.PNG")),
        ],
        Accessory::Hoodie(colour) => vec![
            Layer::new(
                z::ACCESSORY,
                recoloured(key, "Accessories/HoodieBase.PNG".to_string(), colour, Tone::Base),
            ),
            Layer::new(z::HOODIE_LINE, DrawOp::image("Accessories/HoodieLine.PNG")),
            Layer::new(
                z::SLEEVES,
                recoloured(key, "Accessories/SleevesColor.PNG".to_string(), colour, Tone::Base),
            ),
            Layer::new(
                z::HOODIE_ACCENT,
                recoloured(key, "Accessories/HoodieAccent.PNG".to_string(), colour, Tone::Accent),
            ),
            Layer::new(z::SLEEVES_LINE, DrawOp::image("Accessories/SleevesLine.PNG")),
        ],
        Accessory::Plain(label) => vec![Layer::new(
            z::ACCESSORY,
            DrawOp::image(format!("Accessories/{}.PNG", label)),
        )],
    }
}

/// Ears, eyes, mouth, head and the special override.
///
/// A replacing special draws only itself; an overlay special draws itself
/// plus the ears; otherwise the full head area is drawn.
pub fn head_area_layers(key: Colour, attrs: &Attributes) -> Vec<Layer> {
    let ears = || ears_layer(key, &attrs.frills, &attrs.colour, attrs.split.as_ref());

    match &attrs.special {
        SpecialFeature::None => vec![
            ears(),
            Layer::new(z::MOUTH, DrawOp::image(format!("Mouths/{}.PNG", attrs.mouth))),
            Layer::new(z::EYES, DrawOp::image(format!("Eyes/{}.PNG", attrs.face))),
            head_layer(&attrs.head, attrs.dominant_colour()),
        ],
        SpecialFeature::Replace(label) => vec![special_layer(label)],
        SpecialFeature::Overlay(label) => vec![special_layer(label), ears()],
    }
}

fn special_layer(label: &str) -> Layer {
    Layer::new(z::SPECIAL, DrawOp::image(format!("Special/{}.PNG", label)))
}

fn head_layer(head: &Head, colour: &BodyColour) -> Layer {
    let op = match head {
        Head::Tinted(label) => DrawOp::sequence([
            DrawOp::image(format!("Head/{}-Color/{}.PNG", label, colour.label())),
            DrawOp::image(format!("Head/{}.PNG", label)),
        ]),
        Head::Plain(label) => DrawOp::image(format!("Head/{}.PNG", label)),
    };
    Layer::new(z::HEAD, op)
}

/// Frills: base and accent pieces for each colour, then the frill art, all
/// in one isolated surface.
fn ears_layer(key: Colour, frills: &str, colour: &BodyColour, split: Option<&BodyColour>) -> Layer {
    let dir = format!("Ears/{}-Colors", frills);
    let pieces = |colour: &BodyColour, suffix: &str, tone: Tone| -> Vec<DrawOp> {
        match colour {
            BodyColour::Special(special) => {
                vec![DrawOp::image(format!("{}/Base/{}.PNG", dir, special.label()))]
            }
            BodyColour::Palette(palette) => vec![
                recoloured(key, format!("{}/{}-Base{}.PNG", dir, frills, suffix), palette, tone),
                recoloured(key, format!("{}/{}-Accent{}.PNG", dir, frills, suffix), palette, tone),
            ],
        }
    };

    let mut ops = pieces(colour, "", Tone::Base);
    if let Some(split) = split {
        ops.extend(pieces(split, "-Split", Tone::Accent));
    }
    ops.push(DrawOp::image(format!("Ears/{}.PNG", frills)));

    Layer::new(z::EARS, DrawOp::isolate(ops))
}
