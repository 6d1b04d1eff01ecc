//! Static style presets, one per block kind.
//!
//! Presets are process-wide and read-only. Callers get `&'static StylePreset`
//! references; nothing is cloned per render call.

use crate::render::blocks::BlockKind;

/// RGB color with components in 0.0..=1.0 (PDF `rg` operator space).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
/// `#00008B`
pub const DARK_BLUE: Rgb = Rgb(0.0, 0.0, 0.545);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// An immutable bundle of visual attributes applied to every block of one kind.
///
/// All lengths are in points. For `Spacer`, only `space_after` is meaningful:
/// it is the vertical gap the spacer inserts.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePreset {
    pub name: &'static str,
    pub font_size: f32,
    /// Baseline-to-baseline distance for wrapped lines.
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub color: Rgb,
    /// Base weight for runs without an explicit `<b>` tag.
    pub bold: bool,
    pub alignment: Alignment,
}

static TITLE: StylePreset = StylePreset {
    name: "ResumeTitle",
    font_size: 18.0,
    leading: 22.0,
    space_before: 0.0,
    // 20pt after + the fixed 12pt spacer that used to follow every title
    space_after: 32.0,
    color: DARK_BLUE,
    bold: true,
    alignment: Alignment::Center,
};

static SECTION_HEADING: StylePreset = StylePreset {
    name: "ResumeHeading",
    font_size: 14.0,
    leading: 17.0,
    space_before: 15.0,
    // 10pt after + 6pt trailing spacer
    space_after: 16.0,
    color: DARK_BLUE,
    bold: true,
    alignment: Alignment::Left,
};

static SUB_HEADING: StylePreset = StylePreset {
    name: "ResumeSubHeading",
    font_size: 12.0,
    leading: 14.4,
    space_before: 8.0,
    space_after: 8.0,
    color: BLACK,
    bold: true,
    alignment: Alignment::Left,
};

static BULLET: StylePreset = StylePreset {
    name: "ResumeBullet",
    font_size: 10.0,
    leading: 12.0,
    space_before: 0.0,
    space_after: 6.0,
    color: BLACK,
    bold: false,
    alignment: Alignment::Left,
};

static BOLD_STANDALONE: StylePreset = StylePreset {
    name: "ResumeBold",
    font_size: 10.0,
    leading: 12.0,
    space_before: 0.0,
    space_after: 6.0,
    color: BLACK,
    bold: false,
    alignment: Alignment::Left,
};

static BODY: StylePreset = StylePreset {
    name: "ResumeBody",
    font_size: 10.0,
    leading: 12.0,
    space_before: 0.0,
    space_after: 6.0,
    color: BLACK,
    bold: false,
    alignment: Alignment::Left,
};

static SPACER: StylePreset = StylePreset {
    name: "ResumeSpacer",
    font_size: 0.0,
    leading: 0.0,
    space_before: 0.0,
    space_after: 8.0,
    color: BLACK,
    bold: false,
    alignment: Alignment::Left,
};

/// Returns the preset for a block kind.
pub fn preset_for(kind: BlockKind) -> &'static StylePreset {
    match kind {
        BlockKind::Title => &TITLE,
        BlockKind::SectionHeading => &SECTION_HEADING,
        BlockKind::SubHeading => &SUB_HEADING,
        BlockKind::Bullet => &BULLET,
        BlockKind::BoldStandalone => &BOLD_STANDALONE,
        BlockKind::Body => &BODY,
        BlockKind::Spacer => &SPACER,
    }
}
