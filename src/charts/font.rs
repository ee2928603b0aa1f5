//! Label Font Resolution
//! Picks a font able to draw Japanese subject names and rasterizes text
//! from font files with rusttype.
//!
//! Order: explicit font file, then installed fonts matched by family name
//! through fontdb, then the plotters system sans-serif (with a warning,
//! glyphs may be missing).

use crate::charts::geometry::{HAlign, VAlign};
use fontdb::{Database, FaceInfo, Source};
use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Folded family-name fragments, most specific first.
pub const FONT_CANDIDATES: [&str; 9] = [
    "notosanscjk",
    "notoserifcjk",
    "ipa",
    "meiryo",
    "yugoth",
    "hiragino",
    "takao",
    "msgothic",
    "noto",
];

/// Non-fatal font problems. Rendering continues with a fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum FontWarning {
    MissingPath(PathBuf),
    Unreadable { path: PathBuf, reason: String },
    NotDiscovered,
    SystemFontUnavailable(String),
}

impl fmt::Display for FontWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWarning::MissingPath(path) => {
                write!(f, "font file {} does not exist", path.display())
            }
            FontWarning::Unreadable { path, reason } => {
                write!(f, "failed to load font {}: {}", path.display(), reason)
            }
            FontWarning::NotDiscovered => write!(
                f,
                "no Japanese-capable font found; labels may render as boxes. \
                 Pass --font or install Noto Sans CJK / IPA fonts"
            ),
            FontWarning::SystemFontUnavailable(reason) => {
                write!(f, "default font unavailable, text skipped: {}", reason)
            }
        }
    }
}

/// The font used for every piece of text on one chart.
pub enum LabelFont {
    /// Loaded from a font file and drawn with rusttype.
    File { path: PathBuf, font: Font<'static> },
    /// Plotters' sans-serif family.
    System,
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFont::File { path, .. } => f.debug_tuple("File").field(path).finish(),
            LabelFont::System => f.write_str("System"),
        }
    }
}

/// Chosen font plus the warnings collected on the way.
#[derive(Debug)]
pub struct FontResolution {
    pub font: LabelFont,
    pub warnings: Vec<FontWarning>,
}

impl FontResolution {
    /// Skip discovery and use the system default silently.
    pub fn system() -> Self {
        Self {
            font: LabelFont::System,
            warnings: Vec::new(),
        }
    }
}

/// Resolve the label font. Never fails; problems become warnings.
pub fn resolve_font(explicit: Option<&Path>) -> FontResolution {
    let mut warnings = Vec::new();

    if let Some(path) = explicit {
        match load_font_file(path) {
            Ok(font) => {
                info!(path = %path.display(), "using font file");
                return FontResolution {
                    font: LabelFont::File {
                        path: path.to_path_buf(),
                        font,
                    },
                    warnings,
                };
            }
            Err(w) => {
                warn!("{w}");
                warnings.push(w);
            }
        }
    }

    let mut db = Database::new();
    db.load_system_fonts();
    debug!(faces = db.len(), "loaded system font database");
    discover_in(&db, warnings)
}

/// Pick the best candidate face in `db`, falling back to the system font.
pub fn discover_in(db: &Database, mut warnings: Vec<FontWarning>) -> FontResolution {
    for face in ranked_faces(db) {
        let loaded = db
            .with_face_data(face.id, |data, index| {
                Font::try_from_vec_and_index(data.to_vec(), index)
            })
            .flatten();
        let path = face_path(face);
        match loaded {
            Some(font) => {
                info!(
                    family = primary_family(face),
                    path = %path.display(),
                    "discovered font"
                );
                return FontResolution {
                    font: LabelFont::File { path, font },
                    warnings,
                };
            }
            None => debug!(path = %path.display(), "skipping unloadable candidate face"),
        }
    }

    let w = FontWarning::NotDiscovered;
    warn!("{w}");
    warnings.push(w);
    FontResolution {
        font: LabelFont::System,
        warnings,
    }
}

fn load_font_file(path: &Path) -> Result<Font<'static>, FontWarning> {
    if !path.exists() {
        return Err(FontWarning::MissingPath(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|e| FontWarning::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| FontWarning::Unreadable {
        path: path.to_path_buf(),
        reason: "not a TrueType/OpenType font".into(),
    })
}

/// Family name with case, spaces, dashes and underscores folded away.
fn normalized_family(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Index into [`FONT_CANDIDATES`] of the first candidate any of `families`
/// matches, or `None` when the face is not a candidate.
pub fn candidate_rank<'a, I>(families: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<String> = families.into_iter().map(normalized_family).collect();
    FONT_CANDIDATES
        .iter()
        .position(|candidate| names.iter().any(|n| n.contains(candidate)))
}

fn primary_family(face: &FaceInfo) -> &str {
    face.families
        .first()
        .map(|(name, _)| name.as_str())
        .unwrap_or(face.post_script_name.as_str())
}

fn face_path(face: &FaceInfo) -> PathBuf {
    match &face.source {
        Source::File(path) => path.clone(),
        _ => PathBuf::from(&face.post_script_name),
    }
}

/// Candidate faces ordered by candidate priority, then by family and
/// PostScript name so the choice is stable across runs.
fn ranked_faces(db: &Database) -> Vec<&FaceInfo> {
    let mut ranked: Vec<(usize, &FaceInfo)> = db
        .faces()
        .into_iter()
        .filter_map(|face| {
            candidate_rank(face.families.iter().map(|(name, _)| name.as_str()))
                .map(|rank| (rank, face))
        })
        .collect();
    ranked.sort_by(|(ra, a), (rb, b)| {
        (ra, primary_family(a), a.post_script_name.as_str(), a.index).cmp(&(
            rb,
            primary_family(b),
            b.post_script_name.as_str(),
            b.index,
        ))
    });
    ranked.into_iter().map(|(_, face)| face).collect()
}

/// Width and height in pixels of `text` at `scale`.
pub fn measure_text(font: &Font, scale: Scale, text: &str) -> (f32, f32) {
    let v_metrics = font.v_metrics(scale);
    let width = font
        .layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);
    (width, v_metrics.ascent - v_metrics.descent)
}

/// Draw `text` anchored at `anchor` with the given alignment.
pub fn draw_text_aligned(
    img: &mut RgbImage,
    font: &Font,
    size_px: f32,
    text: &str,
    anchor: (i32, i32),
    align: (HAlign, VAlign),
    color: Rgb<u8>,
) {
    let scale = Scale::uniform(size_px);
    let (w, h) = measure_text(font, scale, text);
    let x = match align.0 {
        HAlign::Left => anchor.0 as f32,
        HAlign::Center => anchor.0 as f32 - w / 2.0,
        HAlign::Right => anchor.0 as f32 - w,
    };
    let y = match align.1 {
        VAlign::Top => anchor.1 as f32,
        VAlign::Center => anchor.1 as f32 - h / 2.0,
        VAlign::Bottom => anchor.1 as f32 - h,
    };
    draw_text(img, font, scale, text, (x, y), color);
}

/// Draw `text` with its top-left corner at `origin`, alpha-blending glyph
/// coverage over the existing pixels.
pub fn draw_text(
    img: &mut RgbImage,
    font: &Font,
    scale: Scale,
    text: &str,
    origin: (f32, f32),
    color: Rgb<u8>,
) {
    let v_metrics = font.v_metrics(scale);
    let (width, height) = img.dimensions();
    for glyph in font.layout(text, scale, point(origin.0, origin.1 + v_metrics.ascent)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, v| {
            let px = bb.min.x + gx as i32;
            let py = bb.min.y + gy as i32;
            if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                return;
            }
            let alpha = (v.clamp(0.0, 1.0) * 255.0) as u16;
            if alpha == 0 {
                return;
            }
            let pixel = img.get_pixel_mut(px as u32, py as u32);
            let bg = *pixel;
            for c in 0..3 {
                pixel[c] =
                    ((color[c] as u16 * alpha + bg[c] as u16 * (255 - alpha)) / 255) as u8;
            }
        });
    }
}
