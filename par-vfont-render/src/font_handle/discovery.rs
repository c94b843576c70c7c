//! System font discovery through fontdb.

use std::path::PathBuf;

use fontdb::{Database, Family, Query, Source};

/// Location of one face on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    pub path: PathBuf,
    /// Face index within the file (non-zero only for collections).
    pub face_index: u32,
}

fn load_system_database() -> Database {
    let mut font_db = Database::new();
    font_db.load_system_fonts();
    log::debug!("Loaded {} system fonts", font_db.len());
    font_db
}

fn source_of(font_db: &Database, id: fontdb::ID) -> Option<FontSource> {
    let face = font_db.face(id)?;
    match &face.source {
        Source::File(path) => Some(FontSource {
            path: path.clone(),
            face_index: face.index,
        }),
        _ => None,
    }
}

/// Look up a regular-weight, upright face of `family` in `font_db`.
pub fn find_in_database(font_db: &Database, family: &str) -> Option<FontSource> {
    let query = Query {
        families: &[Family::Name(family)],
        weight: fontdb::Weight::NORMAL,
        style: fontdb::Style::Normal,
        ..Query::default()
    };
    font_db.query(&query).and_then(|id| source_of(font_db, id))
}

/// Find an installed font file for `family`.
pub fn find_system_font(family: &str) -> Option<FontSource> {
    log::info!("Looking up system font: {}", family);
    let found = find_in_database(&load_system_database(), family);
    match &found {
        Some(source) => log::info!("Found '{}' at {:?}", family, source.path),
        None => log::warn!("System font '{}' not found", family),
    }
    found
}

/// True if the face parses and covers basic Latin.
fn covers_latin(font_db: &Database, id: fontdb::ID) -> bool {
    font_db
        .with_face_data(id, |data, index| {
            swash::FontRef::from_index(data, index as usize)
                .is_some_and(|font| LATIN_PROBE.iter().all(|&ch| font.charmap().map(ch) != 0))
        })
        .unwrap_or(false)
}

const LATIN_PROBE: &[char] = &['A', 'H', 'M', 'o', ' '];

/// Pick any installed font that can render basic Latin text, preferring
/// the default sans-serif family.
///
/// Returns `None` on hosts with no such font installed.
pub fn any_system_font() -> Option<FontSource> {
    let font_db = load_system_database();
    let query = Query {
        families: &[Family::SansSerif],
        ..Query::default()
    };
    let preferred = font_db.query(&query);

    preferred
        .into_iter()
        .chain(font_db.faces().map(|face| face.id))
        .filter(|&id| covers_latin(&font_db, id))
        .find_map(|id| source_of(&font_db, id))
}
