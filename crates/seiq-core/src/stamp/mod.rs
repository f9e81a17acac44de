//! Stamp compositing: seal images overlaid onto a finished document.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SealError;

/// Result type for stamp operations.
pub type Result<T> = std::result::Result<T, SealError>;

/// Logical seal roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SealRole {
    /// 管理者 - mandatory.
    Administrator,
    /// 担当者 - mandatory.
    Handler,
    /// 社印 - optional.
    Company,
}

impl SealRole {
    /// Image file name the role is loaded from.
    pub fn file_name(self) -> &'static str {
        match self {
            SealRole::Administrator => "管理者.png",
            SealRole::Handler => "担当者.png",
            SealRole::Company => "社印.png",
        }
    }

    const ALL: [SealRole; 3] = [SealRole::Administrator, SealRole::Handler, SealRole::Company];
}

/// Placement of one seal on the first page, in PDF points from the
/// lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SealPlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fixed placement table: personal seals are 20x20 pt, the company seal
/// 60x60 pt.
pub fn placement(role: SealRole) -> SealPlacement {
    match role {
        SealRole::Administrator => SealPlacement {
            x: 457.0,
            y: 655.0,
            width: 20.0,
            height: 20.0,
        },
        SealRole::Handler => SealPlacement {
            x: 498.0,
            y: 655.0,
            width: 20.0,
            height: 20.0,
        },
        SealRole::Company => SealPlacement {
            x: 500.0,
            y: 680.0,
            width: 60.0,
            height: 60.0,
        },
    }
}

/// Seal images found in a directory of PNG files.
pub struct SealStore {
    images: HashMap<String, PathBuf>,
}

impl SealStore {
    /// Scan a directory for `*.png` seal images.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(SealError::DirectoryNotFound(dir.display().to_string()));
        }

        let mut images = HashMap::new();
        let entries = fs::read_dir(dir).map_err(|e| SealError::Read(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| SealError::Read(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                debug!("found seal image {}", name);
                images.insert(name.to_string(), path.clone());
            }
        }

        if images.is_empty() {
            return Err(SealError::NoImages(dir.display().to_string()));
        }

        info!("loaded {} seal image(s) from {}", images.len(), dir.display());
        Ok(Self { images })
    }

    /// Path of a role's image, when present.
    pub fn seal_path(&self, role: SealRole) -> Option<&Path> {
        self.images.get(role.file_name()).map(PathBuf::as_path)
    }

    /// Both mandatory seals (administrator and handler) are present.
    pub fn has_mandatory(&self) -> bool {
        self.seal_path(SealRole::Administrator).is_some()
            && self.seal_path(SealRole::Handler).is_some()
    }
}

/// Whether a document actually received its stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StampOutcome {
    /// Seals were composited onto the first page.
    Stamped,
    /// A mandatory seal was missing; all pages passed through untouched.
    Skipped,
}

/// Composite the seal overlay onto the first page of `doc`.
///
/// When either mandatory seal is missing the document is left untouched and
/// [`StampOutcome::Skipped`] is returned. The company seal is added only
/// when its image exists. Pages after the first are never modified.
pub fn stamp_first_page(doc: &mut Document, seals: &SealStore) -> Result<StampOutcome> {
    if !seals.has_mandatory() {
        warn!("管理者.png or 担当者.png missing; leaving the document unstamped");
        return Ok(StampOutcome::Skipped);
    }

    let first_page = *doc
        .get_pages()
        .get(&1)
        .ok_or_else(|| SealError::Overlay("document has no pages".to_string()))?;

    let mut operations = Vec::new();
    for (idx, role) in SealRole::ALL.into_iter().enumerate() {
        let Some(path) = seals.seal_path(role) else {
            continue;
        };

        let image_id = embed_png(doc, path)?;
        let name = format!("Seal{}", idx);
        doc.add_xobject(first_page, name.as_bytes(), image_id)
            .map_err(|e| SealError::Overlay(e.to_string()))?;

        let p = placement(role);
        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![
                Object::Real(p.width),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(p.height),
                Object::Real(p.x),
                Object::Real(p.y),
            ],
        ));
        operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        operations.push(Operation::new("Q", vec![]));
    }

    let seal_count = operations.len() / 4;
    doc.add_to_page_content(first_page, Content { operations })
        .map_err(|e| SealError::Overlay(e.to_string()))?;

    info!("stamped first page with {} seal(s)", seal_count);
    Ok(StampOutcome::Stamped)
}

/// Decode a PNG and register it as an image XObject, with the alpha channel
/// carried in an SMask so transparent seal backgrounds stay transparent.
fn embed_png(doc: &mut Document, path: &Path) -> Result<ObjectId> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("seal")
        .to_string();

    let data = fs::read(path).map_err(|e| SealError::Image {
        name: name.clone(),
        reason: e.to_string(),
    })?;
    let image = image::load_from_memory(&data).map_err(|e| SealError::Image {
        name,
        reason: e.to_string(),
    })?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel.0[3]);
    }

    let smask_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        alpha,
    ));

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "SMask" => smask_id,
        },
        rgb,
    ));

    Ok(image_id)
}
