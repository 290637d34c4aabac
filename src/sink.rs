// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing the finished picture to disk, once losslessly as PNG and
//! once lossily as JPEG, from the same buffer.

use image::jpeg::JPEGEncoder;
use image::png::PNGEncoder;
use image::ColorType;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::tonemap::RenderedImage;

/// JPEG quality; high enough that the thin branches survive.
pub const JPEG_QUALITY: u8 = 92;

/// The encodings written for every render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// Lossless.
    Png,
    /// Lossy.
    Jpeg,
}

impl Format {
    /// Every format, lossless first.
    pub const ALL: [Format; 2] = [Format::Png, Format::Jpeg];

    /// The file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpeg => "jpg",
        }
    }
}

/// Encodes `image` in one format to `path`.
pub fn write_image(path: &Path, image: &RenderedImage, format: Format) -> Result<(), RenderError> {
    let mut output = BufWriter::new(File::create(path)?);
    let (width, height) = (image.width() as u32, image.height() as u32);
    match format {
        Format::Png => {
            PNGEncoder::new(&mut output).encode(image.pixels(), width, height, ColorType::RGB(8))?;
        }
        Format::Jpeg => {
            JPEGEncoder::new_with_quality(&mut output, JPEG_QUALITY).encode(
                image.pixels(),
                width,
                height,
                ColorType::RGB(8),
            )?;
        }
    }
    output.flush()?;
    Ok(())
}

/// Writes `stem.png` and `stem.jpg`, returning the paths written.
pub fn write_all(stem: &Path, image: &RenderedImage) -> Result<Vec<PathBuf>, RenderError> {
    let mut written = vec![];
    for format in Format::ALL.iter() {
        let path = stem.with_extension(format.extension());
        write_image(&path, image, *format)?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
