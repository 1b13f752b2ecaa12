//! Carrier media and the single color plane embedding operates on.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{DynamicImage, GrayImage, RgbaImage};
use log::error;

use crate::error::SubstegoError;
use crate::result::Result;
use crate::Persist;

/// A 2-D grid of 8 bit values, the one channel selected for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    height: usize,
    width: usize,
    data: Vec<u8>,
}

impl Plane {
    pub fn new(height: usize, width: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), height * width);
        Plane {
            height,
            width,
            data,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of pixels, i.e. the embedding capacity in slots.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.data[row * self.width + col] = value;
    }
}

/// A carrier image, either a single gray plane or an RGBA color image.
#[derive(Debug, Clone)]
pub enum Carrier {
    Grayscale(GrayImage),
    Color(RgbaImage),
}

impl Carrier {
    /// Load a carrier from a lossless image file.
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => {
                let img = image::open(path).map_err(|e| {
                    error!("Error decoding carrier image {path:?}: {e}");
                    SubstegoError::InvalidImageMedia
                })?;
                Ok(Self::from_image(img))
            }
            _ => Err(SubstegoError::UnsupportedMedia),
        }
    }

    pub fn from_image(img: DynamicImage) -> Self {
        match img {
            DynamicImage::ImageLuma8(gray) => Carrier::Grayscale(gray),
            other => Carrier::Color(other.to_rgba8()),
        }
    }

    /// Extract the embedding plane: the sole plane for grayscale images, the
    /// given color channel otherwise. The alpha channel is never usable.
    pub fn plane(&self, channel: usize) -> Result<Plane> {
        match self {
            Carrier::Grayscale(gray) => {
                let (w, h) = gray.dimensions();
                Ok(Plane::new(h as usize, w as usize, gray.as_raw().clone()))
            }
            Carrier::Color(rgba) => {
                if channel > 2 {
                    return Err(SubstegoError::InvalidColorChannel(channel));
                }
                let (w, h) = rgba.dimensions();
                let data = rgba.pixels().map(|p| p.0[channel]).collect();
                Ok(Plane::new(h as usize, w as usize, data))
            }
        }
    }

    /// Write a modified plane back into the carrier.
    pub fn merge_plane(&mut self, plane: &Plane, channel: usize) -> Result<()> {
        match self {
            Carrier::Grayscale(gray) => {
                for (value, &src) in gray.iter_mut().zip(plane.data.iter()) {
                    *value = src;
                }
            }
            Carrier::Color(rgba) => {
                if channel > 2 {
                    return Err(SubstegoError::InvalidColorChannel(channel));
                }
                for (pixel, &src) in rgba.pixels_mut().zip(plane.data.iter()) {
                    pixel.0[channel] = src;
                }
            }
        }
        Ok(())
    }
}

impl Persist for Carrier {
    /// Persist losslessly as PNG, pixel values preserved exactly.
    fn save_as(&mut self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| {
            error!("Error creating file {path:?}: {e}");
            SubstegoError::WriteError { source: e }
        })?;
        let mut writer = BufWriter::new(file);

        let result = match self {
            Carrier::Grayscale(gray) => gray.write_to(&mut writer, image::ImageFormat::Png),
            Carrier::Color(rgba) => rgba.write_to(&mut writer, image::ImageFormat::Png),
        };
        result.map_err(|e| {
            error!("Error saving image {path:?}: {e}");
            SubstegoError::ImageEncodingError
        })
    }
}
