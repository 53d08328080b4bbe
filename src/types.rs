//! Core types shared by the directory, registry and session modules

use std::fmt;

use crate::error::DirectoryError;

/// Process ID reserved for "no source"
pub const INVALID_PROCESS_ID: u32 = 0;

/// Timestamp value meaning "never happened"
pub const INVALID_TIMESTAMP: i64 = -1;

/// Pixel format requested by a capture source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Planar Y, U, V (4:2:0)
    IYUV,
    /// Planar Y, U, V (4:2:0), alias ordering used by some decoders
    I420,
    /// Packed U, Y, V, Y (4:2:2)
    UYVY,
    /// Packed R, G, B with a padding byte
    RGB0,
}

impl PixelFormat {
    /// All formats in their raw-value order
    pub const ALL: [PixelFormat; 4] = [
        PixelFormat::IYUV,
        PixelFormat::I420,
        PixelFormat::UYVY,
        PixelFormat::RGB0,
    ];

    /// Name used in source labels
    pub fn name(&self) -> &'static str {
        match self {
            PixelFormat::IYUV => "IYUV",
            PixelFormat::I420 => "I420",
            PixelFormat::UYVY => "UYVY",
            PixelFormat::RGB0 => "RGB0",
        }
    }

    /// Bits per pixel, averaged over chroma subsampling
    pub fn bits_per_pixel(&self) -> usize {
        match self {
            PixelFormat::IYUV | PixelFormat::I420 => 12,
            PixelFormat::UYVY => 16,
            PixelFormat::RGB0 => 32,
        }
    }

    /// Size in bytes of one frame with the given dimensions
    pub fn bytes_per_frame(&self, width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * self.bits_per_pixel() / 8
    }

    /// Raw value as stored in the shared directory
    pub fn to_raw(self) -> i32 {
        match self {
            PixelFormat::IYUV => 0,
            PixelFormat::I420 => 1,
            PixelFormat::UYVY => 2,
            PixelFormat::RGB0 => 3,
        }
    }
}

impl TryFrom<i32> for PixelFormat {
    type Error = DirectoryError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(PixelFormat::IYUV),
            1 => Ok(PixelFormat::I420),
            2 => Ok(PixelFormat::UYVY),
            3 => Ok(PixelFormat::RGB0),
            other => Err(DirectoryError::UnknownPixelFormat(other)),
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One record of a directory snapshot, as published by a capture process
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSource {
    /// Process ID (0 marks an unused slot)
    pub process_id: u32,
    /// Process display name
    pub process_name: String,
    /// Requested pixel format
    pub pixel_format: PixelFormat,
    /// Requested sample width in pixels
    pub width: u32,
    /// Requested sample height in pixels
    pub height: u32,
    /// Requested frame rate
    pub fps: f64,
}

impl CaptureSource {
    pub fn new(
        process_id: u32,
        process_name: impl Into<String>,
        pixel_format: PixelFormat,
        width: u32,
        height: u32,
        fps: f64,
    ) -> Self {
        Self {
            process_id,
            process_name: process_name.into(),
            pixel_format,
            width,
            height,
            fps,
        }
    }

    /// An unused directory slot
    pub fn empty_slot() -> Self {
        Self::new(INVALID_PROCESS_ID, "", PixelFormat::IYUV, 0, 0, 0.0)
    }

    /// Check whether this record describes a real process
    pub fn is_valid(&self) -> bool {
        self.process_id != INVALID_PROCESS_ID
    }
}

/// Registry-side copy of a capture source, fixed for one refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntry {
    pub process_id: u32,
    pub process_name: String,
    pub pixel_format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl SourceEntry {
    /// Capture parameters of this entry
    pub fn parameters(&self) -> SampleParameters {
        SampleParameters {
            pixel_format: self.pixel_format,
            width: self.width,
            height: self.height,
        }
    }
}

impl From<&CaptureSource> for SourceEntry {
    fn from(source: &CaptureSource) -> Self {
        Self {
            process_id: source.process_id,
            process_name: source.process_name.clone(),
            pixel_format: source.pixel_format,
            width: source.width,
            height: source.height,
            fps: source.fps,
        }
    }
}

/// Effective sample parameters of the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleParameters {
    pub pixel_format: PixelFormat,
    pub width: u32,
    pub height: u32,
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Pixel format reported while no source is selected
    pub fallback_pixel_format: PixelFormat,
    /// Sample width reported while no source is selected
    pub fallback_width: u32,
    /// Sample height reported while no source is selected
    pub fallback_height: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fallback_pixel_format: PixelFormat::IYUV,
            fallback_width: 640,
            fallback_height: 480,
        }
    }
}

impl RuntimeConfig {
    /// Fallback parameters as a single value
    pub fn fallback_parameters(&self) -> SampleParameters {
        SampleParameters {
            pixel_format: self.fallback_pixel_format,
            width: self.fallback_width,
            height: self.fallback_height,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fallback_width == 0 {
            return Err("Fallback width must be greater than 0".to_string());
        }
        if self.fallback_height == 0 {
            return Err("Fallback height must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Rectangle structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}
