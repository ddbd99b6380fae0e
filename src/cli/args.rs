//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Render images as Unicode Braille text
#[derive(Parser, Debug)]
#[command(name = "braille-art")]
#[command(version, about = "Render images as Unicode Braille text", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render an image file as Braille text
    Render(RenderArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Flags for `render`. Anything left unset falls back to the config file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Image to render (PNG, JPEG, GIF, BMP, WebP)
    pub image: PathBuf,

    /// Output width in characters
    #[arg(long, short, value_parser = parse_chars)]
    pub width: Option<u32>,

    /// Output height in characters (ignored with --keep-aspect)
    #[arg(long, value_parser = parse_chars)]
    pub height: Option<u32>,

    /// Derive the height from the width and the image aspect ratio
    #[arg(long)]
    pub keep_aspect: bool,

    /// Luma threshold for a dot (0-255)
    #[arg(long, short, value_parser = parse_threshold)]
    pub threshold: Option<u8>,

    /// Set dots for dark pixels instead of bright ones
    #[arg(long, short)]
    pub invert: bool,

    /// Brightness shift (-100 to 100)
    #[arg(long, allow_negative_numbers = true, value_parser = parse_brightness)]
    pub brightness: Option<f64>,

    /// Contrast (-100 to 100)
    #[arg(long, allow_negative_numbers = true, value_parser = parse_contrast)]
    pub contrast: Option<f64>,

    /// Saturation (-100 to 100)
    #[arg(long, allow_negative_numbers = true, value_parser = parse_saturation)]
    pub saturation: Option<f64>,

    /// Sharpening strength (0 to 5)
    #[arg(long, value_parser = parse_sharpness)]
    pub sharpness: Option<f64>,

    /// Shrink the decoded image to fit WIDTHxHEIGHT first (0 = no limit)
    #[arg(long, value_name = "WxH", value_parser = parse_max_source)]
    pub max_source: Option<(u32, u32)>,

    /// Write the text to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also save a PNG picture of the text
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Font size in pixels for --png (4-96)
    #[arg(long, value_name = "PX", value_parser = parse_font_size)]
    pub font_size: Option<u32>,
}

fn parse_in_range(s: &str, name: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(min..=max).contains(&value) {
        return Err(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        ));
    }
    Ok(value)
}

/// Parse and validate brightness (-100 to 100)
fn parse_brightness(s: &str) -> Result<f64, String> {
    parse_in_range(s, "Brightness", -100.0, 100.0)
}

/// Parse and validate contrast (-100 to 100)
fn parse_contrast(s: &str) -> Result<f64, String> {
    parse_in_range(s, "Contrast", -100.0, 100.0)
}

/// Parse and validate saturation (-100 to 100)
fn parse_saturation(s: &str) -> Result<f64, String> {
    parse_in_range(s, "Saturation", -100.0, 100.0)
}

/// Parse and validate sharpness (0 to 5)
fn parse_sharpness(s: &str) -> Result<f64, String> {
    parse_in_range(s, "Sharpness", 0.0, 5.0)
}

/// Parse and validate threshold (0-255)
fn parse_threshold(s: &str) -> Result<u8, String> {
    s.parse()
        .map_err(|_| format!("Threshold must be an integer between 0 and 255, got '{}'", s))
}

/// Parse a character count (at least 1)
fn parse_chars(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid character count", s))?;
    if n == 0 {
        return Err("Character count must be at least 1".to_string());
    }
    Ok(n)
}

/// Parse and validate the PNG font size (4-96)
fn parse_font_size(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid font size", s))?;
    if !(4..=96).contains(&n) {
        return Err(format!("Font size must be between 4 and 96, got {}", n));
    }
    Ok(n)
}

/// Parse a source bound (WIDTHxHEIGHT format, 0 disables an axis)
fn parse_max_source(s: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid size format '{}'. Use WIDTHxHEIGHT (e.g., 800x600)",
            s
        ));
    }
    let width: u32 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid width '{}' in size", parts[0]))?;
    let height: u32 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid height '{}' in size", parts[1]))?;
    Ok((width, height))
}
