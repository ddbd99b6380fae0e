//! Subcommand handlers for render and config actions.

use std::path::Path;

use braille_art::braille::shrink_to_fit;
use braille_art::config::{default_path, Config, DEFAULT_CONFIG};
use braille_art::decode::{Decode, ImageDecoder};
use braille_art::export;
use braille_art::params::{AdjustmentParams, GlyphGridRequest};
use braille_art::pipeline::render;

use super::args::{ConfigAction, RenderArgs};

/// Effective settings for one render after merging flags over the config.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub params: AdjustmentParams,
    pub request: GlyphGridRequest,
    pub max_source: (u32, u32),
}

/// Load the config, requiring the file to exist when a path was given.
fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let result = match path {
        Some(p) => Config::load_explicit(p),
        None => Config::load(None),
    };
    result.map_err(|e| e.to_string())
}

/// Overlay command-line flags on top of the loaded config.
pub fn merge_settings(args: &RenderArgs, cfg: &Config) -> Result<RenderSettings, String> {
    let mut params = cfg.adjust;
    if let Some(v) = args.brightness {
        params.brightness = v;
    }
    if let Some(v) = args.contrast {
        params.contrast = v;
    }
    if let Some(v) = args.saturation {
        params.saturation = v;
    }
    if let Some(v) = args.sharpness {
        params.sharpness = v;
    }

    let mut request = cfg.grid_request();
    if let Some(w) = args.width {
        request.chars_w = w;
    }
    if let Some(h) = args.height {
        request.chars_h = h;
    }
    if let Some(t) = args.threshold {
        request.threshold = t;
    }
    request.invert |= args.invert;
    request.keep_aspect |= args.keep_aspect;

    params.validate().map_err(|e| e.to_string())?;
    request.validate().map_err(|e| e.to_string())?;

    let max_source = args
        .max_source
        .unwrap_or((cfg.source.max_width, cfg.source.max_height));

    Ok(RenderSettings {
        params,
        request,
        max_source,
    })
}

/// Decode, render and write one image.
pub fn run_render(args: &RenderArgs, config_path: Option<&Path>) -> Result<(), String> {
    let cfg = load_config(config_path)?;
    let settings = merge_settings(args, &cfg)?;

    let source = ImageDecoder
        .decode_file(&args.image)
        .map_err(|e| e.to_string())?;
    let (max_w, max_h) = settings.max_source;
    let source = shrink_to_fit(&source, max_w, max_h);

    let grid = render(&source, &settings.params, &settings.request).map_err(|e| e.to_string())?;

    if let Some(path) = &args.png {
        let font_size = args.font_size.unwrap_or(export::DEFAULT_FONT_SIZE);
        export::write_png(path, &grid, font_size).map_err(|e| e.to_string())?;
    }

    match &args.output {
        Some(path) => export::write_text(path, &grid),
        None => export::write_to(std::io::stdout().lock(), &grid),
    }
    .map_err(|e| e.to_string())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>) -> Result<(), String> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let cfg = load_config(config_path)?;
            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found, using defaults)", path.display());
            }
            println!();
            let text = cfg.to_toml().map_err(|e| e.to_string())?;
            print!("{}", text);
            Ok(())
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(format!(
                    "Config file already exists: {}\nUse 'braille-art config show' to view current settings.",
                    path.display()
                ));
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating config directory: {}", e))?;
            }

            std::fs::write(&path, DEFAULT_CONFIG)
                .map_err(|e| format!("Error writing config file: {}", e))?;

            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}
