//! RenderCache - in-memory memoization of rendered grids.
//!
//! Entries are keyed by a SHA-256 digest over the source pixels and every
//! parameter, so a hit is indistinguishable from a fresh render.

use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};

use crate::braille::BrailleGrid;
use crate::frame::PixelBuffer;
use crate::params::{AdjustmentParams, GlyphGridRequest};
use crate::pipeline::{render, RenderError};

/// Default number of grids kept.
pub const DEFAULT_CAPACITY: usize = 16;

/// Bounded cache of rendered grids, evicting the oldest insertion first.
#[derive(Debug)]
pub struct RenderCache {
    capacity: usize,
    entries: HashMap<String, BrailleGrid>,
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RenderCache {
    /// Create a cache holding at most `capacity` grids (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached grid for these inputs, rendering it on a miss.
    pub fn get_or_render(
        &mut self,
        source: &PixelBuffer,
        params: &AdjustmentParams,
        request: &GlyphGridRequest,
    ) -> Result<BrailleGrid, RenderError> {
        let key = Self::key(source, params, request);
        if let Some(grid) = self.entries.get(&key) {
            self.hits += 1;
            log::info!("render cache hit: {}", key);
            return Ok(grid.clone());
        }

        self.misses += 1;
        log::info!("render cache miss: {}", key);
        let grid = render(source, params, request)?;
        self.insert(key, grid.clone());
        Ok(grid)
    }

    fn insert(&mut self, key: String, grid: BrailleGrid) {
        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, grid);
    }

    /// Deterministic digest of the source and all parameters.
    /// Returns a 32-character hex string (first 16 bytes of SHA256).
    pub fn key(
        source: &PixelBuffer,
        params: &AdjustmentParams,
        request: &GlyphGridRequest,
    ) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.width.to_le_bytes());
        hasher.update(source.height.to_le_bytes());
        hasher.update(&source.data);
        for v in [
            params.brightness,
            params.contrast,
            params.saturation,
            params.sharpness,
        ] {
            hasher.update(v.to_bits().to_le_bytes());
        }
        hasher.update(request.chars_w.to_le_bytes());
        hasher.update(request.chars_h.to_le_bytes());
        hasher.update(request.max_chars.to_le_bytes());
        hasher.update([
            request.threshold,
            u8::from(request.invert),
            u8::from(request.keep_aspect),
        ]);
        let result = hasher.finalize();
        hex::encode(&result[..16])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
