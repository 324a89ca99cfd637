//! Host seam for the painting pipeline
//!
//! The raster core does not own layers or history. It asks a [`PaintHost`]
//! for the active layer's surface, tells it when a logical operation has
//! finished mutating a layer, and asks it to redraw.
//!
//! [`Document`] is a small host that keeps a flat layer list and
//! whole-surface snapshot undo/redo.

use std::collections::HashMap;

use gesso_config::HistoryConfig;
use tracing::debug;

use crate::surface::CpuSurface;
use crate::types::{LayerId, Rgba8};

/// Services the painting pipeline consumes from the application
pub trait PaintHost {
    /// Layer that paint operations target, if any
    fn active_layer(&self) -> Option<LayerId>;

    /// Pixel buffer for a layer
    fn surface_mut(&mut self, layer: LayerId) -> Option<&mut CpuSurface>;

    /// A stroke or fill on `layer` is complete; record it in history.
    /// Called exactly once per logical operation.
    fn commit_mutation(&mut self, layer: LayerId);

    /// Pixels changed and the view should be refreshed
    fn request_redraw(&mut self);
}

/// A named raster layer
#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub surface: CpuSurface,
}

/// One committed mutation: the layer content before and after
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub layer: LayerId,
    before: CpuSurface,
    after: CpuSurface,
}

/// Reference [`PaintHost`] with snapshot history
#[derive(Debug)]
pub struct Document {
    layers: Vec<Layer>,
    active: Option<LayerId>,
    next_id: u32,
    /// Layer content as of its last commit
    committed: HashMap<LayerId, CpuSurface>,
    /// Undo stack (most recent at end)
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_undo_levels: usize,
    commit_count: u64,
    redraw_pending: bool,
}

impl Document {
    pub fn new(history: HistoryConfig) -> Self {
        Self {
            layers: Vec::new(),
            active: None,
            next_id: 0,
            committed: HashMap::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_levels: history.max_undo_levels,
            commit_count: 0,
            redraw_pending: false,
        }
    }

    /// Append a layer filled with `color`. The first layer becomes active.
    pub fn add_layer(&mut self, name: impl Into<String>, width: u32, height: u32, color: Rgba8) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        let surface = CpuSurface::filled(width, height, color);
        self.committed.insert(id, surface.clone());
        self.layers.push(Layer {
            id,
            name: name.into(),
            surface,
        });
        if self.active.is_none() {
            self.active = Some(id);
        }
        debug!("Document: added layer {:?} ({}x{})", id, width, height);
        id
    }

    /// Make `layer` the paint target. Returns false if it does not exist.
    pub fn set_active_layer(&mut self, layer: LayerId) -> bool {
        if self.layer(layer).is_none() {
            return false;
        }
        self.active = Some(layer);
        true
    }

    /// Clear the paint target
    pub fn clear_active_layer(&mut self) {
        self.active = None;
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn surface(&self, id: LayerId) -> Option<&CpuSurface> {
        self.layer(id).map(|l| &l.surface)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Number of commits received
    pub fn commit_count(&self) -> u64 {
        self.commit_count
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Restore the layer touched by the most recent commit.
    ///
    /// Returns true if an undo was performed.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            debug!("Undo: no entries available");
            return false;
        };
        debug!("Undoing mutation on layer {:?}", entry.layer);
        self.restore(entry.layer, entry.before.clone());
        self.redo_stack.push(entry);
        true
    }

    /// Re-apply the most recently undone commit
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            debug!("Redo: no entries available");
            return false;
        };
        debug!("Redoing mutation on layer {:?}", entry.layer);
        self.restore(entry.layer, entry.after.clone());
        self.undo_stack.push(entry);
        true
    }

    fn restore(&mut self, id: LayerId, surface: CpuSurface) {
        self.committed.insert(id, surface.clone());
        if let Some(layer) = self.layer_mut(id) {
            layer.surface = surface;
        }
        self.redraw_pending = true;
    }

    /// Whether a redraw was requested since the last call; clears the flag
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl PaintHost for Document {
    fn active_layer(&self) -> Option<LayerId> {
        self.active
    }

    fn surface_mut(&mut self, layer: LayerId) -> Option<&mut CpuSurface> {
        self.layer_mut(layer).map(|l| &mut l.surface)
    }

    fn commit_mutation(&mut self, layer: LayerId) {
        let Some(after) = self.surface(layer).cloned() else {
            debug!("commit_mutation: unknown layer {:?}", layer);
            return;
        };
        let before = self
            .committed
            .insert(layer, after.clone())
            .unwrap_or_else(|| CpuSurface::new(after.width, after.height));

        self.commit_count += 1;
        self.redo_stack.clear();
        self.undo_stack.push(HistoryEntry { layer, before, after });

        // Limit undo stack size
        while self.undo_stack.len() > self.max_undo_levels {
            self.undo_stack.remove(0);
        }

        debug!(
            "Committed mutation on layer {:?} ({} undo levels)",
            layer,
            self.undo_stack.len()
        );
    }

    fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }
}
