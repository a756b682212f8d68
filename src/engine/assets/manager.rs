// Central asset management system

use super::handle::{AssetHandle, AssetId, SheetHandle};
use super::loader::{AssetLoader, SpriteSheet};
use super::AssetError;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Loading state of a single asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Decoding in the background
    Pending,
    /// Decoded and available
    Ready,
    /// Failed to load; stays unavailable for the rest of the run
    Failed,
}

/// Message sent back from a loader thread
struct LoadResult {
    id: AssetId,
    name: String,
    result: Result<SpriteSheet, AssetError>,
}

/// Central asset manager for the game
///
/// Sprite sheets are requested up front and decoded on background threads.
/// Finished loads are picked up by `poll`, which the game calls at the start
/// of every tick, so nothing is shared across threads during a tick.
pub struct AssetManager {
    /// Asset loader
    loader: AssetLoader,

    /// Decoded sheets
    sheets: HashMap<AssetId, SpriteSheet>,

    /// Status of every requested sheet
    statuses: HashMap<AssetId, LoadStatus>,

    /// Path to ID mapping for sheets
    sheet_paths: HashMap<String, AssetId>,

    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
}

impl AssetManager {
    /// Create a new asset manager
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            loader: AssetLoader::new(asset_path),
            sheets: HashMap::new(),
            statuses: HashMap::new(),
            sheet_paths: HashMap::new(),
            sender,
            receiver,
        }
    }

    /// Start loading a sprite sheet in the background and return its handle at once.
    /// Requesting the same path twice shares a single load.
    pub fn request(&mut self, name: &str) -> SheetHandle {
        if let Some(&id) = self.sheet_paths.get(name) {
            return AssetHandle::new(id);
        }

        let id = AssetId::from_path(name);
        self.sheet_paths.insert(name.to_string(), id);
        self.statuses.insert(id, LoadStatus::Pending);

        let loader = self.loader.clone();
        let sender = self.sender.clone();
        let thread_name = name.to_string();
        let spawned = thread::Builder::new()
            .name(format!("sheet-loader:{}", name))
            .spawn(move || {
                let result = loader.load_sheet(&thread_name);
                // Receiver gone means the game already shut down
                let _ = sender.send(LoadResult {
                    id,
                    name: thread_name,
                    result,
                });
            });

        if let Err(e) = spawned {
            warn!("Could not start loader for {}: {}", name, e);
            self.statuses.insert(id, LoadStatus::Failed);
        } else {
            debug!("Requested sprite sheet {}", name);
        }

        AssetHandle::new(id)
    }

    /// Register an already decoded sheet under `name`
    #[cfg(test)]
    pub fn insert_sheet(&mut self, name: &str, sheet: SpriteSheet) -> SheetHandle {
        let id = AssetId::from_path(name);
        self.sheet_paths.insert(name.to_string(), id);
        self.statuses.insert(id, LoadStatus::Ready);
        self.sheets.insert(id, sheet);
        AssetHandle::new(id)
    }

    /// Collect loads that finished since the last call. Returns how many were collected.
    pub fn poll(&mut self) -> usize {
        let mut collected = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.finish(message);
            collected += 1;
        }
        collected
    }

    /// Block until every requested sheet is ready or failed, or `timeout` elapses.
    /// Returns true if everything settled in time.
    pub fn wait_until_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.poll();

        while !self.is_settled() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(message) => self.finish(message),
                Err(RecvTimeoutError::Timeout) => return false,
                // We hold a sender ourselves, so this only happens on shutdown
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }

        true
    }

    fn finish(&mut self, message: LoadResult) {
        match message.result {
            Ok(sheet) => {
                info!(
                    "Loaded sprite sheet {} ({}x{})",
                    message.name,
                    sheet.width(),
                    sheet.height()
                );
                self.sheets.insert(message.id, sheet);
                self.statuses.insert(message.id, LoadStatus::Ready);
            }
            Err(e) => {
                warn!("Failed to load sprite sheet {}: {}", message.name, e);
                self.statuses.insert(message.id, LoadStatus::Failed);
            }
        }
    }

    /// Get a sheet by handle; `None` until it has loaded
    pub fn sheet(&self, handle: SheetHandle) -> Option<&SpriteSheet> {
        self.sheets.get(&handle.id())
    }

    /// Loading status of a handle (`None` for handles this manager never issued)
    pub fn status(&self, handle: SheetHandle) -> Option<LoadStatus> {
        self.statuses.get(&handle.id()).copied()
    }

    /// True when no request is still pending
    pub fn is_settled(&self) -> bool {
        self.statuses.values().all(|s| *s != LoadStatus::Pending)
    }

    /// Get statistics about requested assets
    pub fn stats(&self) -> AssetStats {
        let count = |wanted: LoadStatus| self.statuses.values().filter(|s| **s == wanted).count();
        AssetStats {
            ready: count(LoadStatus::Ready),
            pending: count(LoadStatus::Pending),
            failed: count(LoadStatus::Failed),
        }
    }

    /// Get the asset loader
    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}

/// Statistics about requested assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStats {
    pub ready: usize,
    pub pending: usize,
    pub failed: usize,
}
