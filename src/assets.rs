//! Sprite asset registry
//!
//! Decoding happens outside the simulation. Each asset gets a write-once
//! slot that a loader fills exactly once; the render side asks whether it
//! is ready and draws a placeholder color until it is.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::thread::JoinHandle;

use serde::{Deserialize, Serialize};

/// Every sprite sheet the game draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    Player,
    GroundPatroller,
    FlyingPatroller,
    Gem,
    ItemFeedback,
    Hearts,
    EnemyDeath,
    Dynamite,
    Explosion,
}

impl AssetId {
    pub const ALL: [AssetId; 9] = [
        AssetId::Player,
        AssetId::GroundPatroller,
        AssetId::FlyingPatroller,
        AssetId::Gem,
        AssetId::ItemFeedback,
        AssetId::Hearts,
        AssetId::EnemyDeath,
        AssetId::Dynamite,
        AssetId::Explosion,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            AssetId::Player => "player.png",
            AssetId::GroundPatroller => "oposum.png",
            AssetId::FlyingPatroller => "eagle.png",
            AssetId::Gem => "gem.png",
            AssetId::ItemFeedback => "item_feedback.png",
            AssetId::Hearts => "hearts.png",
            AssetId::EnemyDeath => "enemy_death.png",
            AssetId::Dynamite => "dynamite_pack.png",
            AssetId::Explosion => "explosion.png",
        }
    }

    /// RGBA color drawn in place of the sprite while it is not ready
    pub fn placeholder_color(self) -> u32 {
        match self {
            AssetId::Player => 0xFF0000FF,
            AssetId::FlyingPatroller => 0x800080FF,
            _ => 0xFF00FFFF,
        }
    }
}

/// A value published once and read many times, from any thread
#[derive(Debug)]
pub struct AssetSlot<T> {
    cell: Arc<OnceLock<T>>,
}

impl<T> Clone for AssetSlot<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> Default for AssetSlot<T> {
    fn default() -> Self {
        Self {
            cell: Arc::new(OnceLock::new()),
        }
    }
}

impl<T> AssetSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the decoded value. A second publish is rejected and handed back.
    pub fn publish(&self, value: T) -> Result<(), T> {
        self.cell.set(value)
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Owned set of asset slots, one per `AssetId`
#[derive(Debug)]
pub struct AssetRegistry<T> {
    root: PathBuf,
    slots: HashMap<AssetId, AssetSlot<T>>,
}

impl<T> AssetRegistry<T> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let slots = AssetId::ALL.iter().map(|&id| (id, AssetSlot::new())).collect();
        Self {
            root: root.into(),
            slots,
        }
    }

    pub fn path_of(&self, id: AssetId) -> PathBuf {
        self.root.join(id.file_name())
    }

    /// Shared handle to a slot (hand this to a loader)
    pub fn slot(&self, id: AssetId) -> AssetSlot<T> {
        // Every id gets a slot in `new`
        self.slots.get(&id).cloned().unwrap_or_default()
    }

    pub fn get(&self, id: AssetId) -> Option<&T> {
        self.slots.get(&id).and_then(AssetSlot::get)
    }

    pub fn is_ready(&self, id: AssetId) -> bool {
        self.get(id).is_some()
    }

    pub fn ready_count(&self) -> usize {
        self.slots.values().filter(|s| s.is_ready()).count()
    }
}

impl<T: Send + Sync + 'static> AssetRegistry<T> {
    /// Decode every asset on a worker thread, publishing each as it completes.
    ///
    /// Assets that fail to decode are logged and their slot stays empty.
    pub fn load_in_background<F>(&self, decode: F) -> JoinHandle<()>
    where
        F: Fn(&Path) -> std::io::Result<T> + Send + 'static,
    {
        let jobs: Vec<(AssetId, PathBuf, AssetSlot<T>)> = AssetId::ALL
            .iter()
            .map(|&id| (id, self.path_of(id), self.slot(id)))
            .collect();

        std::thread::spawn(move || {
            for (id, path, slot) in jobs {
                match decode(&path) {
                    Ok(value) => {
                        if slot.publish(value).is_err() {
                            log::warn!("Asset {:?} was already published", id);
                        } else {
                            log::debug!("Asset {:?} ready", id);
                        }
                    }
                    Err(e) => log::warn!("Failed to load {}: {}", path.display(), e),
                }
            }
        })
    }
}
