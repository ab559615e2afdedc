//! Unlock progress: levels and gallery photos
//!
//! Persisted separately from the leaderboard. Level unlocks only ever move
//! forward; photo unlocks are a set, so repeating an ending changes nothing.

use serde::{Deserialize, Serialize};

/// Beating level 3 unlocks this pseudo-level, which enables the rabbit
pub const RABBIT_UNLOCK_LEVEL: u32 = 4;

/// Player progression, shared across runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    unlocked_level: u32,
    photos: Vec<String>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            unlocked_level: 1,
            photos: Vec::new(),
        }
    }
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pet_rescue_progress";

    pub fn new() -> Self {
        Self::default()
    }

    /// Highest level the player may select (4 means the rabbit is unlocked)
    pub fn unlocked_level(&self) -> u32 {
        self.unlocked_level
    }

    /// Raise the unlocked level. Lower values are ignored, so replaying an
    /// early level can never lock the player out of later ones.
    pub fn unlock_level(&mut self, level: u32) {
        if level > self.unlocked_level {
            log::info!("level {level} unlocked");
            self.unlocked_level = level;
        }
    }

    pub fn rabbit_unlocked(&self) -> bool {
        self.unlocked_level >= RABBIT_UNLOCK_LEVEL
    }

    pub fn photo_unlocked(&self, id: &str) -> bool {
        self.photos.iter().any(|p| p == id)
    }

    /// Add a photo to the gallery. Idempotent.
    pub fn unlock_photo(&mut self, id: &str) {
        if !self.photo_unlocked(id) {
            log::info!("photo '{id}' unlocked");
            self.photos.push(id.to_string());
        }
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(progress) = serde_json::from_str::<Progress>(&json) {
                    log::info!("Loaded progress (level {})", progress.unlocked_level);
                    return progress;
                }
            }
        }

        log::info!("No saved progress, starting at level 1");
        Self::default()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_unlocks_are_monotonic() {
        let mut progress = Progress::new();
        assert_eq!(progress.unlocked_level(), 1);
        progress.unlock_level(3);
        assert_eq!(progress.unlocked_level(), 3);
        progress.unlock_level(2);
        assert_eq!(progress.unlocked_level(), 3);
        progress.unlock_level(3);
        assert_eq!(progress.unlocked_level(), 3);
    }

    #[test]
    fn rabbit_gated_behind_level_four() {
        let mut progress = Progress::new();
        assert!(!progress.rabbit_unlocked());
        progress.unlock_level(RABBIT_UNLOCK_LEVEL);
        assert!(progress.rabbit_unlocked());
    }

    #[test]
    fn photo_unlocks_are_idempotent() {
        let mut progress = Progress::new();
        assert!(!progress.photo_unlocked("vila-normal"));
        progress.unlock_photo("vila-normal");
        progress.unlock_photo("vila-normal");
        assert!(progress.photo_unlocked("vila-normal"));
        assert_eq!(progress.photos().len(), 1);
    }
}
