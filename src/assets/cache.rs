//! Decoded image cache.
//!
//! Each path gets its own slot. The first caller for a path decodes while
//! holding that slot's lock, so concurrent callers for the same path wait
//! for one decode instead of racing; callers for other paths are not
//! blocked. A path only counts towards the capacity once it has decoded;
//! failed loads drop their slot so a later call retries.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use image::RgbaImage;

use crate::error::{Result, ValleyError};

use super::AssetStore;

type Slot = Arc<Mutex<Option<Arc<RgbaImage>>>>;

#[derive(Default)]
struct Slots {
    /// Decoded and in-flight slots.
    by_path: HashMap<String, Slot>,
    /// Decoded paths, oldest first.
    order: VecDeque<String>,
}

/// Memoizing image loader over an [`AssetStore`].
pub struct ImageCache {
    store: Box<dyn AssetStore>,
    capacity: Option<usize>,
    slots: Mutex<Slots>,
    decodes: AtomicUsize,
}

impl ImageCache {
    /// Create an unbounded cache.
    pub fn new(store: impl AssetStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            capacity: None,
            slots: Mutex::new(Slots::default()),
            decodes: AtomicUsize::new(0),
        }
    }

    /// Create a cache holding at most `capacity` images.
    ///
    /// When full, the oldest entry is evicted. A capacity of zero is
    /// treated as one.
    pub fn with_capacity(store: impl AssetStore + 'static, capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::new(store)
        }
    }

    /// Fetch the decoded image stored under `path`.
    pub fn get(&self, path: &str) -> Result<Arc<RgbaImage>> {
        let slot = self.slot(path);
        let mut entry = lock(&slot);

        if let Some(image) = entry.as_ref() {
            tracing::trace!(path, "image cache hit");
            return Ok(Arc::clone(image));
        }

        let decoded = match self.load(path) {
            Ok(decoded) => decoded,
            Err(err) => {
                self.forget(path, &slot);
                return Err(err);
            }
        };

        let image = Arc::new(decoded);
        *entry = Some(Arc::clone(&image));
        self.admit(path, &slot);
        Ok(image)
    }

    fn load(&self, path: &str) -> Result<RgbaImage> {
        let bytes = self.store.read(path)?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| ValleyError::Decode {
                path: path.to_string(),
                message: e.to_string(),
            })?
            .to_rgba8();
        self.decodes.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(path, width = decoded.width(), height = decoded.height(), "decoded image");
        Ok(decoded)
    }

    /// Number of decoded images currently held.
    pub fn len(&self) -> usize {
        lock(&self.slots).order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of successful decodes since creation.
    pub fn decodes(&self) -> usize {
        self.decodes.load(Ordering::Relaxed)
    }

    /// Drop every cached image.
    pub fn clear(&self) {
        let mut slots = lock(&self.slots);
        slots.by_path.clear();
        slots.order.clear();
    }

    fn slot(&self, path: &str) -> Slot {
        let mut slots = lock(&self.slots);
        Arc::clone(slots.by_path.entry(path.to_string()).or_default())
    }

    /// Record a decoded slot, evicting the oldest images past capacity.
    fn admit(&self, path: &str, slot: &Slot) {
        let mut slots = lock(&self.slots);
        let current = slots.by_path.get(path).is_some_and(|s| Arc::ptr_eq(s, slot));
        if !current {
            return;
        }
        slots.order.push_back(path.to_string());

        if let Some(capacity) = self.capacity {
            while slots.order.len() > capacity {
                let Some(oldest) = slots.order.pop_front() else {
                    break;
                };
                slots.by_path.remove(&oldest);
                tracing::trace!(path = %oldest, "evicted image");
            }
        }
    }

    /// Drop a slot whose load failed, unless it has already been replaced.
    fn forget(&self, path: &str, slot: &Slot) {
        let mut slots = lock(&self.slots);
        if slots.by_path.get(path).is_some_and(|s| Arc::ptr_eq(s, slot)) {
            slots.by_path.remove(path);
        }
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("decodes", &self.decodes())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryStore;
    use crate::render::encode_png;
    use image::Rgba;
    use std::thread;

    fn png(colour: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(2, 2, Rgba(colour));
        encode_png(&img).unwrap()
    }

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert("a.PNG", png([255, 0, 0, 255]));
        store.insert("b.PNG", png([0, 0, 255, 255]));
        store.insert("c.PNG", png([0, 255, 0, 255]));
        store.insert("broken.PNG", b"not a png".to_vec());
        store
    }

    #[test]
    fn test_second_get_does_not_decode_again() {
        let cache = ImageCache::new(store());

        let first = cache.get("a.PNG").unwrap();
        let second = cache.get("a.PNG").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.decodes(), 1);
        assert_eq!(first.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_missing_and_undecodable_assets() {
        let cache = ImageCache::new(store());

        assert!(matches!(cache.get("nope.PNG"), Err(ValleyError::Asset { .. })));
        assert!(matches!(cache.get("broken.PNG"), Err(ValleyError::Decode { .. })));
        assert_eq!(cache.decodes(), 0);
    }

    #[test]
    fn test_failed_load_is_not_kept() {
        let cache = ImageCache::with_capacity(store(), 2);

        cache.get("a.PNG").unwrap();
        cache.get("b.PNG").unwrap();
        assert!(cache.get("missing.PNG").is_err());
        assert!(cache.get("broken.PNG").is_err());
        assert_eq!(cache.len(), 2);

        // Neither failure pushed "a" out.
        cache.get("a.PNG").unwrap();
        assert_eq!(cache.decodes(), 2);
    }

    #[test]
    fn test_unbounded_cache_does_not_grow_on_failures() {
        let cache = ImageCache::new(store());
        for i in 0..10 {
            assert!(cache.get(&format!("missing-{}.PNG", i)).is_err());
        }
        assert!(cache.is_empty());
        assert_eq!(lock(&cache.slots).by_path.len(), 0);
    }

    #[test]
    fn test_bounded_cache_evicts_oldest() {
        let cache = ImageCache::with_capacity(store(), 2);

        cache.get("a.PNG").unwrap();
        cache.get("b.PNG").unwrap();
        cache.get("c.PNG").unwrap();
        assert_eq!(cache.len(), 2);

        // "a" was evicted, so it decodes again.
        cache.get("a.PNG").unwrap();
        assert_eq!(cache.decodes(), 4);
    }

    #[test]
    fn test_concurrent_gets_decode_once() {
        let cache = Arc::new(ImageCache::new(store()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get("b.PNG").unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.decodes(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = ImageCache::new(store());
        cache.get("a.PNG").unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
