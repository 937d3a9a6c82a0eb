//! Per-page image cache for the reader.
//!
//! Every page has a slot tracking its load state. A slot guarantees a single
//! in-flight fetch: `begin_load` only hands out permission to fetch when the
//! slot actually transitioned to `Loading`. Memory stays bounded by unloading
//! pages far from the current one; edge colors survive eviction because
//! recomputing one means re-decoding the whole page.

use iced::widget::image::Handle;

/// Averaged border color of a page, used to tint the reader background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Border pixels are sampled from a downsampled copy no larger than this.
const EDGE_SAMPLE_MAX_SIDE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Unloaded,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone)]
struct PageSlot {
    state: SlotState,
    handle: Option<Handle>,
    edge_color: Option<EdgeColor>,
}

impl PageSlot {
    fn new() -> Self {
        Self {
            state: SlotState::Unloaded,
            handle: None,
            edge_color: None,
        }
    }
}

#[derive(Debug)]
pub struct PageStore {
    slots: Vec<PageSlot>,
}

impl PageStore {
    pub fn new(page_count: usize) -> Self {
        Self {
            slots: vec![PageSlot::new(); page_count],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn state(&self, index: usize) -> SlotState {
        self.slots
            .get(index)
            .map(|slot| slot.state)
            .unwrap_or(SlotState::Unloaded)
    }

    /// Request a page. Returns `true` iff the slot transitioned to `Loading`
    /// and the caller must now issue exactly one fetch. A slot that is
    /// already loading or loaded returns `false`; a failed slot may be
    /// retried and transitions back to `Loading`.
    pub fn begin_load(&mut self, index: usize) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        match slot.state {
            SlotState::Unloaded | SlotState::Error => {
                slot.state = SlotState::Loading;
                true
            }
            SlotState::Loading | SlotState::Loaded => false,
        }
    }

    /// Completion for a fetch granted by `begin_load`. A completion arriving
    /// for a slot that is no longer loading is dropped.
    pub fn finish_load(&mut self, index: usize, handle: Handle, edge_color: EdgeColor) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        if slot.state != SlotState::Loading {
            return;
        }
        slot.state = SlotState::Loaded;
        slot.handle = Some(handle);
        slot.edge_color = Some(edge_color);
    }

    pub fn fail_load(&mut self, index: usize) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        if slot.state != SlotState::Loading {
            return;
        }
        slot.state = SlotState::Error;
        slot.handle = None;
    }

    /// Release image data for every loaded page outside `keep_radius` of
    /// `center`. Cached edge colors are retained.
    pub fn evict_distant(&mut self, center: usize, keep_radius: usize) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.state != SlotState::Loaded {
                continue;
            }
            if center.abs_diff(index) > keep_radius {
                slot.state = SlotState::Unloaded;
                slot.handle = None;
            }
        }
    }

    pub fn handle(&self, index: usize) -> Option<Handle> {
        self.slots.get(index).and_then(|slot| slot.handle.clone())
    }

    pub fn edge_color(&self, index: usize) -> Option<EdgeColor> {
        self.slots.get(index).and_then(|slot| slot.edge_color)
    }
}

/// Average the border pixels (top and bottom rows, left and right columns,
/// corners counted once) of a downsampled copy of the page.
pub fn edge_color_of(image: &image::DynamicImage) -> EdgeColor {
    let small = image
        .thumbnail(EDGE_SAMPLE_MAX_SIDE, EDGE_SAMPLE_MAX_SIDE)
        .to_rgba8();
    let (width, height) = small.dimensions();
    if width == 0 || height == 0 {
        return EdgeColor {
            r: 128,
            g: 128,
            b: 128,
        };
    }

    let mut sum = [0u64; 3];
    let mut count = 0u64;
    let sample = |x: u32, y: u32, sum: &mut [u64; 3], count: &mut u64| {
        let pixel = small.get_pixel(x, y);
        sum[0] += u64::from(pixel[0]);
        sum[1] += u64::from(pixel[1]);
        sum[2] += u64::from(pixel[2]);
        *count += 1;
    };

    for x in 0..width {
        sample(x, 0, &mut sum, &mut count);
        if height > 1 {
            sample(x, height - 1, &mut sum, &mut count);
        }
    }
    for y in 1..height.saturating_sub(1) {
        sample(0, y, &mut sum, &mut count);
        if width > 1 {
            sample(width - 1, y, &mut sum, &mut count);
        }
    }

    EdgeColor {
        r: (sum[0] / count) as u8,
        g: (sum[1] / count) as u8,
        b: (sum[2] / count) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn test_handle() -> Handle {
        Handle::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    fn test_color() -> EdgeColor {
        EdgeColor { r: 1, g: 2, b: 3 }
    }

    #[test]
    fn begin_load_is_idempotent_while_loading() {
        let mut store = PageStore::new(4);
        assert!(store.begin_load(2));
        assert!(!store.begin_load(2));
        assert_eq!(store.state(2), SlotState::Loading);
    }

    #[test]
    fn failed_slots_may_be_retried() {
        let mut store = PageStore::new(2);
        assert!(store.begin_load(0));
        store.fail_load(0);
        assert_eq!(store.state(0), SlotState::Error);
        assert!(store.begin_load(0));
        assert_eq!(store.state(0), SlotState::Loading);
    }

    #[test]
    fn loaded_slots_are_not_reloaded() {
        let mut store = PageStore::new(2);
        assert!(store.begin_load(0));
        store.finish_load(0, test_handle(), test_color());
        assert!(!store.begin_load(0));
        assert!(store.handle(0).is_some());
    }

    #[test]
    fn out_of_range_requests_are_rejected() {
        let mut store = PageStore::new(2);
        assert!(!store.begin_load(2));
        assert_eq!(store.state(99), SlotState::Unloaded);
    }

    #[test]
    fn eviction_keeps_the_window_around_the_center() {
        let mut store = PageStore::new(100);
        for index in 0..100 {
            assert!(store.begin_load(index));
            store.finish_load(index, test_handle(), test_color());
        }
        store.evict_distant(50, 5);
        for index in 0..100 {
            let expected = if (45..=55).contains(&index) {
                SlotState::Loaded
            } else {
                SlotState::Unloaded
            };
            assert_eq!(store.state(index), expected, "page {index}");
        }
    }

    #[test]
    fn eviction_leaves_loading_slots_alone() {
        let mut store = PageStore::new(20);
        assert!(store.begin_load(0));
        store.evict_distant(15, 5);
        assert_eq!(store.state(0), SlotState::Loading);
    }

    #[test]
    fn edge_colors_survive_eviction() {
        let mut store = PageStore::new(20);
        assert!(store.begin_load(0));
        store.finish_load(0, test_handle(), test_color());
        store.evict_distant(15, 5);
        assert_eq!(store.state(0), SlotState::Unloaded);
        assert!(store.handle(0).is_none());
        assert_eq!(store.edge_color(0), Some(test_color()));
    }

    #[test]
    fn late_completion_after_teardown_of_slot_is_dropped() {
        let mut store = PageStore::new(2);
        store.finish_load(0, test_handle(), test_color());
        assert_eq!(store.state(0), SlotState::Unloaded);
        assert!(store.handle(0).is_none());
    }

    #[test]
    fn edge_color_of_uniform_image_is_that_color() {
        let image = RgbaImage::from_pixel(40, 60, Rgba([10, 20, 30, 255]));
        let color = edge_color_of(&DynamicImage::ImageRgba8(image));
        assert_eq!(
            color,
            EdgeColor {
                r: 10,
                g: 20,
                b: 30
            }
        );
    }

    #[test]
    fn edge_color_of_ignores_the_interior() {
        // Red border, blue interior: only the border should count.
        let mut image = RgbaImage::from_pixel(50, 50, Rgba([0, 0, 255, 255]));
        for x in 0..50 {
            image.put_pixel(x, 0, Rgba([255, 0, 0, 255]));
            image.put_pixel(x, 49, Rgba([255, 0, 0, 255]));
        }
        for y in 0..50 {
            image.put_pixel(0, y, Rgba([255, 0, 0, 255]));
            image.put_pixel(49, y, Rgba([255, 0, 0, 255]));
        }
        let color = edge_color_of(&DynamicImage::ImageRgba8(image));
        assert_eq!(
            color,
            EdgeColor {
                r: 255,
                g: 0,
                b: 0
            }
        );
    }

    #[test]
    fn edge_color_of_single_pixel_image() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([7, 8, 9, 255]));
        let color = edge_color_of(&DynamicImage::ImageRgba8(image));
        assert_eq!(color, EdgeColor { r: 7, g: 8, b: 9 });
    }
}
