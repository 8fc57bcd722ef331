//! Pixel masks for precise sprite collision
//!
//! A mask is one bit per pixel of a sprite image: set where the image is
//! opaque. Two sprites collide only when their masks share a set pixel at the
//! same screen position, so transparent corners never count as hits.

use std::collections::HashMap;

use glam::IVec2;

use super::entity::ImageId;
use crate::consts::*;

/// One bit per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    /// Build a mask by evaluating `solid` at every pixel
    pub fn from_fn(width: i32, height: i32, solid: impl Fn(i32, i32) -> bool) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(solid(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Every pixel solid
    pub fn filled(width: i32, height: i32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Ellipse inscribed in the `width` x `height` box
    pub fn ellipse(width: i32, height: i32) -> Self {
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let dx = (x as f32 + 0.5 - rx) / rx;
            let dy = (y as f32 + 0.5 - ry) / ry;
            dx * dx + dy * dy <= 1.0
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Solid test; out of bounds is never solid
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// First overlapping pixel (in this mask's coordinates) when `other` is
    /// placed at `offset` relative to this mask's top-left corner.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width).min(self.width);
        let y1 = (offset.y + other.height).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }
}

/// Collision masks for every sprite image
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    masks: HashMap<ImageId, Mask>,
}

impl Default for SpriteSheet {
    /// Built-in silhouettes matching the sprite sizes
    fn default() -> Self {
        let mut sheet = Self::empty();

        let astronaut = astronaut_mask();
        sheet.insert(ImageId::AstroLeft, astronaut.clone());
        sheet.insert(ImageId::AstroRight, astronaut);

        sheet.insert(
            ImageId::Asteroid,
            Mask::ellipse(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        );
        for bird in [ImageId::Bird1, ImageId::Bird2, ImageId::Bird3] {
            sheet.insert(bird, bird_mask());
        }
        sheet.insert(ImageId::Balloon, balloon_mask());

        sheet
    }
}

impl SpriteSheet {
    pub fn empty() -> Self {
        Self {
            masks: HashMap::new(),
        }
    }

    /// Register or replace the mask for an image
    pub fn insert(&mut self, image: ImageId, mask: Mask) {
        self.masks.insert(image, mask);
    }

    pub fn mask(&self, image: ImageId) -> Option<&Mask> {
        self.masks.get(&image)
    }
}

/// Helmet on top of a narrower suit
fn astronaut_mask() -> Mask {
    let head = 22;
    Mask::from_fn(PLAYER_WIDTH, PLAYER_HEIGHT, |x, y| {
        let cx = PLAYER_WIDTH as f32 / 2.0;
        if y < head {
            let r = head as f32 / 2.0;
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - r;
            dx * dx + dy * dy <= r * r
        } else {
            (3..PLAYER_WIDTH - 3).contains(&x)
        }
    })
}

/// Wide body with wings through the middle third
fn bird_mask() -> Mask {
    let body = Mask::ellipse(OBSTACLE_WIDTH / 2, OBSTACLE_HEIGHT / 2);
    let ox = OBSTACLE_WIDTH / 4;
    let oy = OBSTACLE_HEIGHT / 4;
    Mask::from_fn(OBSTACLE_WIDTH, OBSTACLE_HEIGHT, |x, y| {
        let wing = (OBSTACLE_HEIGHT / 3..OBSTACLE_HEIGHT / 2).contains(&y);
        wing || body.get(x - ox, y - oy)
    })
}

/// Round envelope with a one-pixel string hanging below it
fn balloon_mask() -> Mask {
    let envelope = Mask::ellipse(OBSTACLE_WIDTH, OBSTACLE_WIDTH);
    Mask::from_fn(OBSTACLE_WIDTH, OBSTACLE_HEIGHT, |x, y| {
        if y < OBSTACLE_WIDTH {
            envelope.get(x, y)
        } else {
            x == OBSTACLE_WIDTH / 2
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_overlap_at_corner() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(10, 10);
        assert_eq!(a.overlap(&b, IVec2::new(9, 9)), Some(IVec2::new(9, 9)));
        assert_eq!(a.overlap(&b, IVec2::new(10, 0)), None);
        assert_eq!(a.overlap(&b, IVec2::new(-10, 0)), None);
    }

    #[test]
    fn test_ellipse_corners_are_transparent() {
        let m = Mask::ellipse(50, 80);
        assert!(!m.get(0, 0));
        assert!(!m.get(49, 79));
        assert!(m.get(25, 40));
    }

    #[test]
    fn test_ellipses_touching_boxes_do_not_collide() {
        // Bounding boxes overlap at the corners only; ellipses stay apart
        let a = Mask::ellipse(50, 80);
        let b = Mask::ellipse(50, 80);
        assert!(a.overlap(&b, IVec2::new(45, 75)).is_none());
        assert!(a.overlap(&b, IVec2::new(10, 10)).is_some());
    }

    #[test]
    fn test_default_sheet_covers_sprites() {
        let sheet = SpriteSheet::default();
        for id in [
            ImageId::AstroLeft,
            ImageId::AstroRight,
            ImageId::Asteroid,
            ImageId::Bird1,
            ImageId::Bird2,
            ImageId::Bird3,
            ImageId::Balloon,
        ] {
            let mask = sheet.mask(id).expect("sprite mask");
            assert!(mask.count() > 0, "{id:?} mask is empty");
        }
        assert!(sheet.mask(ImageId::Space).is_none());
    }

    #[test]
    fn test_balloon_string_is_thin() {
        let m = balloon_mask();
        assert!(m.get(OBSTACLE_WIDTH / 2, OBSTACLE_HEIGHT - 1));
        assert!(!m.get(OBSTACLE_WIDTH / 2 + 1, OBSTACLE_HEIGHT - 1));
    }
}
