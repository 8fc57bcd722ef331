//! Level descriptors


use super::entity::ImageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LevelId {
    One,
    Two,
    Three,
}

impl LevelId {
    pub fn descriptor(&self) -> &'static Level {
        match self {
            LevelId::One => &LEVEL_1,
            LevelId::Two => &LEVEL_2,
            LevelId::Three => &LEVEL_3,
        }
    }
}

/// Immutable art and naming for one level
#[derive(Debug, PartialEq, Eq)]
pub struct Level {
    pub id: LevelId,
    /// Banner headline, e.g. "Level 2"
    pub title: &'static str,
    /// Banner subtitle, e.g. "SKY"
    pub name: &'static str,
    pub background: ImageId,
    pub obstacles: &'static [ImageId],
    /// Static decoration in the top-right corner
    pub sun: Option<ImageId>,
    /// Overlay that scrolls with the background
    pub clouds: Option<ImageId>,
    pub banner: ImageId,
}

pub static LEVEL_1: Level = Level {
    id: LevelId::One,
    title: "Level 1",
    name: "SPACE",
    background: ImageId::Space,
    obstacles: &[ImageId::Asteroid],
    sun: None,
    clouds: None,
    banner: ImageId::Level1Banner,
};

pub static LEVEL_2: Level = Level {
    id: LevelId::Two,
    title: "Level 2",
    name: "SKY",
    background: ImageId::Sky,
    obstacles: &[ImageId::Bird1, ImageId::Bird2, ImageId::Bird3],
    sun: Some(ImageId::Sun),
    clouds: Some(ImageId::Clouds),
    banner: ImageId::Level2Banner,
};

pub static LEVEL_3: Level = Level {
    id: LevelId::Three,
    title: "Level 3",
    name: "CITY",
    background: ImageId::City,
    obstacles: &[ImageId::Balloon],
    sun: None,
    clouds: None,
    banner: ImageId::Level3Banner,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_level_has_obstacles() {
        for id in [LevelId::One, LevelId::Two, LevelId::Three] {
            let level = id.descriptor();
            assert_eq!(level.id, id);
            assert!(!level.obstacles.is_empty());
        }
    }

    #[test]
    fn test_only_sky_has_decorations() {
        assert!(LEVEL_1.sun.is_none());
        assert_eq!(LEVEL_2.sun, Some(ImageId::Sun));
        assert_eq!(LEVEL_2.clouds, Some(ImageId::Clouds));
        assert!(LEVEL_3.clouds.is_none());
    }
}
