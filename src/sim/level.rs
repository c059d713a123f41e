//! Built-in level layouts
//!
//! Coordinates are in level-image pixels. The host supplies the image itself;
//! a level only knows where things go on it and which colors block.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::terrain::Palette;
use crate::consts::VIEW_CENTER;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    Plains = 1,
    Desert = 2,
    Snow = 3,
    City = 4,
    Mesa = 5,
    Jungle = 6,
}

impl LevelId {
    pub const ALL: [LevelId; 6] = [
        LevelId::Plains,
        LevelId::Desert,
        LevelId::Snow,
        LevelId::City,
        LevelId::Mesa,
        LevelId::Jungle,
    ];

    pub fn from_number(n: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| *l as u8 == n)
            .ok_or(Error::UnknownLevel(n))
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            LevelId::Plains => "Plains",
            LevelId::Desert => "Desert",
            LevelId::Snow => "Snow",
            LevelId::City => "City",
            LevelId::Mesa => "Mesa",
            LevelId::Jungle => "Jungle",
        }
    }

    /// Asset name the host should load the background from
    pub fn asset(self) -> String {
        format!("Level{}", self as u8)
    }
}

/// Where everything sits on a level image
#[derive(Debug, Clone)]
pub struct Level {
    pub name: &'static str,
    /// Image dimensions in pixels
    pub size: (u32, u32),
    pub start: Vec2,
    pub finish: Vec2,
    pub powerup_spawns: Vec<Vec2>,
    pub palette: Palette,
}

impl Level {
    pub fn builtin(id: LevelId) -> Self {
        let v = Vec2::new;
        let (size, start, finish, powerup_spawns) = match id {
            LevelId::Plains => (
                3200,
                v(654.0, 2478.0),
                v(2143.0, 1855.0),
                vec![v(704.0, 2582.0), v(1400.0, 1485.0), v(1285.0, 1024.0), v(1448.0, 2324.0)],
            ),
            LevelId::Desert => (
                3200,
                v(2475.0, 2415.0),
                v(545.0, 1168.0),
                vec![v(2600.0, 1570.0), v(1616.0, 1425.0), v(1422.0, 1833.0), v(815.0, 1744.0)],
            ),
            LevelId::Snow => (
                3200,
                v(576.0, 942.0),
                v(2120.0, 1015.0),
                vec![v(1408.0, 995.0), v(1456.0, 2002.0), v(1938.0, 1809.0)],
            ),
            LevelId::City => (
                3904,
                v(735.0, 2054.0),
                v(1850.0, 2870.0),
                vec![
                    v(1215.0, 1300.0),
                    v(1915.0, 950.0),
                    v(2810.0, 1983.0),
                    v(2434.0, 2544.0),
                    v(2560.0, 3280.0),
                ],
            ),
            LevelId::Mesa => (
                3200,
                v(1560.0, 1320.0),
                v(1255.0, 630.0),
                vec![
                    v(2306.0, 1027.0),
                    v(1783.0, 1738.0),
                    v(2170.0, 2060.0),
                    v(892.0, 2288.0),
                    v(1088.0, 1032.0),
                ],
            ),
            LevelId::Jungle => (3200, v(1800.0, 2200.0), v(1444.0, 2570.0), vec![]),
        };

        let palette = if id == LevelId::City {
            Palette::city()
        } else {
            Palette::walls()
        };

        Self {
            name: id.name(),
            size: (size, size),
            start,
            finish,
            powerup_spawns,
            palette,
        }
    }

    /// Screen position of the image center that puts `start` under the view center
    pub fn board_origin(&self) -> Vec2 {
        self.half_size() - self.start + VIEW_CENTER
    }

    /// Image coordinates -> screen coordinates for a board at `origin`
    pub fn to_screen(&self, image: Vec2, origin: Vec2) -> Vec2 {
        image - self.half_size() + origin
    }

    fn half_size(&self) -> Vec2 {
        Vec2::new(self.size.0 as f32, self.size.1 as f32) / 2.0
    }
}
