//! Embedded miniature atlas.
//!
//! Six artworks on a 200 × 200 corner of the canvas over eight half-hour
//! time indices.  Shapes are simple rectangles and one triangle so the areas
//! are easy to check by hand:
//!
//! | id | name             | periods → area                         |
//! |----|------------------|----------------------------------------|
//! | 1  | Flag of France   | 0-3 → 1200, 4-7 (T) → 2400             |
//! | 2  | Tiny Amogus      | 0-7 (T) → 90                           |
//! | 3  | Osu! logo        | 1-5 → 1600                             |
//! | 4  | Void             | 2-4 → 3000                             |
//! | 5  | Pixel Heart      | 3-7 (T) → 450 (triangle)               |
//! | 6  | Broken entry     | "3-x" → rejected, 6-12 → out of range  |

pub const ATLAS_JSON: &str = r#"[
  {
    "id": 1,
    "name": "Flag of France",
    "description": "Tricolour in the top-left corner",
    "path": {
      "0-3": [[0, 0], [40, 0], [40, 30], [0, 30]],
      "4-7, T": [[0, 0], [80, 0], [80, 30], [0, 30]]
    }
  },
  {
    "id": 2,
    "name": "Tiny Amogus",
    "path": { "0-7, T": [[100, 100], [110, 100], [110, 109], [100, 109]] }
  },
  {
    "id": "000003",
    "name": "Osu! logo",
    "path": { "1-5": [[50, 50], [90, 50], [90, 90], [50, 90]] }
  },
  {
    "id": 4,
    "name": "Void",
    "path": { "2-4": [[120, 0], [180, 0], [180, 50], [120, 50]] }
  },
  {
    "id": 5,
    "name": "Pixel Heart",
    "path": { "3-7, T": [[0, 150], [30, 150], [0, 180]] }
  },
  {
    "id": 6,
    "name": "Broken entry",
    "path": {
      "3-x": [[0, 0], [1, 0], [1, 1]],
      "6-12": [[0, 0], [5, 0], [5, 5]]
    }
  }
]"#;

/// 2023-07-20 13:00 UTC onward, one entry every 30 minutes.
pub const TIME_TABLE_CSV: &str = "\
index,unix_secs\n\
0,1689858000\n\
1,1689859800\n\
2,1689861600\n\
3,1689863400\n\
4,1689865200\n\
5,1689867000\n\
6,1689868800\n\
7,1689870600\n\
";
