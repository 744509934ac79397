//! Fixed-size screen tiles for parallel ray tracing.

/// Tile edge length in pixels.
pub const TILE_SIZE: u32 = 64;

/// A rectangular region of the canvas, clipped to the image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Tile {
    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }
}

/// Split the canvas into row-major tiles of at most `TILE_SIZE` on a side.
pub fn generate_tiles(width: u32, height: u32) -> Vec<Tile> {
    let mut tiles = Vec::new();
    let mut y = 0;
    while y < height {
        let tile_h = TILE_SIZE.min(height - y);
        let mut x = 0;
        while x < width {
            let tile_w = TILE_SIZE.min(width - x);
            tiles.push(Tile {
                x,
                y,
                width: tile_w,
                height: tile_h,
            });
            x += TILE_SIZE;
        }
        y += TILE_SIZE;
    }
    tiles
}
