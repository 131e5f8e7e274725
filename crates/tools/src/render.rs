//! Text renderings of a generated dungeon for terminals and logs.

use dungeon::{DungeonConfig, GeneratedDungeon, TileCode, TileGrid};

pub fn glyph(tile: TileCode) -> char {
    match tile {
        TileCode::Floor => '.',
        TileCode::Background => ' ',
        TileCode::WallTop | TileCode::WallBottom => '-',
        TileCode::WallLeft | TileCode::WallRight => '|',
        TileCode::CornerTopLeft
        | TileCode::CornerTopRight
        | TileCode::CornerBottomLeft
        | TileCode::CornerBottomRight => '+',
        TileCode::InnerTopLeft
        | TileCode::InnerTopRight
        | TileCode::InnerBottomLeft
        | TileCode::InnerBottomRight => '*',
        TileCode::BowtieTopRightBottomLeft | TileCode::BowtieTopLeftBottomRight => 'x',
    }
}

/// One line per grid row, trailing background trimmed.
pub fn render_ascii(grid: &TileGrid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in grid.rows() {
        let line: String = row.iter().copied().map(glyph).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Sprite indices into a `tileset_width`-wide atlas, space separated, one line per row.
pub fn render_atlas(grid: &TileGrid, tileset_width: u32) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        let indices: Vec<String> =
            row.iter().map(|tile| tile.atlas_index(tileset_width).to_string()).collect();
        out.push_str(&indices.join(" "));
        out.push('\n');
    }
    out
}

pub fn summary(dungeon: &GeneratedDungeon, config: &DungeonConfig) -> String {
    let bounds = dungeon.bounds();
    let grid = dungeon.tiles();
    format!(
        "seed: {}\nrooms: {}\ncorridors: {}\nseparation passes: {}\n\
         bounds: left {} top {} right {} bottom {} ({}x{})\npixels: {}x{}\n\
         floor tiles: {}\nfingerprint: {:#018x}\n",
        dungeon.seed,
        dungeon.rooms().len(),
        dungeon.corridors().len(),
        dungeon.separation_iterations,
        bounds.left,
        bounds.top,
        bounds.right,
        bounds.bottom,
        grid.width(),
        grid.height(),
        grid.width() as u64 * u64::from(config.tile_size),
        grid.height() as u64 * u64::from(config.tile_size),
        grid.count(TileCode::Floor),
        dungeon.fingerprint(),
    )
}
