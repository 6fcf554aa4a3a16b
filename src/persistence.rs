//! File I/O for saving and loading block scenes.
//!
//! Binary format for `scene.bin` (little endian):
//! - u32: block count
//! - repeat per block: 3 x f32 (x, y, z center)

use std::fs::File;
use std::io::{Read, Write};

use crate::world::{format_heights, Point, World};

const SCENE_BIN: &str = "scene.bin";
const SCENE_TXT: &str = "scene.txt";

/// Saves the scene to both binary and text files.
pub fn save(world: &World) -> std::io::Result<()> {
    save_text(world)?;
    save_binary(world)?;
    Ok(())
}

/// Saves the scene as a human-readable column height map.
fn save_text(world: &World) -> std::io::Result<()> {
    let mut file = File::create(SCENE_TXT)?;
    writeln!(file, "{} blocks:", world.blocks().len())?;
    write!(file, "{}", format_heights(world))?;
    Ok(())
}

/// Saves the scene in compact binary format for fast loading.
fn save_binary(world: &World) -> std::io::Result<()> {
    let mut file = File::create(SCENE_BIN)?;

    file.write_all(&(world.blocks().len() as u32).to_le_bytes())?;
    for block in world.blocks() {
        let (x, y, z) = block.center;
        file.write_all(&x.to_le_bytes())?;
        file.write_all(&y.to_le_bytes())?;
        file.write_all(&z.to_le_bytes())?;
    }

    Ok(())
}

/// Loads the scene from the binary file.
///
/// The loaded world gets one history entry per block, so undo picks up
/// where the saved session left off. Returns `None` when the file is
/// missing or truncated.
pub fn load() -> Option<World> {
    let mut file = File::open(SCENE_BIN).ok()?;
    let mut u32_buffer = [0u8; 4];

    file.read_exact(&mut u32_buffer).ok()?;
    let block_count = u32::from_le_bytes(u32_buffer) as usize;

    let mut centers: Vec<Point> = Vec::with_capacity(block_count);
    for _ in 0..block_count {
        let mut f32_buffer = [0u8; 4];
        let mut coords = [0.0f32; 3];
        for coord in &mut coords {
            file.read_exact(&mut f32_buffer).ok()?;
            *coord = f32::from_le_bytes(f32_buffer);
        }
        centers.push((coords[0], coords[1], coords[2]));
    }

    Some(World::from_centers(centers))
}
