//! Block stacking model and edit history.
//!
//! Blocks are unit cubes stacked in columns on an integer ground grid.
//! A block placed on column (x, z) rests on top of the current stack, so
//! centers land on (x, height + 0.5, z). Edits are recorded as actions with
//! an applied-count cursor so they can be undone and redone.

/// A position in world units.
pub type Point = (f32, f32, f32);

/// Edge length of a block.
pub const BLOCK_SIZE: f32 = 1.0;

/// A unit cube, identified solely by its center position.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Block {
    pub center: Point,
}

/// A recorded edit action.
#[derive(Clone, Copy, Debug)]
pub enum Action {
    /// A block placed with this center.
    Place(Point),
}

/// The current block structure plus its edit history.
///
/// `applied` is the undo cursor: `history[..applied]` is reflected in
/// `blocks`, `history[applied..]` is the redo tail.
#[derive(Default)]
pub struct World {
    blocks: Vec<Block>,
    history: Vec<Action>,
    applied: usize,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a world from bare block centers, e.g. a loaded scene.
    ///
    /// Each block gets its own history entry so undo keeps working after a
    /// scene is loaded.
    pub fn from_centers(centers: impl IntoIterator<Item = Point>) -> Self {
        let mut world = Self::new();
        for center in centers {
            world.push_place(center);
        }
        world
    }

    /// The immutable block snapshot handed to graph construction.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks stacked on the column at (x, z).
    pub fn stack_height(&self, x: i32, z: i32) -> u32 {
        // column centers are exact integer floats, so equality is exact
        let (fx, fz) = (x as f32, z as f32);
        self.blocks
            .iter()
            .filter(|block| block.center.0 == fx && block.center.2 == fz)
            .count() as u32
    }

    /// Places a block on top of the column at (x, z) and returns its center.
    ///
    /// Any redo tail beyond the current history position is discarded.
    pub fn place_at(&mut self, x: i32, z: i32) -> Point {
        let height = self.stack_height(x, z);
        let center = (
            x as f32,
            height as f32 * BLOCK_SIZE + BLOCK_SIZE / 2.0,
            z as f32,
        );
        self.history.truncate(self.applied);
        self.push_place(center);
        center
    }

    fn push_place(&mut self, center: Point) {
        self.blocks.push(Block { center });
        self.history.push(Action::Place(center));
        self.applied = self.history.len();
    }

    /// Reverts the most recently applied action.
    ///
    /// Returns false when there is nothing left to undo.
    pub fn undo(&mut self) -> bool {
        if self.applied == 0 {
            return false;
        }
        self.applied -= 1;
        match self.history[self.applied] {
            Action::Place(_) => {
                self.blocks.pop();
            }
        }
        true
    }

    /// Re-applies the next undone action.
    ///
    /// Returns false when there is nothing left to redo.
    pub fn redo(&mut self) -> bool {
        if self.applied == self.history.len() {
            return false;
        }
        match self.history[self.applied] {
            Action::Place(center) => self.blocks.push(Block { center }),
        }
        self.applied += 1;
        true
    }
}

/// Formats the world as a column height map.
///
/// Rows run from the farthest z to the nearest, columns left to right in x.
/// Empty columns show as '.', heights 10 and above as hex letters.
pub fn format_heights(world: &World) -> String {
    if world.blocks().is_empty() {
        return String::from("(no blocks)\n");
    }

    let columns: Vec<(i32, i32)> = world
        .blocks()
        .iter()
        .map(|block| (block.center.0.round() as i32, block.center.2.round() as i32))
        .collect();
    let min_x = columns.iter().map(|&(x, _)| x).min().unwrap();
    let max_x = columns.iter().map(|&(x, _)| x).max().unwrap();
    let min_z = columns.iter().map(|&(_, z)| z).min().unwrap();
    let max_z = columns.iter().map(|&(_, z)| z).max().unwrap();

    let mut output = String::new();
    for z in (min_z..=max_z).rev() {
        for x in min_x..=max_x {
            let height = world.stack_height(x, z);
            let display_char = if height == 0 {
                '.'
            } else if height < 10 {
                char::from(b'0' + height as u8)
            } else {
                char::from(b'A' + height as u8 - 10)
            };
            output.push(display_char);
        }
        output.push('\n');
    }

    output
}
