//! 3D viewing and editing of block scenes using kiss3d.

use kiss3d::prelude::*;

use stackpath::graph::build_graph;
use stackpath::solver::all_shortest_paths;
use stackpath::world::{Point, World, BLOCK_SIZE};

/// Fill color for placed blocks.
fn block_color() -> Color {
    Color::new(0.55, 0.36, 0.17, 1.0) // wood brown
}

/// Highlight color for the currently shown shortest path.
fn path_color() -> Color {
    Color::new(1.0, 0.85, 0.1, 1.0)
}

/// Adds one rendered cube per block and returns the scene nodes.
///
/// Cubes render slightly smaller than a full block so the seams between
/// stacked blocks stay visible.
fn build_blocks(scene: &mut SceneNode3d, world: &World) -> Vec<SceneNode3d> {
    const BLOCK_SCALE: f32 = 0.95;
    let size = BLOCK_SIZE * BLOCK_SCALE;

    world
        .blocks()
        .iter()
        .map(|block| {
            let (x, y, z) = block.center;
            scene
                .add_cube(size, size, size)
                .set_color(block_color())
                .set_position(Vec3::new(x, y, z))
        })
        .collect()
}

/// Adds the endpoint markers: yellow for A, cyan for B.
fn build_markers(scene: &mut SceneNode3d, a: Point, b: Point) -> Vec<SceneNode3d> {
    const MARKER_SIZE: f32 = 0.18;
    let marker = |scene: &mut SceneNode3d, point: Point, color: Color| {
        scene
            .add_cube(MARKER_SIZE, MARKER_SIZE, MARKER_SIZE)
            .set_color(color)
            .set_position(Vec3::new(point.0, point.1, point.2))
    };

    vec![
        marker(scene, a, Color::new(1.0, 0.8, 0.0, 1.0)),
        marker(scene, b, Color::new(0.0, 0.8, 1.0, 1.0)),
    ]
}

/// Adds the highlighted path: a small cube on each corner and a thin box
/// along each edge.
///
/// Path edges are axis-aligned cube edges, so a stretched box follows them
/// exactly without any rotation.
fn build_path(scene: &mut SceneNode3d, path: &[Point]) -> Vec<SceneNode3d> {
    const CORNER_SIZE: f32 = 0.12;
    const EDGE_THICKNESS: f32 = 0.06;

    let mut nodes = Vec::new();
    for &(x, y, z) in path {
        nodes.push(
            scene
                .add_cube(CORNER_SIZE, CORNER_SIZE, CORNER_SIZE)
                .set_color(path_color())
                .set_position(Vec3::new(x, y, z)),
        );
    }
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        nodes.push(
            scene
                .add_cube(
                    (a.0 - b.0).abs().max(EDGE_THICKNESS),
                    (a.1 - b.1).abs().max(EDGE_THICKNESS),
                    (a.2 - b.2).abs().max(EDGE_THICKNESS),
                )
                .set_color(path_color())
                .set_position(Vec3::new(
                    (a.0 + b.0) / 2.0,
                    (a.1 + b.1) / 2.0,
                    (a.2 + b.2) / 2.0,
                )),
        );
    }

    nodes
}

fn path_title(index: usize, paths: &[Vec<Point>]) -> String {
    format!(
        "Path {}/{} - distance {} - [Left/Right] navigate",
        index + 1,
        paths.len(),
        paths[index].len() - 1
    )
}

fn initial_title(world: &World, paths: &[Vec<Point>], editable: bool) -> String {
    if editable {
        format!(
            "stackpath editor - {} blocks - [WASD] move, [Space] place, [U/Y] undo/redo",
            world.blocks().len()
        )
    } else if paths.is_empty() {
        format!("stackpath - {} blocks", world.blocks().len())
    } else {
        path_title(0, paths)
    }
}

/// Displays the scene; with endpoints, also the shortest paths between them.
pub fn display(world: World, endpoints: Option<(Point, Point)>) {
    pollster::block_on(run(world, endpoints, false));
}

/// Opens the scene in the interactive editor and returns the edited world.
pub fn edit(world: World) -> World {
    pollster::block_on(run(world, None, true))
}

async fn run(mut world: World, endpoints: Option<(Point, Point)>, editable: bool) -> World {
    // the graph is rebuilt per query; the viewed scene never changes, so one
    // enumeration up front covers the whole session
    let paths = match endpoints {
        Some((a, b)) => all_shortest_paths(&build_graph(world.blocks()), a, b),
        None => Vec::new(),
    };
    if endpoints.is_some() && paths.is_empty() {
        println!("No shortest paths: selection is off the structure or not connected");
    }

    let mut window = Window::new(&initial_title(&world, &paths, editable)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(12.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(150.0))
        .set_position(Vec3::new(8.0, 12.0, 8.0));

    let mut block_nodes = build_blocks(&mut scene, &world);

    // markers stay in the scene for the whole session
    let _marker_nodes = match endpoints {
        Some((a, b)) => build_markers(&mut scene, a, b),
        None => Vec::new(),
    };

    let mut current_path: usize = 0;
    let mut path_nodes = match paths.first() {
        Some(path) => build_path(&mut scene, path),
        None => Vec::new(),
    };

    // ghost cursor showing where the next block would land
    let (mut cursor_x, mut cursor_z) = (0i32, 0i32);
    let mut ghost = if editable {
        Some(
            scene
                .add_cube(BLOCK_SIZE, BLOCK_SIZE, BLOCK_SIZE)
                .set_color(Color::new(0.3, 1.0, 0.3, 0.4))
                .set_position(Vec3::new(0.0, BLOCK_SIZE / 2.0, 0.0)),
        )
    } else {
        None
    };

    let mut blocks_changed = false;
    let mut path_changed = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Left if !paths.is_empty() => {
                            current_path =
                                current_path.checked_sub(1).unwrap_or(paths.len() - 1);
                            path_changed = true;
                        }
                        Key::Right if !paths.is_empty() => {
                            current_path = (current_path + 1) % paths.len();
                            path_changed = true;
                        }
                        Key::W if editable => cursor_z -= 1,
                        Key::S if editable => cursor_z += 1,
                        Key::A if editable => cursor_x -= 1,
                        Key::D if editable => cursor_x += 1,
                        Key::Space if editable => {
                            world.place_at(cursor_x, cursor_z);
                            blocks_changed = true;
                        }
                        Key::U if editable => {
                            if world.undo() {
                                blocks_changed = true;
                            }
                        }
                        Key::Y if editable => {
                            if world.redo() {
                                blocks_changed = true;
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        if blocks_changed {
            for mut node in block_nodes.drain(..) {
                node.remove();
            }
            block_nodes = build_blocks(&mut scene, &world);
            window.set_title(&format!(
                "stackpath editor - {} blocks - [WASD] move, [Space] place, [U/Y] undo/redo",
                world.blocks().len()
            ));
            blocks_changed = false;
        }

        if path_changed {
            for mut node in path_nodes.drain(..) {
                node.remove();
            }
            path_nodes = build_path(&mut scene, &paths[current_path]);
            window.set_title(&path_title(current_path, &paths));
            path_changed = false;
        }

        if let Some(ghost) = &mut ghost {
            let height = world.stack_height(cursor_x, cursor_z);
            ghost.set_position(Vec3::new(
                cursor_x as f32,
                height as f32 * BLOCK_SIZE + BLOCK_SIZE / 2.0,
                cursor_z as f32,
            ));
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }

    world
}
