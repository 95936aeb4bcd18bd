/// Integration tests for filling and meshing cells on the worker pool
use std::{
    sync::{mpsc, Arc},
    thread,
    time::Duration,
};

use cgmath::Point3;
use terrain_mesh::{
    config::{MesherConfig, TerrainConfig},
    core::MtResource,
    map::{cell::Cell, tasks::CellGenerationTask, world::World, CELL_EDGE_SIZE},
    mesh_grid,
    rendering::{AtlasRect, CellMesh, CellMeshStore, TileMeshCache},
    task_management::{Task, TaskContext, TaskManager, TaskResult},
};

/// A task whose worker dies while running it
struct PanickingTask;

impl Task for PanickingTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        panic!("cell source unavailable");
    }
}

fn default_context() -> TaskContext {
    TaskContext {
        world: MtResource::new(World::new(TerrainConfig::default())),
        cache: Arc::new(TileMeshCache::new()),
        detail_level: 3,
        atlas: AtlasRect::FULL,
    }
}

fn small_config() -> MesherConfig {
    MesherConfig {
        worker_count: 3,
        detail_level: 2,
        cells_per_axis: 2,
        terrain: TerrainConfig {
            seed: 7,
            ..TerrainConfig::default()
        },
        atlas: AtlasRect::new(0.5, 0.75, 0.25, 0.5),
    }
}

#[test]
fn test_grid_meshes_every_cell() {
    let config = small_config();
    let (store, stats) = mesh_grid(&config).unwrap();

    assert_eq!(store.len(), 4);
    assert!(stats.misses > 0);
    assert!(stats.hits > 0, "neighbouring cubes share face shapes");

    for mesh in store.iter() {
        assert_eq!(mesh.detail_level, 2);
        for v in &mesh.buffer.vertices {
            let [u, t] = v.tex_coords;
            assert!((0.5..=0.75).contains(&u));
            assert!((0.25..=0.5).contains(&t));
        }
    }
}

#[test]
fn test_pool_matches_single_threaded_build() {
    let config = small_config();
    let (store, _) = mesh_grid(&config).unwrap();

    let mut world = World::new(config.terrain.clone());
    let cache = TileMeshCache::new();
    for x in 0..2 {
        for y in 0..2 {
            let position = Point3::new(x, y, 0);
            let cell = world.add_cell_at(position);
            let expected =
                CellMesh::build(&cell.get(), &cache, config.detail_level, &config.atlas).unwrap();
            assert_eq!(store.get(position), Some(&expected));
        }
    }
}

#[test]
fn test_flat_terrain_is_meshed_in_world_space() {
    let cell = Cell::from_heightfield(Point3::new(0, 1, 0), |_, _| 3.5);
    let cache = TileMeshCache::new();
    let mesh = CellMesh::build(&cell, &cache, 0, &AtlasRect::FULL).unwrap();

    let edge = CELL_EDGE_SIZE as f32;
    assert!(mesh.triangle_count() > 0);
    for v in &mesh.buffer.vertices {
        let [x, y, z] = v.position;
        assert!((0.0..=edge).contains(&x));
        assert!((edge..=2.0 * edge).contains(&y));
        assert!((0.0..=4.0).contains(&z));
    }
}

#[test]
fn test_task_manager_runs_follow_up_tasks() {
    let context = default_context();
    let mut task_manager = TaskManager::new(2, context.clone());
    let mut store = CellMeshStore::new();

    for x in 0..3 {
        task_manager.publish_task(Box::new(CellGenerationTask::new(
            context.world.clone(),
            Point3::new(x, 0, 0),
        )));
    }
    // one task per worker, the third waits
    assert_eq!(task_manager.queued_task_count(), 1);

    // three fills plus three meshing follow-ups
    assert_eq!(task_manager.run_until_idle(&mut store), 6);
    assert!(task_manager.is_idle());
    task_manager.shutdown();

    assert_eq!(store.len(), 3);
    assert_eq!(context.world.get().cells.len(), 3);
}

#[test]
fn test_pool_finishes_when_a_worker_dies() {
    let context = default_context();
    let mut task_manager = TaskManager::new(2, context.clone());

    task_manager.publish_task(Box::new(PanickingTask));
    for x in 0..2 {
        task_manager.publish_task(Box::new(CellGenerationTask::new(
            context.world.clone(),
            Point3::new(x, 0, 0),
        )));
    }

    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let mut store = CellMeshStore::new();
        let handled = task_manager.run_until_idle(&mut store);
        let summary = (
            handled,
            task_manager.lost_task_count(),
            task_manager.live_worker_count(),
            task_manager.is_idle(),
            store.len(),
        );
        task_manager.shutdown();
        done_tx.send(summary).unwrap();
    });

    let (handled, lost, live, idle, meshed) = done_rx
        .recv_timeout(Duration::from_secs(30))
        .expect("run_until_idle should return after a worker panics");
    assert_eq!(handled, 4);
    assert_eq!(lost, 1);
    assert_eq!(live, 1);
    assert!(idle);
    assert_eq!(meshed, 2);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = small_config();
    config.detail_level = 9;
    assert!(mesh_grid(&config).is_err());
}
