//! # Task Management System
//!
//! Runs cell filling and cell meshing on a pool of worker threads.
//!
//! ## Architecture Overview
//! - `TaskManager`: Distributes tasks to workers and collects their results
//! - `Task`: A unit of work executed on a worker
//! - `TaskResult`: The result of a completed task, which can spawn additional tasks
//! - `TaskChannel`: Communication channel between the coordinator and one worker
//! - `TaskContext`: Shared state handed to results so they can spawn follow-ups
//!
//! ## Task Lifecycle
//! 1. Tasks are created and published via `TaskManager::publish_task()`
//! 2. The manager hands tasks to idle workers round-robin, queueing the rest
//! 3. Workers process tasks and send back results
//! 4. Results are handled on the coordinating thread in `process_completed_tasks()`
//! 5. Results can store a cell mesh or spawn new tasks
//! 6. The cycle continues until all work is complete
//!
//! ## Example Usage
//! ```rust
//! use std::sync::Arc;
//! use cgmath::Point3;
//! use terrain_mesh::{
//!     config::TerrainConfig,
//!     core::MtResource,
//!     map::{tasks::CellGenerationTask, world::World},
//!     rendering::{AtlasRect, CellMeshStore, TileMeshCache},
//!     task_management::{TaskContext, TaskManager},
//! };
//!
//! let context = TaskContext {
//!     world: MtResource::new(World::new(TerrainConfig::default())),
//!     cache: Arc::new(TileMeshCache::new()),
//!     detail_level: 2,
//!     atlas: AtlasRect::FULL,
//! };
//! let mut task_manager = TaskManager::new(2, context.clone());
//! let mut store = CellMeshStore::new();
//!
//! task_manager.publish_task(Box::new(CellGenerationTask::new(
//!     context.world.clone(),
//!     Point3::new(0, 0, 0),
//! )));
//! task_manager.run_until_idle(&mut store);
//!
//! assert!(store.get(Point3::new(0, 0, 0)).is_some());
//! ```

pub mod task;

use std::{
    collections::VecDeque,
    sync::{
        mpsc::{channel, Receiver, Sender, TryRecvError},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, info, warn};

use crate::{
    core::MtResource,
    map::world::World,
    rendering::{AtlasRect, CellMeshStore, TileMeshCache},
};

pub use task::{Task, TaskResult};

/// Shared state results need when spawning follow-up tasks.
#[derive(Clone)]
pub struct TaskContext {
    /// Cells filled so far
    pub world: MtResource<World>,
    /// The tile mesh cache every meshing task shares
    pub cache: Arc<TileMeshCache>,
    /// Detail level cells are meshed at
    pub detail_level: u8,
    /// Atlas rectangle applied to every finalized face
    pub atlas: AtlasRect,
}

/// A communication channel between the coordinator and one worker thread.
///
/// # Fields
/// - `task_sender`: Sends tasks to the worker
/// - `result_receiver`: Receives task results from the worker
/// - `num_tasks_in_flight`: Tasks sent but whose result has not been received
/// - `disconnected`: The worker has exited and takes no more tasks
/// - `worker`: Handle to the worker thread
#[derive(Debug)]
pub struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    disconnected: bool,
    worker: JoinHandle<()>,
}

impl TaskChannel {
    /// Marks the worker as gone and returns how many of its tasks were lost.
    fn disconnect(&mut self, channel_idx: usize) -> usize {
        if self.disconnected {
            return 0;
        }
        let lost = self.num_tasks_in_flight;
        warn!(
            "Worker {} disconnected with {} tasks in flight",
            channel_idx, lost
        );
        self.disconnected = true;
        self.num_tasks_in_flight = 0;
        lost
    }
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// # Fields
/// - `channels`: One channel per worker
/// - `queued_tasks`: Tasks waiting for an available worker
/// - `current_channel`: Index for round-robin scheduling
/// - `context`: Shared state passed to every result
/// - `lost_tasks`: Tasks whose worker exited before returning a result
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
    context: TaskContext,
    lost_tasks: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

/// How long `run_until_idle` sleeps when no result is ready.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(1);

impl TaskManager {
    /// Creates a new `TaskManager` with the specified number of worker threads.
    ///
    /// # Arguments
    /// * `num_workers` - Number of worker threads to create
    /// * `context` - Shared state passed to every task result
    ///
    /// # Panics
    /// Panics if the underlying thread creation fails.
    pub fn new(num_workers: usize, context: TaskContext) -> Self {
        let mut channels = Vec::with_capacity(num_workers);

        for _ in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let worker = thread::spawn(move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            });

            channels.push(TaskChannel {
                task_sender: task_tx,
                result_receiver: result_rx,
                num_tasks_in_flight: 0,
                disconnected: false,
                worker,
            });
        }

        info!("Started {} mesh workers", num_workers);

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
            context,
            lost_tasks: 0,
        }
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// # Returns
    /// - `Ok(())` if the task was sent
    /// - `Err(task)` if the worker has gone away, so the task can be requeued
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        match self.channels[channel_idx].task_sender.send(task) {
            Ok(_) => {
                self.channels[channel_idx].num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => {
                self.lost_tasks += self.channels[channel_idx].disconnect(channel_idx);
                Err(task.0)
            }
        }
    }

    /// Finds a worker that can accept a task, round-robin from the last used.
    fn find_available_channel(&self) -> Option<usize> {
        if self.channels.is_empty() {
            return None;
        }

        let start_channel = self.current_channel;
        let mut current = start_channel;

        loop {
            let channel = &self.channels[current];
            if !channel.disconnected && channel.num_tasks_in_flight < MAX_TASKS_IN_FLIGHT {
                return Some(current);
            }
            current = (current + 1) % self.channels.len();
            if current == start_channel {
                return None;
            }
        }
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `true` if the task was handed to a worker
    /// - `false` if it was queued because all workers are busy
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> bool {
        match self.find_available_channel() {
            Some(channel_idx) => match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    true
                }
                Err(task) => {
                    self.queued_tasks.push_back(task);
                    false
                }
            },
            None => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Hands queued tasks to workers until the queue is empty or all are busy.
    pub fn process_queued_tasks(&mut self) {
        while let Some(channel_idx) = self.find_available_channel() {
            let Some(task) = self.queued_tasks.pop_front() else {
                break;
            };
            match self.try_send_task(task, channel_idx) {
                Ok(_) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                // the dead worker is skipped from now on
                Err(task) => self.queued_tasks.push_front(task),
            }
        }
    }

    /// Handles every result the workers have sent back so far.
    ///
    /// A worker that has exited, for instance because a task panicked, is taken
    /// out of rotation and the tasks it still held are counted as lost.
    ///
    /// # Arguments
    /// * `store` - Where finished cell meshes are kept
    ///
    /// # Returns
    /// Number of results handled
    pub fn process_completed_tasks(&mut self, store: &mut CellMeshStore) -> usize {
        let mut tasks_to_queue = Vec::new();
        let mut handled = 0;

        for (channel_idx, channel) in self.channels.iter_mut().enumerate() {
            loop {
                match channel.result_receiver.try_recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight -= 1;
                        handled += 1;
                        tasks_to_queue.extend(result.handle_result(&self.context, store));
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.lost_tasks += channel.disconnect(channel_idx);
                        break;
                    }
                }
            }
        }

        for task in tasks_to_queue {
            self.publish_task(task);
        }

        handled
    }

    /// Number of tasks handed to workers and not yet completed.
    pub fn tasks_in_flight(&self) -> usize {
        self.channels.iter().map(|c| c.num_tasks_in_flight).sum()
    }

    /// Number of tasks waiting for a worker.
    pub fn queued_task_count(&self) -> usize {
        self.queued_tasks.len()
    }

    /// Number of tasks dropped because their worker exited before finishing.
    pub fn lost_task_count(&self) -> usize {
        self.lost_tasks
    }

    /// Number of workers still accepting tasks.
    pub fn live_worker_count(&self) -> usize {
        self.channels.iter().filter(|c| !c.disconnected).count()
    }

    /// Whether there is no queued or running work.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty() && self.tasks_in_flight() == 0
    }

    /// Drives the pool until every task, including follow-ups, has completed.
    ///
    /// # Returns
    /// Number of results handled
    pub fn run_until_idle(&mut self, store: &mut CellMeshStore) -> usize {
        let mut handled = 0;
        loop {
            let completed = self.process_completed_tasks(store);
            self.process_queued_tasks();
            handled += completed;

            if self.is_idle() {
                break;
            }
            if self.live_worker_count() == 0 {
                warn!(
                    "{} tasks queued with no workers to run them",
                    self.queued_tasks.len()
                );
                break;
            }
            if completed == 0 {
                thread::sleep(IDLE_POLL_INTERVAL);
            }
        }
        if self.lost_tasks > 0 {
            warn!("{} tasks lost to exited workers", self.lost_tasks);
        }
        debug!("Task pool idle after {} results", handled);
        handled
    }

    /// Stops the workers once their current task is done and waits for them.
    ///
    /// Queued tasks are dropped.
    pub fn shutdown(self) {
        let workers: Vec<JoinHandle<()>> = self
            .channels
            .into_iter()
            .map(|channel| {
                drop(channel.task_sender);
                channel.worker
            })
            .collect();

        for worker in workers {
            if worker.join().is_err() {
                warn!("A mesh worker panicked");
            }
        }
    }
}
