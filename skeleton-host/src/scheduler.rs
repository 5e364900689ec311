// SkeletonView Host - Frame Scheduler
//
// Drives a render tree on a tokio interval:
// - Ticks every mounted view at the configured frame rate
// - Publishes composited frames on a bounded channel (drops when full)
// - Applies mount/unmount/redaction commands between frames
// - Shuts down via a oneshot signal; dropping the scheduler cancels the loop

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use skeleton_render::AnimationFrame;
use skeleton_utils::Config;
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::error::{SchedulerError, SchedulerResult};
use crate::render_tree::{BoxedView, NodeId, RenderTree};

/// Configuration for the frame loop
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Target frames per second
    pub fps: u32,

    /// Capacity of the frame channel (bounded to prevent memory growth)
    pub channel_capacity: usize,

    /// Capacity of the command channel
    pub command_capacity: usize,
}

impl SchedulerConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

impl From<&Config> for SchedulerConfig {
    fn from(config: &Config) -> Self {
        Self {
            fps: config.fps,
            ..Default::default()
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            channel_capacity: 8,
            command_capacity: 32,
        }
    }
}

/// Changes to the render tree, applied by the frame loop
enum TreeCommand {
    Mount {
        id: NodeId,
        view: BoxedView,
        origin: (usize, usize),
    },
    Unmount {
        id: NodeId,
        reply: oneshot::Sender<bool>,
    },
    SetRedacted {
        id: NodeId,
        when: bool,
        reply: oneshot::Sender<SchedulerResult<bool>>,
    },
}

/// Counters shared with the frame loop
#[derive(Debug, Default)]
struct FrameStats {
    sent: AtomicU64,
    dropped: AtomicU64,
}

/// Owns the frame loop task and the channels into it.
pub struct FrameScheduler {
    config: SchedulerConfig,

    /// Sender for composited frames
    frame_tx: Sender<AnimationFrame>,

    /// Sender for tree commands while running
    command_tx: Option<Sender<TreeCommand>>,

    /// Channel to signal shutdown
    shutdown_tx: Option<oneshot::Sender<()>>,

    /// Frame loop task; yields the tree back when it ends
    task: Option<JoinHandle<RenderTree>>,

    running: Arc<AtomicBool>,
    stats: Arc<FrameStats>,
}

impl FrameScheduler {
    /// Create a scheduler and the receiver its frames arrive on.
    pub fn new(config: SchedulerConfig) -> (Self, Receiver<AnimationFrame>) {
        let (frame_tx, frame_rx) = mpsc::channel(config.channel_capacity.max(1));

        let scheduler = Self {
            config,
            frame_tx,
            command_tx: None,
            shutdown_tx: None,
            task: None,
            running: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(FrameStats::default()),
        };

        (scheduler, frame_rx)
    }

    /// Spawn the frame loop over `tree`. Must be called inside a tokio runtime.
    pub fn start(&mut self, tree: RenderTree) -> SchedulerResult<()> {
        if self.task.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (command_tx, command_rx) = mpsc::channel(self.config.command_capacity.max(1));
        self.shutdown_tx = Some(shutdown_tx);
        self.command_tx = Some(command_tx);
        self.running.store(true, Ordering::Relaxed);

        log::info!("Frame scheduler started at {} fps", self.config.fps);
        self.task = Some(tokio::spawn(run_loop(
            tree,
            self.config.frame_duration(),
            self.frame_tx.clone(),
            command_rx,
            shutdown_rx,
            Arc::clone(&self.running),
            Arc::clone(&self.stats),
        )));
        Ok(())
    }

    /// Stop the frame loop and take the render tree back.
    pub async fn stop(&mut self) -> SchedulerResult<RenderTree> {
        let task = self.task.take().ok_or(SchedulerError::NotRunning)?;
        self.command_tx = None;
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        let tree = task.await?;
        self.running.store(false, Ordering::Relaxed);
        log::info!(
            "Frame scheduler stopped: {} frames sent, {} dropped",
            self.frames_sent(),
            self.frames_dropped()
        );
        Ok(tree)
    }

    /// Mount a view; it appears on the next frame.
    pub async fn mount(&self, id: NodeId, view: BoxedView, origin: (usize, usize)) -> SchedulerResult<()> {
        self.command_sender()?
            .send(TreeCommand::Mount { id, view, origin })
            .await?;
        Ok(())
    }

    /// Unmount a view, cancelling its animation. Returns whether it was mounted.
    pub async fn unmount(&self, id: NodeId) -> SchedulerResult<bool> {
        let (reply, rx) = oneshot::channel();
        self.command_sender()?
            .send(TreeCommand::Unmount { id, reply })
            .await?;
        Ok(rx.await?)
    }

    /// Re-evaluate a mounted view's redaction condition.
    pub async fn set_redacted(&self, id: NodeId, when: bool) -> SchedulerResult<bool> {
        let (reply, rx) = oneshot::channel();
        self.command_sender()?
            .send(TreeCommand::SetRedacted { id, when, reply })
            .await?;
        rx.await?
    }

    fn command_sender(&self) -> SchedulerResult<&Sender<TreeCommand>> {
        self.command_tx.as_ref().ok_or(SchedulerError::NotRunning)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn frames_sent(&self) -> u64 {
        self.stats.sent.load(Ordering::Relaxed)
    }

    pub fn frames_dropped(&self) -> u64 {
        self.stats.dropped.load(Ordering::Relaxed)
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_loop(
    mut tree: RenderTree,
    period: Duration,
    frame_tx: Sender<AnimationFrame>,
    mut command_rx: Receiver<TreeCommand>,
    mut shutdown_rx: oneshot::Receiver<()>,
    running: Arc<AtomicBool>,
    stats: Arc<FrameStats>,
) -> RenderTree {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = tree.frame_at(Instant::now());
                match frame_tx.try_send(frame) {
                    Ok(()) => {
                        stats.sent.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(TrySendError::Full(_)) => {
                        stats.dropped.fetch_add(1, Ordering::Relaxed);
                        log::warn!("Frame channel full, dropping frame");
                    }
                    Err(TrySendError::Closed(_)) => {
                        log::info!("Frame receiver dropped, stopping frame loop");
                        break;
                    }
                }
            }

            Some(command) = command_rx.recv() => {
                apply_command(&mut tree, command);
            }

            _ = &mut shutdown_rx => {
                break;
            }
        }
    }

    running.store(false, Ordering::Relaxed);
    tree
}

fn apply_command(tree: &mut RenderTree, command: TreeCommand) {
    let now = Instant::now();
    match command {
        TreeCommand::Mount { id, view, origin } => {
            if tree.mount(id, view, origin, now).is_some() {
                log::debug!("Replaced view {}", id);
            }
        }
        TreeCommand::Unmount { id, reply } => {
            let _ = reply.send(tree.unmount(id).is_some());
        }
        TreeCommand::SetRedacted { id, when, reply } => {
            let _ = reply.send(tree.set_redacted(id, when, now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skeleton_render::{Text, ViewExt};

    fn fast_config() -> SchedulerConfig {
        SchedulerConfig {
            fps: 200,
            ..Default::default()
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.fps, 30);
        assert_eq!(config.channel_capacity, 8);
        let frame = config.frame_duration();
        assert!(frame.as_millis() >= 33 && frame.as_millis() <= 34);
    }

    #[test]
    fn test_from_app_config() {
        let app = Config {
            fps: 12,
            ..Config::default()
        };
        let config = SchedulerConfig::from(&app);
        assert_eq!(config.fps, 12);
        assert_eq!(config.channel_capacity, 8);
    }

    #[test]
    fn test_initial_state() {
        let (scheduler, _rx) = FrameScheduler::new(SchedulerConfig::default());
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.frames_sent(), 0);
    }

    #[tokio::test]
    async fn test_frames_flow() {
        let (mut scheduler, mut rx) = FrameScheduler::new(fast_config());
        scheduler.start(RenderTree::default()).unwrap();
        scheduler
            .mount(NodeId(1), Box::new(Text::new("Hello").shimmer()), (0, 0))
            .await
            .unwrap();

        let mut saw_content = false;
        for _ in 0..20 {
            let frame = rx.recv().await.unwrap();
            if frame.content.contains('H') {
                saw_content = true;
                break;
            }
        }
        assert!(saw_content);

        let tree = scheduler.stop().await.unwrap();
        assert!(tree.contains(NodeId(1)));
        assert!(!scheduler.is_running());
    }

    #[tokio::test]
    async fn test_start_twice() {
        let (mut scheduler, _rx) = FrameScheduler::new(fast_config());
        scheduler.start(RenderTree::default()).unwrap();
        assert!(matches!(
            scheduler.start(RenderTree::default()),
            Err(SchedulerError::AlreadyRunning)
        ));
        scheduler.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_commands_require_running_loop() {
        let (scheduler, _rx) = FrameScheduler::new(fast_config());
        let result = scheduler.set_redacted(NodeId(1), true).await;
        assert!(matches!(result, Err(SchedulerError::NotRunning)));
    }

    #[tokio::test]
    async fn test_stop_without_start() {
        let (mut scheduler, _rx) = FrameScheduler::new(fast_config());
        assert!(matches!(
            scheduler.stop().await,
            Err(SchedulerError::NotRunning)
        ));
    }

    #[tokio::test]
    async fn test_unmount_and_toggle() {
        let (mut scheduler, _rx) = FrameScheduler::new(fast_config());
        scheduler.start(RenderTree::default()).unwrap();
        scheduler
            .mount(NodeId(1), Box::new(Text::new("Hello").redacted_if(true)), (0, 0))
            .await
            .unwrap();

        assert!(scheduler.set_redacted(NodeId(1), false).await.unwrap());
        assert!(matches!(
            scheduler.set_redacted(NodeId(2), false).await,
            Err(SchedulerError::UnknownNode(NodeId(2)))
        ));
        assert!(scheduler.unmount(NodeId(1)).await.unwrap());
        assert!(!scheduler.unmount(NodeId(1)).await.unwrap());

        let tree = scheduler.stop().await.unwrap();
        assert!(tree.is_empty());
    }

    #[tokio::test]
    async fn test_full_channel_drops_frames() {
        let config = SchedulerConfig {
            fps: 500,
            channel_capacity: 1,
            ..Default::default()
        };
        let (mut scheduler, _rx) = FrameScheduler::new(config);
        scheduler.start(RenderTree::default()).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.stop().await.unwrap();

        assert_eq!(scheduler.frames_sent(), 1);
        assert!(scheduler.frames_dropped() > 0);
    }
}
