// SkeletonView Host
//
// Plays the part of the UI framework around the effects: a render tree of
// mounted views and a frame scheduler that ticks them and publishes frames.
//
// # Architecture
//
// ```text
// FrameScheduler ── commands ──▶ frame loop (tokio task)
//       ▲                              │ tick / render / compose
//       │                              ▼
//  Receiver<AnimationFrame> ◀──── RenderTree ── Box<dyn View>
// ```
//
// # Usage
//
// ```ignore
// let (mut scheduler, mut frames) = FrameScheduler::new(SchedulerConfig::default());
// scheduler.start(RenderTree::default())?;
// scheduler.mount(NodeId(1), Box::new(card.redacted_if(true)), (0, 0)).await?;
// while let Some(frame) = frames.recv().await {
//     print!("{}", frame.content);
// }
// ```

mod error;
mod render_tree;
mod scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use render_tree::{BoxedView, NodeId, RenderTree};
pub use scheduler::{FrameScheduler, SchedulerConfig};
