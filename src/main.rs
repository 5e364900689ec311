// SkeletonView: demo
//
// Plays the skeleton demo screen in the terminal for a number of frames.
// `RUST_LOG=debug` shows lifecycle events on stderr.

mod content_view;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use skeleton_host::{FrameScheduler, NodeId, RenderTree, SchedulerConfig};
use skeleton_render::{AnimationEngine, Compositor, ViewAnimation};
use skeleton_utils::Config;

use crate::content_view::content_view;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Parser, Debug)]
#[clap(name = "skeleton-view", version, about = "Shimmering skeleton placeholder demo")]
struct CliArgs {
    /// KDL configuration file
    #[clap(long, value_parser)]
    config: Option<PathBuf>,

    /// Seconds per shimmer cycle
    #[clap(long, value_parser)]
    duration: Option<f64>,

    /// Reverse the shimmer on every other cycle
    #[clap(long, action)]
    bounce: bool,

    /// Keep the placeholder but do not animate it
    #[clap(long, action)]
    no_shimmer: bool,

    /// Show the real content instead of the placeholder
    #[clap(long, action)]
    reveal: bool,

    /// Frames per second
    #[clap(long, value_parser)]
    fps: Option<u32>,

    /// Number of frames to play before exiting
    #[clap(long, value_parser, default_value_t = 90)]
    frames: u64,

    /// Write frames back to back on the virtual clock, without a terminal
    #[clap(long, action)]
    headless: bool,

    /// Print the effective configuration as JSON and exit
    #[clap(long, action)]
    print_config: bool,
}

impl CliArgs {
    /// Config file (or defaults) with command-line overrides applied
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(duration) = self.duration {
            config.shimmer.duration = duration;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        config.shimmer.bounce |= self.bounce;
        config.shimmer.active &= !self.no_shimmer;
        config.redacted &= !self.reveal;

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();
    let config = args.resolve_config()?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.headless {
        return render_headless(&config, args.frames, &mut io::stdout().lock());
    }

    play(&config, args.frames).await
}

/// Reproducible playback: frame N shows the screen `N / fps` seconds in.
fn render_headless<W: Write>(config: &Config, frames: u64, out: &mut W) -> Result<()> {
    let mut animation = ViewAnimation::new(content_view(config), Compositor::new(config.background))
        .with_fps(config.fps);
    log::debug!(
        "Headless playback of {} frames at {} fps",
        frames,
        animation.target_fps()
    );

    for _ in 0..frames {
        let Some(frame) = animation.next_frame() else {
            break;
        };
        if frame.is_dirty() {
            writeln!(out, "-- frame {} --", frame.sequence)?;
            writeln!(out, "{}", frame.content)?;
        }
    }
    out.flush()?;
    Ok(())
}

async fn play(config: &Config, frames: u64) -> Result<()> {
    let (mut scheduler, mut rx) = FrameScheduler::new(SchedulerConfig::from(config));
    scheduler.start(RenderTree::new(Compositor::new(config.background)))?;
    scheduler
        .mount(NodeId(0), Box::new(content_view(config)), (2, 1))
        .await
        .context("failed to mount demo screen")?;

    let mut stdout = io::stdout().lock();
    let mut shown = 0;
    while shown < frames {
        tokio::select! {
            frame = rx.recv() => {
                let Some(frame) = frame else { break };
                if frame.is_dirty() || shown == 0 {
                    write!(stdout, "{}{}", CLEAR_SCREEN, frame.content)?;
                    stdout.flush()?;
                }
                shown += 1;
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted");
                break;
            }
        }
    }
    writeln!(stdout)?;

    scheduler.stop().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(flags: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("skeleton-view").chain(flags.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = args(&[]).resolve_config().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(args(&[]).frames, 90);
    }

    #[test]
    fn test_flags_override_config() {
        let config = args(&["--duration", "1", "--bounce", "--no-shimmer", "--fps", "12"])
            .resolve_config()
            .unwrap();
        assert_eq!(config.shimmer.duration, 1.0);
        assert!(config.shimmer.bounce);
        assert!(!config.shimmer.active);
        assert_eq!(config.fps, 12);
        assert!(config.redacted);
    }

    #[test]
    fn test_reveal_and_zero_fps() {
        assert!(!args(&["--reveal"]).resolve_config().unwrap().redacted);
        assert!(args(&["--fps", "0"]).resolve_config().is_err());
    }

    #[test]
    fn test_headless_frames_follow_virtual_clock() {
        let config = args(&["--headless", "--fps", "10"]).resolve_config().unwrap();
        let mut out = Vec::new();
        render_headless(&config, 5, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("-- frame").count(), 5);
        assert!(text.contains("-- frame 4 --"));
        assert!(text.contains('█'));
    }

    #[test]
    fn test_headless_static_screen_paints_once() {
        let config = args(&["--reveal"]).resolve_config().unwrap();
        let mut out = Vec::new();
        render_headless(&config, 3, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("-- frame").count(), 1);
        assert!(text.contains("Hello"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = args(&["--config", "/nonexistent/skeleton.kdl"])
            .resolve_config()
            .unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
