//! Interactive terminal viewer command.

use crate::config::WavebarsConfig;
use crate::controller::{PointerEvent, WaveformBars};
use crate::playhead::Playhead;
use crate::samples;
use crate::ui::{StatusLine, ViewerCommand, WaveformViewer};
use crate::waveform::RenderMode;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Shows the waveform in the terminal until the user quits.
///
/// Mouse drags preview a seek and commit it on release. Space runs a
/// simulated playhead that reports progress every tick.
///
/// # Errors
/// - If the configuration or overrides are invalid
/// - If the samples cannot be loaded
/// - If the terminal cannot be driven
pub fn handle_view(
    file: PathBuf,
    mode: Option<RenderMode>,
    bar_count: Option<usize>,
    duration_secs: Option<f64>,
) -> anyhow::Result<()> {
    let config = WavebarsConfig::load()?.with_overrides(mode, bar_count, duration_secs)?;
    let data = samples::load_samples(&file)?;

    let mut bars = WaveformBars::new(config.bars.clone())?;
    bars.set_data(data)?;

    let tick = Duration::from_millis(config.viewer.tick_ms);
    let mut playhead = Playhead::new(config.viewer.duration()?);

    tracing::info!(
        "Viewing {} ({} bars, {} mode)",
        file.display(),
        bars.bars().len(),
        config.bars.mode
    );

    let mut viewer = WaveformViewer::new()?;
    let result = run_viewer(&mut viewer, &mut bars, &mut playhead, tick);
    viewer.cleanup()?;

    tracing::info!("Viewer closed at progress {:.3}", bars.progress());
    result
}

fn run_viewer(
    viewer: &mut WaveformViewer,
    bars: &mut WaveformBars,
    playhead: &mut Playhead,
    tick: Duration,
) -> anyhow::Result<()> {
    let mode = bars.style().mode.to_string();

    loop {
        let now = Instant::now();
        playhead.stop_at_end(now);
        if playhead.is_playing() {
            bars.set_progress(playhead.position_at(now));
        }

        let status = StatusLine {
            playing: playhead.is_playing(),
            elapsed: playhead.duration().mul_f64(bars.progress().clamp(0.0, 1.0)),
            total: playhead.duration(),
            mode: mode.clone(),
        };
        viewer.render(bars, &status)?;

        match viewer.handle_input(tick)? {
            ViewerCommand::Quit => break,
            ViewerCommand::Continue => {}
            ViewerCommand::TogglePlayback => {
                let now = Instant::now();
                playhead.seek_at(bars.progress(), now);
                playhead.toggle_at(now);
            }
            ViewerCommand::Seek(delta) => {
                let target = (bars.progress() + delta).clamp(0.0, 1.0);
                bars.set_progress(target);
                playhead.seek_at(target, Instant::now());
            }
            ViewerCommand::Pointer(event) => {
                let area = viewer.bars_area();
                let changed = bars.handle_pointer(event, area.x as f64, area.width as f64);
                if changed && event == PointerEvent::Release {
                    playhead.seek_at(bars.progress(), Instant::now());
                }
            }
        }
    }

    Ok(())
}
