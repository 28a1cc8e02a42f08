//! Headless host for running the send ritual without a display server.
//!
//! Stands in for the real collaborators: a test-pattern display to capture from, a presenter that
//! only logs, and a frame loop on a manually driven clock.

use std::cell::Cell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context};
use beamshot_config::Config;

use crate::animation::Clock;
use crate::capture::{CaptureSource, CapturedImage, Size};
use crate::cli::{Cli, Outcome};
use crate::input::TouchEvent;
use crate::ui::send_ui::{AnimationOrchestrator, Phase, Presenter, SendSurface, TransitionSpecs};

/// Display that captures a gradient with a white block in the native top-left corner.
#[derive(Debug)]
pub struct TestPatternDisplay {
    logical: Size,
    rotation: i32,
    available: bool,
}

impl TestPatternDisplay {
    pub fn new(logical: Size, rotation: i32, available: bool) -> Self {
        Self {
            logical,
            rotation,
            available,
        }
    }
}

impl CaptureSource for TestPatternDisplay {
    fn real_display_size(&self) -> Size {
        self.logical
    }

    fn current_rotation_degrees(&self) -> i32 {
        self.rotation
    }

    fn raw_capture(&mut self, size: Size) -> Option<CapturedImage> {
        if !self.available || size.is_empty() {
            return None;
        }

        let marker = Size::new((size.w / 8).max(1), (size.h / 8).max(1));
        Some(CapturedImage::from_fn(size, |x, y| {
            if x < marker.w && y < marker.h {
                return [255, 255, 255, 255];
            }
            let r = (u64::from(x) * 255 / u64::from(size.w)) as u8;
            let g = (u64::from(y) * 255 / u64::from(size.h)) as u8;
            [r, g, 128, 255]
        }))
    }
}

/// Presenter that logs instead of showing anything.
#[derive(Debug, Default)]
pub struct LoggingPresenter {
    attached: bool,
    pub attach_count: u32,
    pub detach_count: u32,
}

impl Presenter for LoggingPresenter {
    fn attach(&mut self, surface: &SendSurface) {
        debug_assert!(!self.attached);
        self.attached = true;
        self.attach_count += 1;

        let size = surface.image().map(|image| image.size()).unwrap_or_default();
        info!(
            "attaching {size} overlay, orientation locked to {:?}",
            surface.orientation()
        );
    }

    fn detach(&mut self, _surface: &SendSurface) {
        debug_assert!(self.attached);
        self.attached = false;
        self.detach_count += 1;
        info!("detaching overlay");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Touch,
    StartSend,
    PostSend,
    Finish,
    Dismiss,
}

#[derive(Debug)]
pub struct Report {
    pub phase: Phase,
    pub confirmed: bool,
    pub frames: u32,
    pub elapsed: Duration,
    pub attach_count: u32,
    pub detach_count: u32,
}

fn script(cli: &Cli) -> Vec<(Duration, Action)> {
    let ms = Duration::from_millis;

    let mut script = match cli.outcome {
        Outcome::Send => vec![(ms(300), Action::StartSend), (ms(1800), Action::PostSend)],
        Outcome::Finish => vec![(ms(1000), Action::Finish)],
        Outcome::Abort => vec![(ms(300), Action::StartSend), (ms(1800), Action::Dismiss)],
    };
    if let Some(touch) = cli.touch_after_ms {
        script.push((ms(touch), Action::Touch));
    }

    // Stable, so a touch scheduled together with another action runs after it.
    script.sort_by_key(|(time, _)| *time);
    script
}

/// Runs one capture-show-send cycle and reports how it ended.
pub fn run(cli: &Cli, config: &Config) -> anyhow::Result<Report> {
    let animations = &config.animations;

    let mut clock = Clock::with_time(Duration::ZERO);
    clock.set_rate(1. / animations.slowdown().max(0.001));
    clock.set_complete_instantly(animations.off);

    let confirmed = Rc::new(Cell::new(false));
    let on_confirm = {
        let confirmed = confirmed.clone();
        move || {
            info!("send confirmed");
            confirmed.set(true);
        }
    };
    let mut orch = AnimationOrchestrator::new(
        LoggingPresenter::default(),
        clock.clone(),
        TransitionSpecs::from_config(animations),
        on_confirm,
    );

    let logical = Size::new(cli.width, cli.height);
    let mut display = TestPatternDisplay::new(logical, cli.rotation, !cli.capture_unavailable);
    orch.take_screenshot(&mut display).context("error taking screenshot")?;

    if let (Some(path), Some(image)) = (&cli.output, orch.surface().image()) {
        let file = File::create(path).with_context(|| format!("error creating {path:?}"))?;
        image
            .write_png(BufWriter::new(file))
            .with_context(|| format!("error writing {path:?}"))?;
        info!("wrote screenshot to {path:?}");
    }

    orch.show_pre_send();

    let script = script(cli);
    let last_action = script.last().map(|(time, _)| *time).unwrap_or_default();

    let frame = Duration::from_millis(cli.frame_ms.max(1));
    let limit = last_action + Duration::from_secs(10).mul_f64(animations.slowdown().max(1.));
    let touch_pos = logical.to_dvec2() / 2.;

    let mut script = script.into_iter().peekable();
    let mut frames = 0;
    loop {
        let now = clock.now_unadjusted();

        while let Some((_, action)) = script.next_if(|(time, _)| *time <= now) {
            debug!("{now:?}: {action:?}");
            match action {
                Action::Touch => {
                    let consumed = orch.on_touch(&TouchEvent::down(touch_pos));
                    debug!("touch consumed: {consumed}");
                }
                Action::StartSend => orch.show_start_send(),
                Action::PostSend => orch.show_post_send(),
                Action::Finish => orch.finish(),
                Action::Dismiss => orch.dismiss(),
            }
        }

        orch.advance_animations();
        if orch.phase() == Phase::Detached && script.peek().is_none() {
            break;
        }
        if now > limit {
            bail!("ritual did not finish within {limit:?}, stuck in {:?}", orch.phase());
        }

        clock.advance(frame);
        frames += 1;
    }

    let presenter = orch.presenter();
    Ok(Report {
        phase: orch.phase(),
        confirmed: confirmed.get(),
        frames,
        elapsed: clock.now_unadjusted(),
        attach_count: presenter.attach_count,
        detach_count: presenter.detach_count,
    })
}
