//! Text backend that draws frames to a terminal or any other writer.

use std::{
    io::Write,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result as AnyResult};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use pathviz_rendering::{
    render_scene, FrameControl, Presentation, RenderingBackend, Scene, TextStyle,
};

/// How the backend advances time between frames.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Pacing {
    /// Animate on the alternate screen, sleeping for `frame` between redraws
    /// and reporting the measured wall time. The final frame is printed again
    /// after the terminal is restored.
    RealTime { frame: Duration },
    /// Report a fixed `dt` without sleeping; only the final frame is drawn.
    Simulated { dt: Duration },
}

pub(crate) struct TerminalBackend<W> {
    out: W,
    pacing: Pacing,
}

impl<W> TerminalBackend<W>
where
    W: Write,
{
    pub(crate) fn new(out: W, pacing: Pacing) -> Self {
        Self { out, pacing }
    }

    fn draw(
        &mut self,
        title: &str,
        style: TextStyle,
        scene: &Scene,
        clear: bool,
    ) -> AnyResult<()> {
        let frame = render_scene(scene, style)?;
        if clear {
            queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        }
        writeln!(self.out, "{title}")?;
        self.out.write_all(frame.as_bytes())?;
        self.out.flush().context("failed to flush frame")
    }

    fn animate<F>(
        &mut self,
        title: &str,
        style: TextStyle,
        scene: &mut Scene,
        frame: Duration,
        update_scene: &mut F,
    ) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) -> FrameControl,
    {
        let mut last = Instant::now();
        loop {
            self.draw(title, style, scene, true)?;
            thread::sleep(frame);
            let now = Instant::now();
            let dt = now.duration_since(last);
            last = now;
            if update_scene(dt, scene) == FrameControl::Exit {
                return Ok(());
            }
        }
    }
}

impl<W> RenderingBackend for TerminalBackend<W>
where
    W: Write,
{
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) -> FrameControl,
    {
        let Presentation {
            title,
            style,
            mut scene,
        } = presentation;

        match self.pacing {
            Pacing::RealTime { frame } => {
                execute!(self.out, EnterAlternateScreen, Hide)?;
                let animated = self.animate(&title, style, &mut scene, frame, &mut update_scene);
                let restored = execute!(self.out, Show, LeaveAlternateScreen);
                animated?;
                restored.context("failed to restore the terminal")?;
                self.draw(&title, style, &scene, false)
            }
            Pacing::Simulated { dt } => {
                while update_scene(dt, &mut scene) == FrameControl::Continue {}
                self.draw(&title, style, &scene, false)
            }
        }
    }
}
