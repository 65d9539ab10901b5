use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::action_queue::{channel, completion_channel, Action};
use super::actions::{apply_completion, run_action, Services};
use super::views::handle_key;

const TICK: Duration = Duration::from_secs(1);

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    services: &Services,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let (completion_tx, mut completion_rx) = completion_channel();

    let mut last_tick = Instant::now();
    let mut last_poll = Instant::now();
    // Set while the work-log modal is open.
    let mut last_autosave: Option<Instant> = None;

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_busy() {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, &action_tx);
                }
            }
        }

        let now = Instant::now();

        let ticks = due_ticks(&mut last_tick, now);
        if app.timer.is_running() {
            for _ in 0..ticks {
                app.timer.tick();
            }
        }

        match (app.is_work_log_open(), last_autosave) {
            (true, None) => last_autosave = Some(now),
            (true, Some(since)) if now.duration_since(since) >= services.autosave_every => {
                let _ = action_tx.send(Action::SaveDraft);
                last_autosave = Some(now);
            }
            (false, Some(_)) => last_autosave = None,
            _ => {}
        }

        if now.duration_since(last_poll) >= services.poll_every {
            let _ = action_tx.send(Action::PollUpdates);
            last_poll = now;
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, services, &completion_tx);
        }

        while let Ok(completion) = completion_rx.try_recv() {
            apply_completion(completion, app);
        }

        app.expire_toast(now);

        if !app.running {
            break;
        }
    }

    Ok(())
}

/// Whole ticks elapsed since `last_tick`, which advances by exactly that many
/// periods so the remainder carries into the next frame.
fn due_ticks(last_tick: &mut Instant, now: Instant) -> u32 {
    let mut ticks = 0;
    while now.duration_since(*last_tick) >= TICK {
        *last_tick += TICK;
        ticks += 1;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_overshoot_does_not_drift() {
        let start = Instant::now();
        let mut last_tick = start;
        let mut total = 0;
        // 101ms frames over 101s; resetting to `now` would count only 100.
        for frame in 1..=1000u32 {
            total += due_ticks(&mut last_tick, start + Duration::from_millis(101) * frame);
        }
        assert_eq!(total, 101);
        assert_eq!(last_tick, start + TICK * 101);
    }

    #[test]
    fn stalled_frame_catches_up() {
        let start = Instant::now();
        let mut last_tick = start;
        assert_eq!(due_ticks(&mut last_tick, start + Duration::from_millis(3500)), 3);
        assert_eq!(due_ticks(&mut last_tick, start + Duration::from_millis(3900)), 0);
        assert_eq!(due_ticks(&mut last_tick, start + Duration::from_millis(4000)), 1);
    }
}
