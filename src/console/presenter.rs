use crate::domain::entity::{DomainEvent, SessionPhase, TimerSnapshot};

/// Width of the progress bar in characters.
const BAR_WIDTH: usize = 10;

pub const HELP: &str = "\
Commands:
  start [task-id [title]]  start a focus session, optionally for a task
  pause                    pause the countdown
  resume                   resume a paused countdown
  stop                     cancel the session
  skip                     skip the current break
  status                   show the timer
  help                     show this message
  quit                     leave";

/// Render a snapshot as one status line.
pub fn render_snapshot(snapshot: &TimerSnapshot) -> String {
    let clock = clock(snapshot.remaining_seconds);
    let cycles = snapshot.cycle_count;

    let label = match snapshot.phase() {
        SessionPhase::Idle => return format!("Idle {clock} ready, cycles {cycles}"),
        _ if snapshot.is_break => "Break",
        _ => "Focus",
    };
    let paused = if snapshot.is_paused { " (paused)" } else { "" };

    format!(
        "{label} {clock} [{}] cycles {cycles}{paused}",
        bar(snapshot.progress)
    )
}

/// Render an event as one line.
pub fn render_event(event: &DomainEvent) -> String {
    match event {
        DomainEvent::SessionCompleted {
            points_earned,
            total_cycles_so_far,
        } => format!(
            "Session complete! +{points_earned} points ({total_cycles_so_far} completed so far)"
        ),
        DomainEvent::BreakStarted { break_minutes } => {
            format!("Take a {break_minutes} minute break")
        }
        DomainEvent::BreakEnded { message } | DomainEvent::Notice { message } => message.clone(),
    }
}

fn clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn bar(progress: f32) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
