//! Frame Stats Demo: Rebuild a status line every frame without allocating.
//!
//! Redraws a single terminal line at ~60 fps for two seconds. The same
//! builder is cleared and refilled each frame, so after the first frame
//! its buffer never grows again.
//!
//! Run with `RUST_LOG=trace` to see the buffer's only reallocations.

use crossterm::{
    cursor, queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use strand::StringBuilder;

/// Frames to draw.
const FRAMES: usize = 120;

/// Width of the progress bar in columns.
const BAR_WIDTH: usize = 20;

/// Target frame duration.
const FRAME_TIME: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    env_logger::init();

    let mut stdout = io::stdout();
    let mut line = StringBuilder::with_capacity(32);

    println!("Strand Frame Stats Demo");
    println!("=======================");

    let start = Instant::now();
    let mut last = start;
    queue!(stdout, cursor::Hide)?;

    for frame in 0..FRAMES {
        let now = Instant::now();
        let dt_ms = now.duration_since(last).as_secs_f32() * 1000.0;
        last = now;

        let filled = (frame + 1) * BAR_WIDTH / FRAMES;
        line.clear()
            .append("frame ")
            .append_int(frame)
            .append(" | dt ")
            .append_f32(dt_ms)
            .append(" ms | elapsed ")
            .append_f64(start.elapsed().as_secs_f64())
            .append(" s [")
            .append_repeated('#', filled)
            .append_repeated('.', BAR_WIDTH - filled)
            .append_char(']');

        queue!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        line.write_to(&mut stdout)?;

        std::thread::sleep(FRAME_TIME);
    }

    queue!(stdout, cursor::Show)?;
    writeln!(stdout)?;
    println!(
        "Final buffer: {} chars used, {} chars of capacity",
        line.len(),
        line.capacity()
    );
    stdout.flush()
}
