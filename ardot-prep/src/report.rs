/// Completion summary printed by the preparer
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::Write;

use crate::prepare::PrepSummary;

pub fn print_summary<W: Write>(writer: &mut W, summary: &PrepSummary, verified: usize) -> std::io::Result<()> {
    queue!(
        writer,
        SetForegroundColor(Color::Green),
        Print(format!("✅ Processed {} images\n", summary.processed())),
        ResetColor,
        Print(format!("→ Resized images in {}\n", summary.output_dir.display())),
        Print(format!("→ Index written to {}\n", summary.manifest_path.display())),
        SetForegroundColor(Color::DarkGrey),
        Print(format!("  {verified} verified\n")),
        ResetColor
    )?;
    writer.flush()
}
