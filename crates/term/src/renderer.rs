//! Flushes a framebuffer to a terminal or any other writer.
//!
//! Frames are printed inline, row after row, without taking over the screen.
//! Styled output is a stream of crossterm commands; plain output is the bare
//! characters.

use std::io::{IsTerminal, Write};

use anyhow::Result;

use crossterm::{
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Encode a styled frame into `out`, one line per row.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_frame_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    for y in 0..fb.height() {
        let mut current_style: Option<CellStyle> = None;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(Print('\n'))?;
    }
    Ok(())
}

/// Write `fb` to `out`, styled or as plain text
pub fn write_frame<W: Write>(fb: &FrameBuffer, out: &mut W, styled: bool) -> Result<()> {
    if styled {
        let mut buf = Vec::with_capacity(16 * 1024);
        encode_frame_into(fb, &mut buf)?;
        out.write_all(&buf)?;
    } else {
        writeln!(out, "{}", fb.to_text())?;
    }
    out.flush()?;
    Ok(())
}

/// Whether stdout is a terminal that should get styled output
pub fn stdout_is_styled() -> bool {
    std::io::stdout().is_terminal()
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrameBuffer {
        let mut fb = FrameBuffer::new(3, 2);
        let style = CellStyle::default();
        fb.put_str(0, 0, "ab", style);
        fb.put_char(2, 1, 'z', style.bold());
        fb
    }

    #[test]
    fn styled_frame_contains_every_row() {
        let mut out = Vec::new();
        encode_frame_into(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('a'));
        assert!(text.contains('z'));
        assert_eq!(text.matches('\n').count(), 2);
        // escape sequences present
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn plain_frame_is_bare_text() {
        let mut out = Vec::new();
        write_frame(&sample(), &mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ab\n  z\n");
    }

    #[test]
    fn rgb_maps_to_truecolor() {
        assert_eq!(
            rgb_to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
