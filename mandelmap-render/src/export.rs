//! PNG snapshot encoding.
//!
//! The engine hands the currently composited frame to whoever asked for a
//! screenshot; this module only turns that frame into PNG bytes. File
//! naming, paths, and directories stay with the caller.

use std::io::Write;

use tracing::debug;

use crate::buffer::RgbBuffer;

/// Encode an RGB frame as a PNG into any writer.
pub fn write_snapshot_png<W: Write>(buffer: &RgbBuffer, writer: W) -> crate::Result<()> {
    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);
    encoder.add_text_chunk("Software".to_string(), "MandelMap".to_string())?;

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;

    debug!(
        width = buffer.width,
        height = buffer.height,
        "Encoded snapshot PNG"
    );
    Ok(())
}
