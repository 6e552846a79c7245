use std::io::Write;

use crate::error::{DashError, Result};

/// Minimal SVG document writer over any `Write` sink.
pub(crate) struct SvgWriter<W: Write> {
    writer: W,
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl<W: Write> Write for SvgWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl SvgWriter<Vec<u8>> {
    /// Create a writer that renders into memory.
    pub(crate) fn buffer() -> Self { Self { writer: Vec::new() } }

    /// Finish and return the document text.
    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.writer)
            .map_err(|e| DashError::Geometry(format!("rendered SVG is not UTF-8: {e}")))
    }
}

impl<W: Write> SvgWriter<W> {
    /// Write the XML declaration, the opening <svg> tag and a white background.
    pub(crate) fn write_header(&mut self, width: f64, height: f64) -> Result<()> {
        writeln!(self, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
        writeln!(self, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##)?;
        writeln!(self, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
        Ok(())
    }

    /// Write a <style> block inside <defs>.
    pub(crate) fn write_styles(&mut self, css: &str) -> Result<()> {
        writeln!(self, "<defs>\n<style>\n{css}\n</style>\n</defs>")?;
        Ok(())
    }

    /// Write the closing </svg> tag.
    pub(crate) fn write_footer(&mut self) -> Result<()> {
        writeln!(self, "</svg>")?;
        self.flush()?;
        Ok(())
    }
}
