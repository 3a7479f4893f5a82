use std::{fs, path::Path};

use anyhow::{Context, Result};

#[extend::ext(name = ScrapeExt)]
pub impl str {
  /// Returns the text between the first occurrence of `marker` and the next
  /// `terminator` after it. If the terminator never appears, the value runs to
  /// the end of the text.
  fn between(&self, marker: &str, terminator: char) -> Option<&str> {
    let start = self.find(marker)? + marker.len();
    let rest = &self[start..];
    let end = rest.find(terminator).unwrap_or(rest.len());

    Some(&rest[..end])
  }

  /// Parses an unsigned integer in `radix`, ignoring surrounding whitespace.
  /// Hexadecimal values may carry a `0x` prefix.
  fn parse_radix(&self, radix: u32) -> Option<u64> {
    let digits = self.trim();
    let digits = match radix {
      16 => digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits),
      _ => digits,
    };

    u64::from_str_radix(digits, radix).ok()
  }
}

#[extend::ext(name = PathExt)]
pub impl Path {
  /// Reads the whole file, replacing invalid UTF-8 instead of failing.
  fn read_lossy(&self) -> Result<String> {
    let bytes = fs::read(self).with_context(|| format!("read {self:?}"))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
  }

  /// The final path component as an owned string.
  fn file_name_string(&self) -> Result<String> {
    Ok(self.file_name().context("file name")?.to_string_lossy().into_owned())
  }
}
