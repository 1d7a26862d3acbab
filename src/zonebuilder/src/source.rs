//! Zone source files
//!
//! A zone source lists the root assets of a zone, one `type,name` pair per
//! line. Blank lines and lines starting with `#` or `//` are ignored.

use crate::asset_type::kind_from_name;
use crate::session::AssetKey;
use crate::{Error, Result};

/// Parse zone source text into the list of root assets
pub fn parse(text: &str) -> Result<Vec<AssetKey>> {
    let mut assets = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        let invalid = |reason: String| Error::InvalidSource {
            line: index + 1,
            reason,
        };

        let (kind, name) = line
            .split_once(',')
            .ok_or_else(|| invalid(format!("expected 'type,name', got '{}'", line)))?;
        let kind = kind_from_name(kind.trim())
            .ok_or_else(|| invalid(format!("unknown asset type '{}'", kind.trim())))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("missing asset name".to_string()));
        }

        assets.push(AssetKey::new(kind, name));
    }

    Ok(assets)
}
